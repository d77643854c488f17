//! Fixed-timestep flight simulation.
//!
//! One system drives the whole model: advance simulation time, move the
//! orbiting bodies to their positions for that time, then step the
//! spacecraft against the refreshed system. Orbit counting only runs while
//! the craft is actually flying.

pub mod gravity;

#[cfg(test)]
mod proptest_physics;

pub use gravity::{compute_acceleration, GravitySource};

use bevy::prelude::*;

use crate::bodies::SolarSystem;
use crate::spacecraft::{
    handle_reset, ControlIntent, FlightEvent, FlightMode, OrbitTracker, ResetEvent, Spacecraft,
};
use crate::types::SimulationTime;

/// Plugin wiring the flight simulation into the app.
///
/// Expects `SolarSystem` and `Spacecraft` to be inserted before this plugin
/// is added; the remaining resources are initialized here.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlIntent>()
            .init_resource::<OrbitTracker>()
            .init_resource::<SimulationTime>()
            .add_message::<FlightEvent>()
            .add_message::<ResetEvent>()
            .add_systems(FixedUpdate, physics_step)
            .add_systems(Update, handle_reset);
    }
}

/// Advance the simulation by one fixed tick.
fn physics_step(
    time: Res<Time>,
    intent: Res<ControlIntent>,
    mut sim_time: ResMut<SimulationTime>,
    mut system: ResMut<SolarSystem>,
    mut craft: ResMut<Spacecraft>,
    mut tracker: ResMut<OrbitTracker>,
    mut flight_events: MessageWriter<FlightEvent>,
) {
    if sim_time.paused {
        return;
    }

    let dt = SimulationTime::clamp_step(time.delta_secs_f64() * sim_time.scale);
    if dt <= 0.0 {
        return;
    }

    sim_time.current += dt;
    let now = sim_time.current;
    system.advance_orbits(now);

    if let Some(event) = craft.step(dt, &intent, &system) {
        match &event {
            FlightEvent::Launched => info!("Liftoff at t={:.1}", now),
            FlightEvent::Touchdown { body } => {
                info!("Touchdown on {} at t={:.1}", system.get(*body).name, now)
            }
            FlightEvent::Crashed { reason } => warn!("Crash: {}", reason),
        }
        flight_events.write(event);
    }

    if craft.mode == FlightMode::Flying {
        let primary = system.primary_body();
        tracker.record(craft.position, primary.position, primary.radius);
    }
}
