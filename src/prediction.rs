//! Trajectory prediction for the spacecraft.
//!
//! Runs a disposable forward simulation from the craft's current state and
//! produces the polyline the renderer draws ahead of the ship. The loop is
//! the same gravity-accumulate → integrate-velocity → integrate-position
//! sequence as the live tick, with body positions sampled at each step's
//! end-of-tick time, so the drawn line is exactly where the craft will fly
//! if no input arrives.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::bodies::SolarSystem;
use crate::physics::gravity::compute_acceleration;
use crate::spacecraft::{FlightMode, Spacecraft};
use crate::types::SimulationTime;

/// Plugin providing periodic trajectory prediction.
pub struct PredictionPlugin;

impl Plugin for PredictionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PredictionSettings>()
            .init_resource::<PredictionState>()
            .init_resource::<TrajectoryPath>()
            .add_systems(Update, update_trajectory);
    }
}

/// Configuration for trajectory prediction.
#[derive(Resource)]
pub struct PredictionSettings {
    /// Number of integration steps per prediction.
    pub steps: usize,
    /// Step size (seconds); matches the fixed physics timestep so the
    /// prediction and the live flight stay in lockstep.
    pub dt: f64,
    /// Recalculate every N frames. Throttling is purely a performance
    /// measure; a stale prediction never affects the simulation.
    pub update_interval: u32,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            steps: 1500,
            dt: 1.0 / 64.0,
            update_interval: 10,
        }
    }
}

/// Bookkeeping for the periodic recompute.
#[derive(Resource, Default)]
pub struct PredictionState {
    frame_counter: u32,
    needs_update: bool,
}

impl PredictionState {
    /// Request a recompute on the next frame (e.g. after a reset).
    pub fn mark_dirty(&mut self) {
        self.needs_update = true;
    }
}

/// The most recent predicted trajectory, for display.
#[derive(Resource, Default, Clone, Debug)]
pub struct TrajectoryPath {
    /// Predicted positions, one per step, oldest first.
    pub points: Vec<DVec2>,
    /// Whether prediction stopped at a surface.
    pub ends_in_collision: bool,
    /// Body index the predicted path hits, if any.
    pub collision_body: Option<usize>,
}

/// Forward-simulate from `(pos, vel)` at `start_time` for up to `steps`
/// ticks of `dt`, without touching live state.
///
/// Orbiting bodies are sampled at each step's end-of-tick time, mirroring
/// the live tick where orbits advance before the craft integrates. The
/// sequence truncates at the first step whose position penetrates a body's
/// surface; the contact point is kept as the final point.
pub fn predict(
    mut pos: DVec2,
    mut vel: DVec2,
    system: &SolarSystem,
    start_time: f64,
    steps: usize,
    dt: f64,
) -> TrajectoryPath {
    let mut path = TrajectoryPath {
        points: Vec::with_capacity(steps),
        ends_in_collision: false,
        collision_body: None,
    };

    for step in 1..=steps {
        let t = start_time + step as f64 * dt;
        let sources = system.gravity_sources_at(t);
        vel += compute_acceleration(pos, &sources) * dt;
        pos += vel * dt;
        path.points.push(pos);

        if let Some(body) = system.check_contact_at(pos, t) {
            path.ends_in_collision = true;
            path.collision_body = Some(body);
            break;
        }
    }

    path
}

/// Periodically recompute the displayed trajectory.
fn update_trajectory(
    craft: Res<Spacecraft>,
    system: Res<SolarSystem>,
    sim_time: Res<SimulationTime>,
    settings: Res<PredictionSettings>,
    mut state: ResMut<PredictionState>,
    mut path: ResMut<TrajectoryPath>,
) {
    state.frame_counter += 1;
    if !state.needs_update && state.frame_counter < settings.update_interval {
        return;
    }
    state.frame_counter = 0;
    state.needs_update = false;

    if craft.mode == FlightMode::Flying {
        *path = predict(
            craft.position,
            craft.velocity,
            &system,
            sim_time.current,
            settings.steps,
            settings.dt,
        );
    } else {
        // Parked or crashed craft has no future to draw.
        path.points.clear();
        path.ends_in_collision = false;
        path.collision_body = None;
    }
}
