//! Common test utilities for integration tests.

use bevy::math::DVec2;
use moonhopper::bodies::{BodySpec, OrbitSpec, SolarSystem};
use moonhopper::spacecraft::{ControlIntent, FlightEvent, FlightMode, Spacecraft};

/// Fixed physics step used by the integration scenarios.
pub const DT: f64 = 1.0 / 64.0;

/// A lone fixed planet at the origin.
pub fn single_planet() -> SolarSystem {
    let specs = [BodySpec {
        name: "Gaia",
        radius: 250.0,
        gravity_strength: 50_000.0,
        has_gravity: true,
        position: DVec2::ZERO,
        orbit: None,
    }];
    SolarSystem::from_specs(&specs, "Gaia").unwrap()
}

/// The fixed planet plus a slow-moving moon.
pub fn planet_with_moon() -> SolarSystem {
    let specs = [
        BodySpec {
            name: "Gaia",
            radius: 250.0,
            gravity_strength: 50_000.0,
            has_gravity: true,
            position: DVec2::ZERO,
            orbit: None,
        },
        BodySpec {
            name: "Selene",
            radius: 70.0,
            gravity_strength: 800.0,
            has_gravity: true,
            position: DVec2::ZERO,
            orbit: Some(OrbitSpec {
                parent: "Gaia",
                radius: 1200.0,
                angular_speed: 0.00005,
                phase: 0.0,
                tilt: 0.0,
            }),
        },
    ];
    SolarSystem::from_specs(&specs, "Gaia").unwrap()
}

/// Put a spawned craft into free flight at the given state.
pub fn flying_craft(system: &SolarSystem, pos: DVec2, vel: DVec2) -> Spacecraft {
    let mut craft = Spacecraft::spawn(system);
    craft.mode = FlightMode::Flying;
    craft.on_body = None;
    craft.position = pos;
    craft.velocity = vel;
    craft
}

/// Replicate the live tick ordering: advance time, move bodies, step craft.
pub fn live_tick(
    craft: &mut Spacecraft,
    intent: &ControlIntent,
    system: &mut SolarSystem,
    sim_time: &mut f64,
) -> Option<FlightEvent> {
    *sim_time += DT;
    system.advance_orbits(*sim_time);
    craft.step(DT, intent, system)
}
