//! Shared fixtures for unit and property tests.
//!
//! Only compiled for tests; integration tests under `tests/` carry their
//! own copies of what they need since this module is crate-internal.

pub mod fixtures {
    use bevy::math::DVec2;

    use crate::bodies::{BodySpec, OrbitSpec, SolarSystem};

    /// A lone fixed planet at the origin, matching the default primary's
    /// radius and pull. The planet is body index 0 and the primary.
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

    /// The fixed planet plus a slow moon, for tests that need a moving
    /// surface or a second attractor. The moon's tangential speed is kept
    /// far below the safe-landing threshold so a gentle vertical drop
    /// onto it survives.
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
}
