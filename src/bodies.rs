//! Celestial body registry and orbit advancement.
//!
//! Bodies are declared once in a static configuration and resolved at load
//! time into an owned collection with integer parent links. A body either
//! has a fixed world position or orbits its parent on a circular path; the
//! parent relation forms a forest and is validated when the system is built.
//!
//! Positions of orbiting bodies are pure functions of simulation time, so
//! the live simulation and trajectory prediction can sample the exact same
//! body positions without sharing mutable state.

use bevy::math::DVec2;
use bevy::prelude::*;
use thiserror::Error;

use crate::physics::gravity::GravitySource;
use crate::types::CRAFT_HALF_HEIGHT;

/// Orbit descriptor in the declarative configuration. The parent is named;
/// resolution to an index happens when the `SolarSystem` is built.
#[derive(Clone, Copy, Debug)]
pub struct OrbitSpec {
    /// Name of the parent body.
    pub parent: &'static str,
    /// Orbit radius (world units).
    pub radius: f64,
    /// Angular speed (rad/s of simulated time).
    pub angular_speed: f64,
    /// Phase offset at t=0 (rad).
    pub phase: f64,
    /// Cosmetic inclination: the y-excursion is flattened by cos(tilt)
    /// to suggest an inclined orbit seen edge-on. Not physically derived.
    pub tilt: f64,
}

/// Declarative description of one celestial body.
#[derive(Clone, Copy, Debug)]
pub struct BodySpec {
    /// Unique display name.
    pub name: &'static str,
    /// Surface radius (world units), the collision boundary.
    pub radius: f64,
    /// Gravity strength scalar; acceleration at distance r is strength/r².
    pub gravity_strength: f64,
    /// Bodies without gravity are skipped in force accumulation.
    pub has_gravity: bool,
    /// Fixed world position. Ignored when `orbit` is present.
    pub position: DVec2,
    /// Orbit descriptor; `None` means the body is fixed in world space.
    pub orbit: Option<OrbitSpec>,
}

/// Resolved orbit with an index link to the parent body.
#[derive(Clone, Copy, Debug)]
pub struct Orbit {
    pub parent: usize,
    pub radius: f64,
    pub angular_speed: f64,
    pub phase: f64,
    pub tilt: f64,
}

/// A celestial body at runtime. `position` is authoritative world-space
/// state, rewritten every tick for orbiting bodies by [`SolarSystem::advance_orbits`].
#[derive(Clone, Debug)]
pub struct Body {
    pub name: &'static str,
    pub radius: f64,
    pub gravity_strength: f64,
    pub has_gravity: bool,
    pub position: DVec2,
    pub orbit: Option<Orbit>,
}

/// Errors detected while building a [`SolarSystem`] from its configuration.
/// All of these are fatal at startup; a silently skipped body would sit
/// frozen at the origin.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("duplicate body name '{0}' (names are case-insensitive)")]
    DuplicateName(String),
    #[error("body '{body}' orbits unknown parent '{parent}'")]
    UnknownParent { body: String, parent: String },
    #[error("orbit parent chain of '{body}' contains a cycle")]
    OrbitCycle { body: String },
    #[error("primary body '{0}' not found in configuration")]
    UnknownPrimary(String),
}

/// The owned collection of all celestial bodies.
///
/// Bodies are created once per session and never destroyed; only the
/// positions of orbiting bodies mutate, inside [`SolarSystem::advance_orbits`].
#[derive(Resource, Clone, Debug)]
pub struct SolarSystem {
    bodies: Vec<Body>,
    /// Indices in parent-before-child order for orbit updates.
    update_order: Vec<usize>,
    /// Index of the primary planet (spawn point, orbit-counting reference).
    primary: usize,
}

impl SolarSystem {
    /// Build a system from declarative specs, resolving parent names to
    /// indices and validating the orbit forest.
    pub fn from_specs(specs: &[BodySpec], primary_name: &str) -> Result<Self, ConfigError> {
        // Duplicate-name check, case-insensitive like name lookup.
        for (i, spec) in specs.iter().enumerate() {
            if specs[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(spec.name))
            {
                return Err(ConfigError::DuplicateName(spec.name.to_string()));
            }
        }

        let find = |name: &str| {
            specs
                .iter()
                .position(|spec| spec.name.eq_ignore_ascii_case(name))
        };

        let mut bodies = Vec::with_capacity(specs.len());
        for spec in specs {
            let orbit = match spec.orbit {
                Some(o) => {
                    let parent = find(o.parent).ok_or_else(|| ConfigError::UnknownParent {
                        body: spec.name.to_string(),
                        parent: o.parent.to_string(),
                    })?;
                    Some(Orbit {
                        parent,
                        radius: o.radius,
                        angular_speed: o.angular_speed,
                        phase: o.phase,
                        tilt: o.tilt,
                    })
                }
                None => None,
            };
            bodies.push(Body {
                name: spec.name,
                radius: spec.radius,
                gravity_strength: spec.gravity_strength,
                has_gravity: spec.has_gravity,
                position: spec.position,
                orbit,
            });
        }

        // Depth of each body in the parent forest; walking more than the
        // body count of links means the chain loops back on itself.
        let mut depths = vec![0usize; bodies.len()];
        for (i, body) in bodies.iter().enumerate() {
            let mut depth = 0;
            let mut current = body.orbit.as_ref().map(|o| o.parent);
            while let Some(parent) = current {
                depth += 1;
                if depth > bodies.len() {
                    return Err(ConfigError::OrbitCycle {
                        body: body.name.to_string(),
                    });
                }
                current = bodies[parent].orbit.as_ref().map(|o| o.parent);
            }
            depths[i] = depth;
        }

        // Parents before children: sort indices by forest depth.
        let mut update_order: Vec<usize> = (0..bodies.len()).collect();
        update_order.sort_by_key(|&i| depths[i]);

        let primary = find(primary_name)
            .ok_or_else(|| ConfigError::UnknownPrimary(primary_name.to_string()))?;

        let mut system = Self {
            bodies,
            update_order,
            primary,
        };
        // Establish consistent positions for t=0 configurations.
        system.advance_orbits(0.0);
        Ok(system)
    }

    /// Reposition every orbiting body for the given simulation time.
    /// Fixed bodies keep their configured positions.
    pub fn advance_orbits(&mut self, sim_time: f64) {
        for idx in 0..self.update_order.len() {
            let i = self.update_order[idx];
            if let Some(orbit) = self.bodies[i].orbit {
                let parent_pos = self.bodies[orbit.parent].position;
                self.bodies[i].position = parent_pos + orbit_offset(&orbit, sim_time);
            }
        }
    }

    /// World position of a body at an arbitrary time, without mutating
    /// anything. Agrees exactly with what `advance_orbits(t)` would cache.
    pub fn position_at(&self, index: usize, sim_time: f64) -> DVec2 {
        match self.bodies[index].orbit {
            Some(orbit) => self.position_at(orbit.parent, sim_time) + orbit_offset(&orbit, sim_time),
            None => self.bodies[index].position,
        }
    }

    /// Gravity sources from the currently cached body positions.
    pub fn gravity_sources(&self) -> Vec<GravitySource> {
        self.bodies
            .iter()
            .filter(|b| b.has_gravity)
            .map(|b| (b.position, b.gravity_strength))
            .collect()
    }

    /// Gravity sources with body positions sampled at an arbitrary time.
    /// Used by trajectory prediction so it sees the same moving bodies the
    /// live simulation will.
    pub fn gravity_sources_at(&self, sim_time: f64) -> Vec<GravitySource> {
        (0..self.bodies.len())
            .filter(|&i| self.bodies[i].has_gravity)
            .map(|i| (self.position_at(i, sim_time), self.bodies[i].gravity_strength))
            .collect()
    }

    /// First body (in declaration order) whose surface circle the given
    /// craft position penetrates, using cached positions.
    pub fn check_contact(&self, pos: DVec2) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| (pos - b.position).length() < b.radius + CRAFT_HALF_HEIGHT)
    }

    /// As [`Self::check_contact`], with body positions sampled at a time.
    pub fn check_contact_at(&self, pos: DVec2, sim_time: f64) -> Option<usize> {
        (0..self.bodies.len()).find(|&i| {
            (pos - self.position_at(i, sim_time)).length()
                < self.bodies[i].radius + CRAFT_HALF_HEIGHT
        })
    }

    /// Outward unit normal of a body's surface through the given point.
    /// Zero vector when the point coincides with the body center.
    pub fn surface_normal_at(&self, index: usize, point: DVec2) -> DVec2 {
        (point - self.bodies[index].position).normalize_or_zero()
    }

    /// Whether a point lies inside a body's surface circle.
    pub fn contains_point(&self, index: usize, point: DVec2) -> bool {
        (point - self.bodies[index].position).length() <= self.bodies[index].radius
    }

    /// Case-insensitive name lookup. Only for load-time and UI paths;
    /// steady-state code holds indices.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, index: usize) -> &Body {
        &self.bodies[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Index of the primary planet.
    pub fn primary(&self) -> usize {
        self.primary
    }

    /// Shorthand for the primary planet's body data.
    pub fn primary_body(&self) -> &Body {
        &self.bodies[self.primary]
    }
}

/// Offset of an orbiting body from its parent at the given time.
fn orbit_offset(orbit: &Orbit, sim_time: f64) -> DVec2 {
    let angle = sim_time * orbit.angular_speed + orbit.phase;
    DVec2::new(
        angle.cos() * orbit.radius,
        angle.sin() * orbit.radius * orbit.tilt.cos(),
    )
}

/// Default solar system: a fixed primary planet with an orbiting moon, a
/// fixed distant sun, and three outer planets orbiting the sun.
pub const DEFAULT_BODIES: &[BodySpec] = &[
    BodySpec {
        name: "Terra",
        radius: 250.0,
        gravity_strength: 50_000.0,
        has_gravity: true,
        position: DVec2::ZERO,
        orbit: None,
    },
    BodySpec {
        name: "Luna",
        radius: 70.0,
        gravity_strength: 4_000.0,
        has_gravity: true,
        position: DVec2::ZERO,
        orbit: Some(OrbitSpec {
            parent: "Terra",
            radius: 1400.0,
            angular_speed: 0.015,
            phase: 0.0,
            tilt: 0.35,
        }),
    },
    BodySpec {
        name: "Sol",
        radius: 500.0,
        gravity_strength: 3_000_000.0,
        has_gravity: true,
        position: DVec2::new(6000.0, -4500.0),
        orbit: None,
    },
    BodySpec {
        name: "Ares",
        radius: 130.0,
        gravity_strength: 18_000.0,
        has_gravity: true,
        position: DVec2::ZERO,
        orbit: Some(OrbitSpec {
            parent: "Sol",
            radius: 2600.0,
            angular_speed: 0.008,
            phase: 2.0,
            tilt: 0.35,
        }),
    },
    BodySpec {
        name: "Jove",
        radius: 220.0,
        gravity_strength: 140_000.0,
        has_gravity: true,
        position: DVec2::ZERO,
        orbit: Some(OrbitSpec {
            parent: "Sol",
            radius: 4200.0,
            angular_speed: 0.004,
            phase: 4.2,
            tilt: 0.35,
        }),
    },
    BodySpec {
        name: "Kronos",
        radius: 190.0,
        gravity_strength: 90_000.0,
        has_gravity: true,
        position: DVec2::ZERO,
        orbit: Some(OrbitSpec {
            parent: "Sol",
            radius: 5600.0,
            angular_speed: 0.0025,
            phase: 1.1,
            tilt: 0.35,
        }),
    },
];

/// Name of the primary planet in the default configuration.
pub const PRIMARY_NAME: &str = "Terra";

/// Build the default system. The configuration is static and known good,
/// so failure here is a programming error.
pub fn default_system() -> SolarSystem {
    SolarSystem::from_specs(DEFAULT_BODIES, PRIMARY_NAME)
        .expect("default body configuration must be valid")
}
