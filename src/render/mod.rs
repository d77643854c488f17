//! Rendering systems.
//!
//! Everything is drawn with gizmo lines: body surfaces and orbit guides,
//! the spacecraft, the predicted trajectory, and the flight history trail.
//! Rendering reads simulation state and never writes it.

pub mod bodies;
pub mod craft;
pub mod trajectory;

use bevy::prelude::*;

use self::bodies::{draw_bodies, draw_orbit_guides, OrbitGuideSettings};
use self::craft::draw_spacecraft;
use self::trajectory::{draw_flight_history, draw_predicted_path};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitGuideSettings>().add_systems(
            Update,
            (
                draw_orbit_guides,
                draw_flight_history,
                draw_predicted_path,
                draw_bodies,
                draw_spacecraft,
            ),
        );
    }
}

/// Z-layer constants for rendering order.
pub mod z_layers {
    /// Orbit guide ellipses and the flight history trail.
    pub const GUIDES: f32 = 0.0;
    /// Trajectory prediction line.
    pub const TRAJECTORY: f32 = 1.0;
    /// Body surfaces.
    pub const CELESTIAL: f32 = 2.0;
    /// The spacecraft.
    pub const SPACECRAFT: f32 = 3.0;
}
