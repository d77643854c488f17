//! Trajectory and flight history rendering.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::camera::physics_to_render;
use crate::prediction::TrajectoryPath;
use crate::render::z_layers;
use crate::spacecraft::OrbitTracker;

fn at_layer(pos: DVec2, z: f32) -> Vec3 {
    let render = physics_to_render(pos);
    Vec3::new(render.x, render.y, z)
}

/// Draw the predicted path, fading toward its far end. A path that ends on
/// a surface is tinted red so an incoming impact reads at a glance.
pub fn draw_predicted_path(mut gizmos: Gizmos, path: Res<TrajectoryPath>) {
    let n = path.points.len();
    if n < 2 {
        return;
    }

    let base = if path.ends_in_collision {
        Color::srgb(0.95, 0.35, 0.25)
    } else {
        Color::srgb(0.35, 0.85, 0.45)
    };

    for (i, pair) in path.points.windows(2).enumerate() {
        let alpha = 0.8 * (1.0 - i as f32 / n as f32) + 0.1;
        gizmos.line(
            at_layer(pair[0], z_layers::TRAJECTORY),
            at_layer(pair[1], z_layers::TRAJECTORY),
            base.with_alpha(alpha),
        );
    }
}

/// Draw the trail of recent positions around the home planet.
pub fn draw_flight_history(mut gizmos: Gizmos, tracker: Res<OrbitTracker>) {
    let color = Color::srgba(0.6, 0.6, 0.9, 0.3);
    let mut prev: Option<DVec2> = None;

    for &point in tracker.path() {
        if let Some(p0) = prev {
            gizmos.line(
                at_layer(p0, z_layers::GUIDES),
                at_layer(point, z_layers::GUIDES),
                color,
            );
        }
        prev = Some(point);
    }
}
