//! Spacecraft rendering.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::camera::physics_to_render;
use crate::render::z_layers;
use crate::spacecraft::{FlightMode, Spacecraft};
use crate::types::CRAFT_HALF_HEIGHT;

/// Half-width of the rendered hull, physics units.
const CRAFT_HALF_WIDTH: f64 = 4.5;

fn to_layer(pos: DVec2) -> Vec3 {
    let render = physics_to_render(pos);
    Vec3::new(render.x, render.y, z_layers::SPACECRAFT)
}

/// Draw the craft as a triangle pointing along its nose, with an exhaust
/// flame while the engine burns. A crashed craft is drawn as a cross on
/// the impact point.
pub fn draw_spacecraft(mut gizmos: Gizmos, craft: Res<Spacecraft>) {
    if craft.mode == FlightMode::Crashed {
        let arm = CRAFT_HALF_HEIGHT;
        let color = Color::srgb(0.9, 0.25, 0.2);
        let p = craft.position;
        gizmos.line(
            to_layer(p + DVec2::new(-arm, -arm)),
            to_layer(p + DVec2::new(arm, arm)),
            color,
        );
        gizmos.line(
            to_layer(p + DVec2::new(-arm, arm)),
            to_layer(p + DVec2::new(arm, -arm)),
            color,
        );
        return;
    }

    let nose_dir = craft.nose_direction();
    let perp = nose_dir.perp();

    let nose = craft.position + nose_dir * CRAFT_HALF_HEIGHT;
    let left = craft.position - nose_dir * CRAFT_HALF_HEIGHT + perp * CRAFT_HALF_WIDTH;
    let right = craft.position - nose_dir * CRAFT_HALF_HEIGHT - perp * CRAFT_HALF_WIDTH;

    let color = Color::srgb(0.9, 0.9, 0.95);
    gizmos.line(to_layer(nose), to_layer(left), color);
    gizmos.line(to_layer(left), to_layer(right), color);
    gizmos.line(to_layer(right), to_layer(nose), color);

    if craft.thrusting {
        let flame_base = craft.position - nose_dir * CRAFT_HALF_HEIGHT;
        let flame_tip = flame_base - nose_dir * CRAFT_HALF_HEIGHT;
        gizmos.line(
            to_layer(flame_base),
            to_layer(flame_tip),
            Color::srgb(1.0, 0.6, 0.15),
        );
    }
}
