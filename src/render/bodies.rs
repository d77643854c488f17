//! Body and orbit guide rendering using Bevy Gizmos.
//!
//! Body surfaces are drawn as closed polylines. Orbit guides are the
//! idealized paths the orbit parameters trace, flattened by the tilt
//! factor, so a body always sits exactly on its drawn guide.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::bodies::SolarSystem;
use crate::camera::physics_to_render;
use crate::render::z_layers;

/// Surface color per body. Unknown names get a neutral gray so test
/// systems still render.
fn body_color(name: &str) -> Color {
    match name {
        "Terra" => Color::srgb(0.2, 0.55, 0.85),
        "Luna" => Color::srgb(0.65, 0.65, 0.68),
        "Sol" => Color::srgb(1.0, 0.85, 0.3),
        "Ares" => Color::srgb(0.8, 0.4, 0.2),
        "Jove" => Color::srgb(0.8, 0.7, 0.55),
        "Kronos" => Color::srgb(0.9, 0.85, 0.6),
        _ => Color::srgb(0.6, 0.6, 0.6),
    }
}

/// Settings for orbit guide rendering.
#[derive(Resource)]
pub struct OrbitGuideSettings {
    /// Whether to show orbit guides.
    pub visible: bool,
    /// Number of segments for drawing each ellipse.
    pub segments: u32,
    /// Alpha value for guide color.
    pub alpha: f32,
    /// Dash pattern: draw N segments, then skip M segments, repeating.
    pub dash_on: u32,
    pub dash_off: u32,
}

impl Default for OrbitGuideSettings {
    fn default() -> Self {
        Self {
            visible: true,
            segments: 256,
            alpha: 0.25,
            dash_on: 2,
            dash_off: 3,
        }
    }
}

/// Draw each body's surface as a closed polyline.
pub fn draw_bodies(mut gizmos: Gizmos, system: Res<SolarSystem>) {
    const SEGMENTS: u32 = 96;

    for body in system.iter() {
        let color = body_color(body.name);
        let mut prev: Option<Vec3> = None;

        for i in 0..=SEGMENTS {
            let a = (i as f64 / SEGMENTS as f64) * std::f64::consts::TAU;
            let pt = body.position + DVec2::from_angle(a) * body.radius;
            let render = physics_to_render(pt);
            let pt = Vec3::new(render.x, render.y, z_layers::CELESTIAL);

            if let Some(p0) = prev {
                gizmos.line(p0, pt, color);
            }
            prev = Some(pt);
        }
    }
}

/// Draw the guide ellipse each orbiting body travels along.
///
/// The guide is centered on the parent's current position; since children
/// are laid out after parents in the draw loop's source data, the curve
/// tracks a moving parent without lag.
pub fn draw_orbit_guides(
    mut gizmos: Gizmos,
    settings: Res<OrbitGuideSettings>,
    system: Res<SolarSystem>,
) {
    if !settings.visible {
        return;
    }

    let segments = settings.segments.max(64);
    let on = settings.dash_on.max(1);
    let period = on + settings.dash_off;

    for body in system.iter() {
        let Some(orbit) = &body.orbit else {
            continue;
        };
        let parent = system.get(orbit.parent).position;
        let color = body_color(body.name).with_alpha(settings.alpha);
        let flatten = orbit.tilt.cos();

        let mut prev: Option<Vec3> = None;
        for i in 0..=segments {
            let a = (i as f64 / segments as f64) * std::f64::consts::TAU;
            let pt = parent + DVec2::new(a.cos(), a.sin() * flatten) * orbit.radius;
            let render = physics_to_render(pt);
            let pt = Vec3::new(render.x, render.y, z_layers::GUIDES);

            if let Some(p0) = prev {
                // Index-based dash pattern so the dashes don't crawl
                if i % period < on {
                    gizmos.line(p0, pt, color);
                }
            }
            prev = Some(pt);
        }
    }
}
