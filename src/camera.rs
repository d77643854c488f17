//! Camera for viewing the flight.
//!
//! Provides zoom, pan, and a focus target (ship or any body) the view
//! glides toward. Also owns the physics-to-render coordinate conversion.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    math::DVec2,
    prelude::*,
    camera::ScalingMode,
};

use crate::bodies::SolarSystem;
use crate::spacecraft::Spacecraft;

/// Render scale: 1 physics unit = 0.1 render units. Keeps the outermost
/// planet within comfortable f32 coordinates.
pub const RENDER_SCALE: f64 = 0.1;

/// Minimum zoom level (closest zoom, launch-pad close-up).
pub const MIN_ZOOM: f32 = 0.01;

/// Maximum zoom level (furthest zoom, whole system).
pub const MAX_ZOOM: f32 = 20.0;

/// Default zoom level, framing the home planet and its moon.
pub const DEFAULT_ZOOM: f32 = 0.5;

/// Initial viewport height in render units at scale=1.0.
pub const VIEWPORT_HEIGHT: f32 = 500.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Pan speed multiplier.
pub const PAN_SPEED: f32 = 1.0;

/// How quickly the camera glides to its focus target, per second.
pub const FOCUS_SMOOTHING: f32 = 4.0;

/// Convert a physics position to render coordinates.
///
/// Physics uses a screen-style frame with y growing downward; render space
/// is y-up, so the conversion flips y.
pub fn physics_to_render(pos: DVec2) -> Vec2 {
    Vec2::new(
        (pos.x * RENDER_SCALE) as f32,
        (-pos.y * RENDER_SCALE) as f32,
    )
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// What the camera keeps in frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// Follow the spacecraft.
    #[default]
    Ship,
    /// Follow a body by index.
    Body(usize),
}

/// Resource selecting the camera's focus target.
#[derive(Resource, Default)]
pub struct CameraFocus {
    pub target: FocusTarget,
}

impl CameraFocus {
    /// Focus by name: `"ship"` (case-insensitive) or a body's name.
    /// Unknown names leave the current target unchanged.
    pub fn focus_on(&mut self, system: &SolarSystem, name: &str) {
        if name.eq_ignore_ascii_case("ship") {
            self.target = FocusTarget::Ship;
        } else if let Some(index) = system.find(name) {
            self.target = FocusTarget::Body(index);
        }
    }

    /// Step to the next target: ship, then each body in order, then back.
    pub fn cycle(&mut self, body_count: usize) {
        self.target = match self.target {
            FocusTarget::Ship if body_count > 0 => FocusTarget::Body(0),
            FocusTarget::Ship => FocusTarget::Ship,
            FocusTarget::Body(i) if i + 1 < body_count => FocusTarget::Body(i + 1),
            FocusTarget::Body(_) => FocusTarget::Ship,
        };
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFocus>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_pan, camera_follow));
    }
}

/// Spawn the main camera with orthographic projection.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: VIEWPORT_HEIGHT,
            },
            scale: DEFAULT_ZOOM,
            near: -10000.0,
            far: 10000.0,
            ..OrthographicProjection::default_3d()
        }),
        Transform::from_xyz(0.0, 0.0, 1000.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut camera_query: Query<&mut Projection, With<MainCamera>>,
) {
    if mouse_scroll.delta.y == 0.0 {
        return;
    }

    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ref mut ortho) = *projection else {
        return;
    };

    // Logarithmic zoom: multiply scale by factor based on scroll direction
    let zoom_factor = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;
    ortho.scale = (ortho.scale * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
}

/// Handle middle mouse button drag for panning.
fn camera_pan(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut camera_query: Query<(&mut Transform, &Projection), With<MainCamera>>,
) {
    if !mouse_buttons.pressed(MouseButton::Middle) {
        return;
    }

    let Ok((mut transform, projection)) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ortho) = projection else {
        return;
    };

    // Screen motion is in pixels; scale by current zoom level
    let scale_factor = ortho.scale * PAN_SPEED;
    let delta = mouse_motion.delta * scale_factor;

    transform.translation.x -= delta.x;
    transform.translation.y += delta.y; // Invert Y for natural feel
}

/// Glide the camera toward whatever it is focused on.
fn camera_follow(
    time: Res<Time>,
    focus: Res<CameraFocus>,
    craft: Res<Spacecraft>,
    system: Res<SolarSystem>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let target = match focus.target {
        FocusTarget::Ship => craft.position,
        FocusTarget::Body(i) if i < system.len() => system.get(i).position,
        FocusTarget::Body(_) => craft.position,
    };
    let target = physics_to_render(target);

    let alpha = (FOCUS_SMOOTHING * time.delta_secs()).min(1.0);
    transform.translation.x += (target.x - transform.translation.x) * alpha;
    transform.translation.y += (target.y - transform.translation.y) * alpha;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_to_render_flips_y() {
        let above = physics_to_render(DVec2::new(100.0, -200.0));
        assert_eq!(above, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_focus_cycle_walks_ship_then_bodies() {
        let mut focus = CameraFocus::default();
        focus.cycle(2);
        assert_eq!(focus.target, FocusTarget::Body(0));
        focus.cycle(2);
        assert_eq!(focus.target, FocusTarget::Body(1));
        focus.cycle(2);
        assert_eq!(focus.target, FocusTarget::Ship);
    }

    #[test]
    fn test_focus_cycle_with_no_bodies() {
        let mut focus = CameraFocus::default();
        focus.cycle(0);
        assert_eq!(focus.target, FocusTarget::Ship);
    }

    #[test]
    fn test_focus_on_by_name() {
        let system = crate::test_utils::fixtures::planet_with_moon();
        let mut focus = CameraFocus::default();

        focus.focus_on(&system, "selene");
        assert_eq!(focus.target, FocusTarget::Body(1));

        // Unknown names do not disturb the current target
        focus.focus_on(&system, "Phantom");
        assert_eq!(focus.target, FocusTarget::Body(1));

        focus.focus_on(&system, "Ship");
        assert_eq!(focus.target, FocusTarget::Ship);
    }
}
