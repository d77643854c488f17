//! Keyboard input handling.
//!
//! Flight keys are held-state and feed `ControlIntent`, which the fixed
//! physics tick reads; everything else (pause, reset, time scale, zoom,
//! focus cycling) acts on the frame the key goes down.

use bevy::prelude::*;

use crate::bodies::SolarSystem;
use crate::camera::{CameraFocus, MainCamera, MAX_ZOOM, MIN_ZOOM, ZOOM_SPEED};
use crate::spacecraft::{ControlIntent, ResetEvent};
use crate::types::SimulationTime;

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (flight_controls, keyboard_shortcuts));
    }
}

/// Sample the held flight keys into the control intent.
///
/// Up/W is the main engine, Left/A and Right/D rotate. On the pad, thrust
/// doubles as the launch command.
fn flight_controls(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<ControlIntent>) {
    intent.set_thrust(keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW));
    intent.set_rotate_left(keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA));
    intent.set_rotate_right(keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD));
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    system: Res<SolarSystem>,
    mut sim_time: ResMut<SimulationTime>,
    mut focus: ResMut<CameraFocus>,
    mut camera_query: Query<&mut Projection, With<MainCamera>>,
    mut reset_events: MessageWriter<ResetEvent>,
) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        sim_time.paused = !sim_time.paused;
        info!(
            "Simulation {}",
            if sim_time.paused { "paused" } else { "running" }
        );
    }

    // Time controls: [ and ] to adjust simulation speed
    if keys.just_pressed(KeyCode::BracketLeft) {
        sim_time.scale = (sim_time.scale * 0.5).max(0.125);
        info!("Time scale: {}x", sim_time.scale);
    }

    if keys.just_pressed(KeyCode::BracketRight) {
        sim_time.scale = (sim_time.scale * 2.0).min(16.0);
        info!("Time scale: {}x", sim_time.scale);
    }

    // Tab: cycle camera focus through ship and bodies
    if keys.just_pressed(KeyCode::Tab) {
        focus.cycle(system.len());
    }

    // R: reset the flight
    if keys.just_pressed(KeyCode::KeyR) {
        reset_events.write(ResetEvent);
    }

    // Handle zoom with keyboard
    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ref mut ortho) = *projection else {
        return;
    };

    // Plus/Equal: zoom in (reduce scale)
    if keys.pressed(KeyCode::Equal) || keys.pressed(KeyCode::NumpadAdd) {
        let zoom_factor = 1.0 - ZOOM_SPEED;
        ortho.scale = (ortho.scale * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    // Minus: zoom out (increase scale)
    if keys.pressed(KeyCode::Minus) || keys.pressed(KeyCode::NumpadSubtract) {
        let zoom_factor = 1.0 + ZOOM_SPEED;
        ortho.scale = (ortho.scale * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}
