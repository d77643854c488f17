//! Moonhopper - 2D Orbital Flight Sandbox
//!
//! A desktop application: launch from the home planet, slingshot around
//! the system, and try to put the ship down in one piece.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use moonhopper::bodies::default_system;
use moonhopper::camera::CameraPlugin;
use moonhopper::input::InputPlugin;
use moonhopper::physics::PhysicsPlugin;
use moonhopper::prediction::PredictionPlugin;
use moonhopper::render::RenderPlugin;
use moonhopper::spacecraft::Spacecraft;
use moonhopper::ui::UiPlugin;

fn main() {
    let system = default_system();
    let craft = Spacecraft::spawn(&system);

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(system)
        .insert_resource(craft)
        // Add simulation plugins
        .add_plugins((
            PhysicsPlugin,
            PredictionPlugin,
            CameraPlugin,
            InputPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();
}
