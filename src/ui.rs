//! egui-based flight HUD.
//!
//! A status panel in the top-left corner with fuel, speed, altitude, and
//! the orbit counter, plus an outcome banner after touchdown or a crash.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::bodies::SolarSystem;
use crate::spacecraft::{FlightMode, OrbitTracker, ResetEvent, Spacecraft};
use crate::types::{SimulationTime, CRAFT_HALF_HEIGHT, MAX_FUEL};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, (hud_system, banner_system));
    }
}

/// Altitude above the nearest body's surface, from the craft's base.
fn altitude(craft: &Spacecraft, system: &SolarSystem) -> (f64, &'static str) {
    let mut best = f64::INFINITY;
    let mut name = "";
    for body in system.iter() {
        let alt = (craft.position - body.position).length() - body.radius - CRAFT_HALF_HEIGHT;
        if alt < best {
            best = alt;
            name = body.name;
        }
    }
    (best.max(0.0), name)
}

/// Render the flight status panel.
fn hud_system(
    mut contexts: EguiContexts,
    craft: Res<Spacecraft>,
    system: Res<SolarSystem>,
    tracker: Res<OrbitTracker>,
    sim_time: Res<SimulationTime>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Flight")
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            let mode = match craft.mode {
                FlightMode::Landed => match craft.on_body {
                    Some(i) => format!("Landed on {}", system.get(i).name),
                    None => "Landed".to_string(),
                },
                FlightMode::Flying => "Flying".to_string(),
                FlightMode::Crashed => "Crashed".to_string(),
            };
            ui.label(egui::RichText::new(mode).strong());

            let fuel_frac = (craft.fuel / MAX_FUEL) as f32;
            ui.add(
                egui::ProgressBar::new(fuel_frac)
                    .text(format!("Fuel {:.0} / {:.0}", craft.fuel, MAX_FUEL)),
            );

            ui.label(format!("Speed: {:.2} u/s", craft.velocity.length()));
            let (alt, near) = altitude(&craft, &system);
            ui.label(format!("Altitude: {alt:.0} ({near})"));
            ui.label(format!("Orbits: {}", tracker.orbits_completed));

            ui.separator();
            ui.label(format!(
                "t = {:.0} s   {}x{}",
                sim_time.current,
                sim_time.scale,
                if sim_time.paused { "   paused" } else { "" }
            ));
            ui.label(
                egui::RichText::new(
                    "W/Up thrust  A/D rotate  Space pause\nTab focus  [ ] speed  R reset",
                )
                .weak()
                .small(),
            );
        });
}

/// Render the outcome banner after the flight ends.
fn banner_system(
    mut contexts: EguiContexts,
    craft: Res<Spacecraft>,
    system: Res<SolarSystem>,
    tracker: Res<OrbitTracker>,
    mut reset_events: MessageWriter<ResetEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let (title, detail, color) = match craft.mode {
        FlightMode::Crashed => {
            let detail = match craft.crash_reason {
                Some(reason) => format!("Lost: {reason}"),
                None => "Lost".to_string(),
            };
            ("CRASHED", detail, egui::Color32::from_rgb(224, 85, 85))
        }
        // Suppress the banner while still parked on the launch pad
        FlightMode::Landed if tracker.orbits_completed > 0 || craft.fuel < MAX_FUEL => {
            let site = craft
                .on_body
                .map(|i| system.get(i).name)
                .unwrap_or("the surface");
            (
                "TOUCHDOWN",
                format!("Safe on {site}, {} orbit(s) flown", tracker.orbits_completed),
                egui::Color32::from_rgb(85, 176, 85),
            )
        }
        _ => return,
    };

    egui::Window::new("Outcome")
        .title_bar(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 24.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(title).color(color).heading());
                ui.label(detail);
                if ui.button("Fly again (R)").clicked() {
                    reset_events.write(ResetEvent);
                }
            });
        });
}
