//! Property-based tests for the flight simulation using proptest.
//!
//! These verify invariants that must hold across a wide range of starting
//! conditions: fuel accounting, surface contact handling, and agreement
//! between the live integrator and trajectory prediction.

use bevy::math::DVec2;
use proptest::prelude::*;

use crate::bodies::SolarSystem;
use crate::physics::gravity::compute_acceleration;
use crate::prediction::predict;
use crate::spacecraft::{ControlIntent, FlightEvent, FlightMode, Spacecraft};
use crate::test_utils::fixtures;
use crate::types::{CRAFT_HALF_HEIGHT, MAX_FUEL};

const DT: f64 = 1.0 / 64.0;

/// Put a spawned craft into free flight at the given state.
fn flying_craft(system: &SolarSystem, pos: DVec2, vel: DVec2) -> Spacecraft {
    let mut craft = Spacecraft::spawn(system);
    craft.mode = FlightMode::Flying;
    craft.on_body = None;
    craft.position = pos;
    craft.velocity = vel;
    craft
}

/// Replicate the live tick ordering: advance time, move bodies, step craft.
fn live_tick(
    craft: &mut Spacecraft,
    intent: &ControlIntent,
    system: &mut SolarSystem,
    sim_time: &mut f64,
) -> Option<FlightEvent> {
    *sim_time += DT;
    system.advance_orbits(*sim_time);
    craft.step(DT, intent, system)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Fuel never increases and never leaves [0, MAX_FUEL], regardless of
    /// what the pilot does.
    #[test]
    fn prop_fuel_monotonic_and_bounded(
        inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..200),
        start_height in 400.0f64..2000.0,
        vx in -10.0f64..10.0,
    ) {
        let mut system = fixtures::single_planet();
        let mut craft = flying_craft(
            &system,
            DVec2::new(0.0, -start_height),
            DVec2::new(vx, 0.0),
        );
        let mut sim_time = 0.0;
        let mut last_fuel = craft.fuel;

        for (thrust, left, right) in inputs {
            let mut intent = ControlIntent::default();
            intent.set_thrust(thrust);
            intent.set_rotate_left(left);
            intent.set_rotate_right(right);

            live_tick(&mut craft, &intent, &mut system, &mut sim_time);

            prop_assert!(craft.fuel <= last_fuel, "fuel increased: {} -> {}", last_fuel, craft.fuel);
            prop_assert!(craft.fuel >= 0.0 && craft.fuel <= MAX_FUEL);
            last_fuel = craft.fuel;
        }
    }

    /// Acceleration stays finite everywhere, including inside bodies.
    #[test]
    fn prop_acceleration_finite(
        x in -8000.0f64..8000.0,
        y in -8000.0f64..8000.0,
        t in 0.0f64..10_000.0,
    ) {
        let system = fixtures::planet_with_moon();
        let acc = compute_acceleration(DVec2::new(x, y), &system.gravity_sources_at(t));
        prop_assert!(acc.x.is_finite() && acc.y.is_finite());
    }

    /// Any contact, survivable or not, ends exactly on the clearance circle
    /// with zero velocity, and a crashed craft never moves again.
    #[test]
    fn prop_contact_pins_craft_to_surface(
        radial in -std::f64::consts::PI..std::f64::consts::PI,
        speed in 0.05f64..6.0,
        extra_ticks in 1usize..50,
    ) {
        let mut system = fixtures::single_planet();
        let body = system.primary_body();
        let clearance = body.radius + CRAFT_HALF_HEIGHT;

        // Drop radially inward from just above the surface
        let dir = DVec2::from_angle(radial);
        let mut craft = flying_craft(
            &system,
            dir * (clearance + 2.0),
            -dir * speed,
        );
        let intent = ControlIntent::default();
        let mut sim_time = 0.0;

        let mut event = None;
        for _ in 0..2000 {
            event = live_tick(&mut craft, &intent, &mut system, &mut sim_time);
            if event.is_some() {
                break;
            }
        }
        prop_assert!(event.is_some(), "radial drop must reach the surface");
        prop_assert!(craft.mode != FlightMode::Flying);
        prop_assert_eq!(craft.velocity, DVec2::ZERO);
        prop_assert!((craft.position.length() - clearance).abs() < 1e-9);

        let frozen = craft.position;
        let frozen_mode = craft.mode;
        for _ in 0..extra_ticks {
            live_tick(&mut craft, &intent, &mut system, &mut sim_time);
        }
        if frozen_mode == FlightMode::Crashed {
            prop_assert_eq!(craft.position, frozen);
        } else {
            // A landed craft keeps riding the surface at the same radial
            prop_assert!((craft.position.length() - clearance).abs() < 1e-9);
        }
    }

    /// A craft parked on an orbiting moon stays glued to its surface as the
    /// moon moves.
    #[test]
    fn prop_landed_craft_rides_moving_body(
        ticks in 1usize..500,
    ) {
        let mut system = fixtures::planet_with_moon();
        let moon = system.find("Selene").unwrap();

        let mut craft = Spacecraft::spawn(&system);
        // Relocate onto the moon by dropping gently onto its top
        let top = system.get(moon).position + DVec2::new(0.0, -(system.get(moon).radius + CRAFT_HALF_HEIGHT + 1.0));
        craft.mode = FlightMode::Flying;
        craft.on_body = None;
        craft.position = top;
        craft.velocity = DVec2::new(0.0, 0.5);

        let intent = ControlIntent::default();
        let mut sim_time = 0.0;
        let mut landed = false;
        for _ in 0..2000 {
            if let Some(FlightEvent::Touchdown { body }) =
                live_tick(&mut craft, &intent, &mut system, &mut sim_time)
            {
                prop_assert_eq!(body, moon);
                landed = true;
                break;
            }
            prop_assert!(craft.mode != FlightMode::Crashed, "gentle drop must not crash");
        }
        prop_assert!(landed);

        for _ in 0..ticks {
            live_tick(&mut craft, &intent, &mut system, &mut sim_time);
            let rel = craft.position - system.get(moon).position;
            let clearance = system.get(moon).radius + CRAFT_HALF_HEIGHT;
            prop_assert!((rel.length() - clearance).abs() < 1e-6);
        }
    }

    /// Prediction and the live integrator agree step for step when the
    /// pilot keeps their hands off the controls.
    #[test]
    fn prop_prediction_matches_live_flight(
        start_height in 500.0f64..2000.0,
        vx in 2.0f64..25.0,
        steps in 10usize..300,
    ) {
        let system = fixtures::planet_with_moon();
        let pos = DVec2::new(0.0, -start_height);
        let vel = DVec2::new(vx, 0.0);

        let path = predict(pos, vel, &system, 0.0, steps, DT);

        let mut live_system = fixtures::planet_with_moon();
        let mut craft = flying_craft(&live_system, pos, vel);
        let intent = ControlIntent::default();
        let mut sim_time = 0.0;

        for (i, predicted) in path.points.iter().enumerate() {
            let event = live_tick(&mut craft, &intent, &mut live_system, &mut sim_time);
            let error = (craft.position - *predicted).length();
            prop_assert!(
                error < 1e-9,
                "live and predicted paths diverge at step {}: {}",
                i, error
            );
            if event.is_some() {
                prop_assert!(path.ends_in_collision);
                break;
            }
        }
    }
}
