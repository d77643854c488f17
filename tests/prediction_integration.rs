//! Prediction versus live flight agreement.

mod common;

use bevy::math::DVec2;
use common::{flying_craft, live_tick, planet_with_moon, single_planet, DT};
use moonhopper::prediction::predict;
use moonhopper::spacecraft::{ControlIntent, FlightEvent};

#[test]
fn test_prediction_matches_live_coasting_flight() {
    let system = planet_with_moon();
    let pos = DVec2::new(0.0, -900.0);
    let vel = DVec2::new(9.0, 0.0);

    let path = predict(pos, vel, &system, 0.0, 300, DT);
    assert_eq!(path.points.len(), 300);

    let mut live_system = planet_with_moon();
    let mut craft = flying_craft(&live_system, pos, vel);
    let idle = ControlIntent::default();
    let mut sim_time = 0.0;

    for (i, predicted) in path.points.iter().enumerate() {
        let event = live_tick(&mut craft, &idle, &mut live_system, &mut sim_time);
        assert_eq!(event, None);
        let error = (craft.position - *predicted).length();
        assert!(error < 1e-9, "step {i}: live and predicted differ by {error}");
    }
}

#[test]
fn test_prediction_forecasts_the_impact() {
    let system = single_planet();
    let pos = DVec2::new(0.0, -400.0);
    let vel = DVec2::new(0.0, 20.0);

    let path = predict(pos, vel, &system, 0.0, 4000, DT);
    assert!(path.ends_in_collision);
    assert_eq!(path.collision_body, Some(0));

    // The live flight ends on exactly the predicted tick
    let mut live_system = single_planet();
    let mut craft = flying_craft(&live_system, pos, vel);
    let idle = ControlIntent::default();
    let mut sim_time = 0.0;

    let mut ticks = 0;
    let mut outcome = None;
    while outcome.is_none() && ticks < 4000 {
        outcome = live_tick(&mut craft, &idle, &mut live_system, &mut sim_time);
        ticks += 1;
    }

    assert!(matches!(outcome, Some(FlightEvent::Crashed { .. })));
    assert_eq!(ticks, path.points.len());

    // Contact snapping moves the craft less than a hull height from the
    // final predicted sample
    let last = *path.points.last().unwrap();
    assert!((craft.position - last).length() < 20.0);
}

#[test]
fn test_prediction_horizon_is_a_prefix() {
    // A shorter horizon is exactly the prefix of a longer one
    let system = planet_with_moon();
    let pos = DVec2::new(300.0, -700.0);
    let vel = DVec2::new(6.0, -3.0);

    let short = predict(pos, vel, &system, 0.0, 50, DT);
    let long = predict(pos, vel, &system, 0.0, 300, DT);

    assert_eq!(short.points.as_slice(), &long.points[..50]);
}
