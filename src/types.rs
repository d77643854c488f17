//! Core simulation types and constants.
//!
//! Physics positions are f64 (`DVec2`) in abstract world units, using a
//! screen-style frame: y grows downward, so "up" away from the primary
//! planet's top is the −y direction. The render layer flips the axis.

use bevy::prelude::*;

/// Maximum delta-time accepted by one physics step (seconds).
///
/// The explicit Euler integrator is only conditionally stable; frame-time
/// spikes (window dragging, debugger pauses) must not translate into huge
/// integration steps.
pub const MAX_STEP_DT: f64 = 0.1;

/// Distance below which a body contributes no gravity (world units).
/// Keeps the inverse-square law finite near a body's center.
pub const MIN_GRAVITY_DISTANCE: f64 = 1.0;

/// Half-height of the spacecraft (world units). A landed craft sits at
/// `body.radius + CRAFT_HALF_HEIGHT` from the body center.
pub const CRAFT_HALF_HEIGHT: f64 = 8.0;

/// Steady-state thrust acceleration along the nose (world units/s²).
pub const THRUST_ACCEL: f64 = 4.0;

/// Rotation rate while a rotate intent is held (rad/s).
pub const ROTATION_RATE: f64 = 2.5;

/// Initial speed imparted along the nose on launch (world units/s).
pub const LAUNCH_SPEED: f64 = 2.0;

/// Fuel capacity. Fuel is only replenished by a full reset.
pub const MAX_FUEL: f64 = 200.0;

/// Fuel consumed per second of thrust.
pub const FUEL_CONSUMPTION_RATE: f64 = 10.0;

/// Maximum touchdown speed that still counts as a landing (world units/s).
pub const SAFE_LANDING_SPEED: f64 = 1.0;

/// Maximum deviation between the nose and the surface-relative heading
/// that still counts as a landing (radians).
pub const SAFE_LANDING_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Tolerance around the primary's top within which the landing radial is
/// snapped to exactly −π/2 (radians). Prevents floating-point creep from
/// sliding a parked craft sideways at the canonical spawn point.
pub const TOP_SNAP_TOLERANCE: f64 = 0.1;

/// Orbit-completion tracking only runs while the craft is further than
/// this multiple of the primary's radius from its center.
pub const ORBIT_GUARD_FACTOR: f64 = 1.5;

/// Maximum number of retained flight-path points.
pub const PATH_CAPACITY: usize = 1000;

/// Simulation clock resource.
///
/// `current` is seconds of simulated time since session start (or last
/// reset). `scale` multiplies wall-clock delta into simulated delta.
#[derive(Resource, Clone, Debug)]
pub struct SimulationTime {
    /// Simulated seconds elapsed.
    pub current: f64,
    /// Time scale multiplier (1.0 = real time).
    pub scale: f64,
    /// Whether simulation is paused.
    pub paused: bool,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            current: 0.0,
            scale: 1.0,
            paused: false,
        }
    }
}

impl SimulationTime {
    /// Reset the clock to the start of a session.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.paused = false;
    }

    /// Clamp a raw frame delta into a safe integration step.
    pub fn clamp_step(dt: f64) -> f64 {
        dt.clamp(0.0, MAX_STEP_DT)
    }
}

/// Normalize an angle into (−π, π].
///
/// Craft headings are stored unwrapped; comparisons go through this.
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_wrap_angle_identity_in_range() {
        assert_relative_eq!(wrap_angle(0.0), 0.0);
        assert_relative_eq!(wrap_angle(1.0), 1.0);
        assert_relative_eq!(wrap_angle(-1.0), -1.0);
    }

    #[test]
    fn test_wrap_angle_full_turns() {
        assert_relative_eq!(wrap_angle(2.0 * PI + 0.25), 0.25, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(-6.0 * PI - FRAC_PI_2), -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_angle_pi_boundary() {
        // π maps to π, just over π wraps negative
        assert_relative_eq!(wrap_angle(PI), PI);
        assert!(wrap_angle(PI + 0.01) < 0.0);
    }

    #[test]
    fn test_clamp_step_bounds() {
        assert_eq!(SimulationTime::clamp_step(0.016), 0.016);
        assert_eq!(SimulationTime::clamp_step(5.0), MAX_STEP_DT);
        assert_eq!(SimulationTime::clamp_step(-1.0), 0.0);
    }

    #[test]
    fn test_reset_zeroes_clock() {
        let mut time = SimulationTime {
            current: 123.4,
            scale: 4.0,
            paused: true,
        };
        time.reset();
        assert_eq!(time.current, 0.0);
        assert!(!time.paused);
        // Scale is a user preference and survives reset
        assert_eq!(time.scale, 4.0);
    }
}
