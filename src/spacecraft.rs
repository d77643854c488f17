//! Player spacecraft: flight-mode state machine, landing classification,
//! and orbit-completion tracking.
//!
//! The craft is the only dynamically integrated object in the simulation.
//! Celestial bodies follow their configured orbits; the craft accumulates
//! gravity from all of them, integrates with explicit Euler, and classifies
//! every surface contact as either a landing or a crash.
//!
//! Coordinate conventions (see `types`): y grows downward, the nose points
//! along `(sin θ, −cos θ)`, so θ=0 is "straight up" at the primary's top.

use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;
use std::fmt;

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::bodies::{default_system, SolarSystem};
use crate::physics::gravity::compute_acceleration;
use crate::prediction::PredictionState;
use crate::types::{
    wrap_angle, SimulationTime, CRAFT_HALF_HEIGHT, FUEL_CONSUMPTION_RATE, LAUNCH_SPEED, MAX_FUEL,
    ORBIT_GUARD_FACTOR, PATH_CAPACITY, ROTATION_RATE, SAFE_LANDING_ANGLE, SAFE_LANDING_SPEED,
    THRUST_ACCEL,
};

/// The craft's current phase of flight.
///
/// `Crashed` is terminal: no physics runs on a crashed craft and the only
/// way out is a full reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlightMode {
    /// Resting on a body's surface, riding along with it.
    #[default]
    Landed,
    /// Under integration: thrust, gravity, collision checks.
    Flying,
    /// Terminal. Frozen in place until reset.
    Crashed,
}

/// Why a surface contact was classified as a crash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrashReason {
    /// Contact speed at or above the safe-landing threshold.
    ImpactTooSevere,
    /// Nose too far from the surface normal at contact.
    AngleTooSteep,
}

impl fmt::Display for CrashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrashReason::ImpactTooSevere => write!(f, "impact too severe"),
            CrashReason::AngleTooSteep => write!(f, "landing angle too steep"),
        }
    }
}

/// State transition produced by one spacecraft step, forwarded as a Bevy
/// event so the UI can react without polling.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum FlightEvent {
    /// Landed → Flying.
    Launched,
    /// Flying → Landed on the given body index.
    Touchdown { body: usize },
    /// Flying → Crashed.
    Crashed { reason: CrashReason },
}

/// Player input intents, written by the input layer and consumed once per
/// physics tick. Plain flags: input and simulation share one thread.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct ControlIntent {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl ControlIntent {
    pub fn set_thrust(&mut self, on: bool) {
        self.thrust = on;
    }

    pub fn set_rotate_left(&mut self, on: bool) {
        self.rotate_left = on;
    }

    pub fn set_rotate_right(&mut self, on: bool) {
        self.rotate_right = on;
    }
}

/// The player vehicle.
#[derive(Resource, Clone, Debug)]
pub struct Spacecraft {
    /// World position (y-down frame).
    pub position: DVec2,
    /// World velocity.
    pub velocity: DVec2,
    /// Nose heading in radians; 0 = up (−y). Stored unwrapped.
    pub angle: f64,
    /// Remaining fuel, in [0, MAX_FUEL]. Non-increasing between resets.
    pub fuel: f64,
    /// Current phase of flight.
    pub mode: FlightMode,
    /// Index of the supporting body while `Landed`; never an owning handle.
    pub on_body: Option<usize>,
    /// Why the craft crashed, while `Crashed`.
    pub crash_reason: Option<CrashReason>,
    /// Whether thrust was actually applied last tick (for exhaust display).
    pub thrusting: bool,
    /// Radial angle of the landing site on `on_body`, fixed at touchdown.
    landing_radial: f64,
}

impl Spacecraft {
    /// Canonical spawn pose: parked on top of the primary planet, nose up,
    /// tanks full.
    pub fn spawn(system: &SolarSystem) -> Self {
        let primary = system.primary();
        let mut craft = Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            angle: 0.0,
            fuel: MAX_FUEL,
            mode: FlightMode::Landed,
            on_body: Some(primary),
            crash_reason: None,
            thrusting: false,
            landing_radial: -FRAC_PI_2,
        };
        craft.ride_support(system);
        craft
    }

    /// Unit vector along the nose: `(sin θ, −cos θ)`.
    pub fn nose_direction(&self) -> DVec2 {
        DVec2::new(self.angle.sin(), -self.angle.cos())
    }

    /// Advance the craft by one tick. `dt` must already be clamped.
    ///
    /// Crashed is terminal; calling this on a crashed craft is a no-op by
    /// design, the state machine does not trust its callers.
    pub fn step(
        &mut self,
        dt: f64,
        intent: &ControlIntent,
        system: &SolarSystem,
    ) -> Option<FlightEvent> {
        match self.mode {
            FlightMode::Crashed => None,
            FlightMode::Landed => self.step_landed(dt, intent, system),
            FlightMode::Flying => self.step_flying(dt, intent, system),
        }
    }

    /// Landed tick: ride the (possibly moving) support body, launch on
    /// thrust intent if there is fuel. Thrust with dry tanks is a no-op,
    /// not an error.
    fn step_landed(
        &mut self,
        dt: f64,
        intent: &ControlIntent,
        system: &SolarSystem,
    ) -> Option<FlightEvent> {
        self.ride_support(system);
        self.thrusting = false;

        if intent.thrust && self.fuel > 0.0 {
            self.mode = FlightMode::Flying;
            self.velocity = self.nose_direction() * LAUNCH_SPEED;
            self.on_body = None;
            // The launch tick is a full flying tick: thrust burns fuel and
            // the craft leaves the pad this frame, not next.
            self.step_flying(dt, intent, system);
            return Some(FlightEvent::Launched);
        }
        None
    }

    /// One integration tick while flying.
    fn step_flying(
        &mut self,
        dt: f64,
        intent: &ControlIntent,
        system: &SolarSystem,
    ) -> Option<FlightEvent> {
        // 1. Thrust along the nose, burning fuel. Fuel never goes negative.
        self.thrusting = intent.thrust && self.fuel > 0.0;
        if self.thrusting {
            self.velocity += self.nose_direction() * (THRUST_ACCEL * dt);
            self.fuel = (self.fuel - FUEL_CONSUMPTION_RATE * dt).max(0.0);
        }

        // 2. Rotation, unconstrained; headings wrap only when compared.
        if intent.rotate_left {
            self.angle -= ROTATION_RATE * dt;
        }
        if intent.rotate_right {
            self.angle += ROTATION_RATE * dt;
        }

        // 3-4. Gravity from every active body, then Euler integration.
        let acc = compute_acceleration(self.position, &system.gravity_sources());
        self.velocity += acc * dt;
        self.position += self.velocity * dt;

        // 5. Contact classification against the first penetrated surface.
        // Bodies never overlap, so at most one contact matters per tick.
        if let Some(body) = system.check_contact(self.position) {
            return Some(self.classify_contact(body, system));
        }
        None
    }

    /// Decide landing vs crash for a surface contact and apply the
    /// resulting transition.
    fn classify_contact(&mut self, body: usize, system: &SolarSystem) -> FlightEvent {
        let rel = self.position - system.get(body).position;
        let radial = rel.to_angle();
        let heading = landing_heading(radial);
        let speed = self.velocity.length();
        let angle_diff = wrap_angle(self.angle - heading).abs();

        if speed < SAFE_LANDING_SPEED && angle_diff < SAFE_LANDING_ANGLE {
            self.land(body, radial, system);
            FlightEvent::Touchdown { body }
        } else {
            let reason = if speed >= SAFE_LANDING_SPEED {
                CrashReason::ImpactTooSevere
            } else {
                CrashReason::AngleTooSteep
            };
            self.mode = FlightMode::Crashed;
            self.velocity = DVec2::ZERO;
            self.crash_reason = Some(reason);
            self.thrusting = false;
            FlightEvent::Crashed { reason }
        }
    }

    /// Touchdown: zero velocity, snap exactly onto the surface circle, and
    /// adopt the surface-relative heading. Radials within tolerance of the
    /// body's top snap to exactly −π/2 so the canonical parking spot never
    /// accumulates floating-point drift.
    fn land(&mut self, body: usize, radial: f64, system: &SolarSystem) {
        self.landing_radial = snap_top_radial(radial);
        self.mode = FlightMode::Landed;
        self.velocity = DVec2::ZERO;
        self.on_body = Some(body);
        self.thrusting = false;
        self.ride_support(system);
    }

    /// Re-derive pose from the support body's current position so a craft
    /// landed on an orbiting body moves with it.
    fn ride_support(&mut self, system: &SolarSystem) {
        let Some(body) = self.on_body else {
            return;
        };
        let b = system.get(body);
        self.position =
            b.position + DVec2::from_angle(self.landing_radial) * (b.radius + CRAFT_HALF_HEIGHT);
        self.angle = landing_heading(self.landing_radial);
    }
}

/// Nose heading that points straight out of the surface at the given
/// radial angle. At the top of a body (radial −π/2) this is exactly 0.
fn landing_heading(radial: f64) -> f64 {
    wrap_angle(radial + FRAC_PI_2)
}

/// Snap radials near a body's top to exactly −π/2.
fn snap_top_radial(radial: f64) -> f64 {
    if wrap_angle(radial + FRAC_PI_2).abs() < crate::types::TOP_SNAP_TOLERANCE {
        -FRAC_PI_2
    } else {
        radial
    }
}

/// Quadrant of a position relative to the primary planet, used by the
/// orbit-completion heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

/// Classify a primary-relative offset into a quadrant.
pub fn classify_quadrant(rel: DVec2) -> Quadrant {
    match (rel.x >= 0.0, rel.y < 0.0) {
        (true, true) => Quadrant::Q1,
        (false, true) => Quadrant::Q2,
        (false, false) => Quadrant::Q3,
        (true, false) => Quadrant::Q4,
    }
}

/// Orbit counter and recent flight path.
///
/// The counter uses the quadrant-transition heuristic: a Q4→Q1 transition
/// while clearly outside the primary's landing band counts as one completed
/// orbit. This is a deliberate cheap approximation, not a geometric orbit
/// detector; it can miscount highly eccentric trajectories.
///
/// The path is a bounded FIFO of recent positions for display; completing
/// an orbit clears it.
#[derive(Resource, Clone, Debug)]
pub struct OrbitTracker {
    pub orbits_completed: u32,
    last_quadrant: Option<Quadrant>,
    path: VecDeque<DVec2>,
}

impl Default for OrbitTracker {
    fn default() -> Self {
        Self {
            orbits_completed: 0,
            last_quadrant: None,
            path: VecDeque::with_capacity(PATH_CAPACITY),
        }
    }
}

impl OrbitTracker {
    /// Record one tick's worth of tracking. Call only while the craft is
    /// flying; a parked craft accumulates neither path nor orbits.
    pub fn record(&mut self, craft_pos: DVec2, primary_pos: DVec2, primary_radius: f64) {
        if self.path.len() == PATH_CAPACITY {
            self.path.pop_front();
        }
        self.path.push_back(craft_pos);

        let rel = craft_pos - primary_pos;
        // Ignore quadrant churn inside the landing band near the surface.
        if rel.length() <= primary_radius * ORBIT_GUARD_FACTOR {
            return;
        }

        let quadrant = classify_quadrant(rel);
        if self.last_quadrant == Some(Quadrant::Q4) && quadrant == Quadrant::Q1 {
            self.orbits_completed += 1;
            self.path.clear();
            info!("Orbit {} completed", self.orbits_completed);
        }
        self.last_quadrant = Some(quadrant);
    }

    /// Recent path points, oldest first.
    pub fn path(&self) -> impl Iterator<Item = &DVec2> {
        self.path.iter()
    }

    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    pub fn reset(&mut self) {
        self.orbits_completed = 0;
        self.last_quadrant = None;
        self.path.clear();
    }
}

/// Event requesting a full simulation reset: fresh bodies, fresh craft,
/// clock back to zero. The only way out of `Crashed`.
#[derive(Message)]
pub struct ResetEvent;

/// Rebuild the whole simulation from static configuration.
///
/// Reconstruction from constants makes reset deterministic: two resets
/// with no ticks in between produce bit-identical state.
pub fn handle_reset(
    mut reset_events: MessageReader<ResetEvent>,
    mut system: ResMut<SolarSystem>,
    mut craft: ResMut<Spacecraft>,
    mut tracker: ResMut<OrbitTracker>,
    mut sim_time: ResMut<SimulationTime>,
    mut intent: ResMut<ControlIntent>,
    mut prediction: ResMut<PredictionState>,
) {
    if reset_events.read().next().is_none() {
        return;
    }
    reset_events.clear();

    info!("Resetting simulation");

    *system = default_system();
    sim_time.reset();
    system.advance_orbits(sim_time.current);
    *craft = Spacecraft::spawn(&system);
    tracker.reset();
    *intent = ControlIntent::default();
    prediction.mark_dirty();
}
