//! Net gravitational acceleration on a point from the active bodies.
//!
//! The simulation uses a per-body gravity strength scalar rather than
//! Newtonian G·m products: acceleration toward a body at distance r is
//! simply strength/r². The same accumulation runs in the live tick and in
//! trajectory prediction; any divergence between the two would make the
//! displayed trajectory visibly wrong.

use bevy::math::DVec2;

use crate::types::MIN_GRAVITY_DISTANCE;

/// A gravity source: (world position, gravity strength).
pub type GravitySource = (DVec2, f64);

/// Accumulate gravitational acceleration at `pos` from all sources.
///
/// Sources closer than [`MIN_GRAVITY_DISTANCE`] contribute nothing; a craft
/// exactly at a body's center is physically meaningless but must not take
/// the simulation down with a division by zero.
#[inline]
pub fn compute_acceleration(pos: DVec2, sources: &[GravitySource]) -> DVec2 {
    let mut acc = DVec2::ZERO;

    for &(body_pos, strength) in sources {
        let delta = body_pos - pos;
        let r_squared = delta.length_squared();

        if r_squared > MIN_GRAVITY_DISTANCE * MIN_GRAVITY_DISTANCE {
            let r = r_squared.sqrt();
            // a = strength/r² along the unit vector delta/r
            acc += delta * (strength / (r_squared * r));
        }
    }

    acc
}
