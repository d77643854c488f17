//! Moonhopper - 2D Orbital Flight Sandbox
//!
//! A library crate providing the flight simulation components for testing
//! and integration purposes.

pub mod bodies;
pub mod camera;
pub mod input;
pub mod physics;
pub mod prediction;
pub mod render;
pub mod spacecraft;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
