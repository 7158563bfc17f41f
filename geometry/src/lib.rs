//! Geometry primitives for normalized screen space.
//!
//! Coordinates are fractions of the screen's width and height: `x` grows to the right and `y`
//! grows downward. Values slightly outside `0.0..=1.0` are expected from noisy sources and are not
//! treated as errors.

mod point;
mod unit_interval;

pub use point::*;
pub use unit_interval::*;
