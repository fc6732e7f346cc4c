//! Local shading frame helpers
//!
//! Directions are expressed in a local frame where the z-axis is the
//! macro-surface normal. θ is measured from +z and Ø from +x after projecting
//! onto the xy plane.

mod common;

// Re-export
pub use common::*;
