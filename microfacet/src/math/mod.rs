//! Scalar math: float type, constants and special functions

mod clamp;
mod common;

// Re-export
pub use clamp::*;
pub use common::*;
