//! Microfacet distributions

#[macro_use]
extern crate log;

pub mod error;
pub mod geometry;
pub mod math;
pub mod microfacet;
pub mod reflection;

// Re-export
pub use error::*;
