//! Errors

use crate::math::Float;

/// Errors raised while configuring microfacet distributions.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("Invalid roughness {value} for '{axis}'; expected a finite value > 0")]
    InvalidRoughness { axis: &'static str, value: Float },

    #[error("Unknown microfacet distribution '{0}'")]
    UnknownDistribution(String),
}

/// Result type for fallible microfacet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Validates a roughness/alpha value, returning it unchanged if it is finite
/// and strictly positive.
///
/// * `axis`  - Name of the parameter being validated.
/// * `value` - The value.
pub(crate) fn check_roughness(axis: &'static str, value: Float) -> Result<Float> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidRoughness { axis, value })
    }
}
