//! Utility functions.

use super::Vector3f;
use crate::math::*;

/// Returns a direction (x, y, z) for spherical coordinates (θ, Ø) in the local
/// shading frame where +z is the macro-surface normal.
///
/// * `sin_theta` - sin(θ).
/// * `cos_theta` - cos(θ).
/// * `phi`       - Ø.
#[inline]
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    Vector3f::new(sin_theta * cos(phi), sin_theta * sin(phi), cos_theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn spherical_direction_axes() {
        let z = spherical_direction(0.0, 1.0, 0.0);
        assert_eq!(z, Vector3f::new(0.0, 0.0, 1.0));

        let y = spherical_direction(1.0, 0.0, PI_OVER_TWO);
        assert!(approx_eq!(Float, y.x, 0.0, epsilon = 1e-6));
        assert!(approx_eq!(Float, y.y, 1.0, epsilon = 1e-6));
        assert_eq!(y.z, 0.0);
    }

    #[test]
    fn spherical_direction_is_unit_length() {
        let theta: Float = 0.7;
        let w = spherical_direction(sin(theta), cos(theta), 2.1);
        assert!(approx_eq!(Float, w.length(), 1.0, epsilon = 1e-6));
    }
}
