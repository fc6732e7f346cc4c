//! Beckmann–Spizzichino Distribution

use super::*;
use crate::error::*;
use std::fmt;

/// Maximum number of CDF evaluations used when inverting the visible slope
/// distribution.
const MAX_SLOPE_ITERATIONS: usize = 10;

/// Absolute tolerance on the CDF residual when inverting the visible slope
/// distribution.
const SLOPE_TOLERANCE: Float = 1e-5;

/// Implements the Beckmann–Spizzichino distribution which based on Gaussian
/// distribution of microfacet slopes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BeckmannDistribution {
    /// Indicates whether or not the visible area is sampled or not.
    sample_visible_area: bool,

    /// For microfacets oriented perpendicular to the x-axis and where
    /// α = sqrt(2) * σ and σ is the RMS slope of microfacets.
    alpha_x: Float,

    /// For microfacets oriented perpendicular to the y-axis and where
    /// α = sqrt(2) * σ and σ is the RMS slope of microfacets.
    alpha_y: Float,
}

impl BeckmannDistribution {
    /// Create a new `BeckmannDistribution`. Fails if either alpha is not a
    /// finite positive value.
    ///
    /// * `alpha_x`             - For microfacets oriented perpendicular to the
    ///                           x-axis and where α = sqrt(2) * σ and σ is the
    ///                           RMS slope of microfacets.
    /// * `alpha_y`             - For microfacets oriented perpendicular to the
    ///                           y-axis and where α = sqrt(2) * σ and σ is the
    ///                           RMS slope of microfacets.
    /// * `sample_visible_area` - Indicates whether or not the visible area is
    ///                           sampled or not.
    pub fn new(alpha_x: Float, alpha_y: Float, sample_visible_area: bool) -> Result<Self> {
        let alpha_x = check_roughness("alpha_x", alpha_x)?;
        let alpha_y = check_roughness("alpha_y", alpha_y)?;
        Ok(Self {
            sample_visible_area,
            alpha_x: floor_alpha("alpha_x", alpha_x),
            alpha_y: floor_alpha("alpha_y", alpha_y),
        })
    }

    /// Maps scalar roughness parameter in [0, 1] to alpha values where
    /// values close to 0 are near-perfect specular reflection.
    ///
    /// * `roughness` - Roughness parameter value.
    pub fn roughness_to_alpha(roughness: Float) -> Float {
        roughness_to_alpha(roughness)
    }

    /// Returns the roughness along the x-axis.
    pub fn alpha_x(&self) -> Float {
        self.alpha_x
    }

    /// Returns the roughness along the y-axis.
    pub fn alpha_y(&self) -> Float {
        self.alpha_y
    }

    /// Returns `true` if the roughness is the same along both axes.
    pub fn is_isotropic(&self) -> bool {
        self.alpha_x == self.alpha_y
    }
}

impl MicrofacetDistribution for BeckmannDistribution {
    /// Returns whether or not the visible area is sampled or not.
    fn sample_visible_area(&self) -> bool {
        self.sample_visible_area
    }

    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    #[rustfmt::skip]
    fn d(&self, wh: &Vector3f) -> Float {
        let tan2_theta = tan_2_theta(wh);
        if tan2_theta.is_infinite() {
            0.0
        } else {
            let cos4_theta = cos_2_theta(wh) * cos_2_theta(wh);
            (-tan2_theta * (cos_2_phi(wh) / (self.alpha_x * self.alpha_x) +
                            sin_2_phi(wh) / (self.alpha_y * self.alpha_y))
            ).exp() /
            (PI * self.alpha_x * self.alpha_y * cos4_theta)
        }
    }

    /// Returns the invisible masked microfacet area per visible microfacet area
    /// using the rational fit to the Beckmann masking integral.
    ///
    /// * `w` - The direction from camera/viewer.
    #[rustfmt::skip]
    fn lambda(&self, w: &Vector3f) -> Float {
        let abs_tan_theta = abs(tan_theta(w));
        if abs_tan_theta.is_infinite() {
            0.0
        } else {
            // Compute _alpha_ for direction `w`.
            let alpha = (cos_2_phi(w) * self.alpha_x * self.alpha_x +
                         sin_2_phi(w) * self.alpha_y * self.alpha_y).sqrt();
            let a = 1.0 / (alpha * abs_tan_theta);
            if a >= 1.6 {
                0.0
            } else {
                (1.0 - 1.259 * a + 0.0396 * a * a) / (3.535 * a + 2.181 * a * a)
            }
        }
    }

    /// Returns a sample from the distribution of normal vectors.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        if self.sample_visible_area {
            sample_visible_wh(wo, self.alpha_x, self.alpha_y, u, beckmann_sample_11)
        } else {
            // Compute tan^2(theta) and phi for Beckmann distribution sample.
            let log_sample = (1.0 - u[0]).ln();
            debug_assert!(log_sample.is_finite());

            let (tan2_theta, phi) = if self.is_isotropic() {
                (-self.alpha_x * self.alpha_x * log_sample, u[1] * TWO_PI)
            } else {
                let (phi, inv_alpha2) = sample_anisotropic_phi(self.alpha_x, self.alpha_y, u[1]);
                (-log_sample / inv_alpha2, phi)
            };

            half_vector_from_angles(wo, tan2_theta, phi)
        }
    }
}

impl fmt::Display for BeckmannDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ BeckmannDistribution alpha_x: {} alpha_y: {} sample_visible_area: {} ]",
            self.alpha_x, self.alpha_y, self.sample_visible_area
        )
    }
}

/// Outcome of numerically inverting the CDF of visible x-slopes.
#[derive(Copy, Clone, Debug)]
struct SlopeInversion {
    /// Solution in the erf() domain; erf_inv(b) is the slope.
    b: Float,

    /// Number of CDF evaluations performed.
    iterations: usize,

    /// Whether the CDF residual dropped below `SLOPE_TOLERANCE`.
    converged: bool,
}

/// Inverts the CDF of the x-slopes visible from a direction at angle θ to the
/// normal of a unit roughness Beckmann surface using Newton-Raphson steps
/// guarded by bisection.
///
/// * `cos_theta_i` - Cosine of the angle θ measured from the incident direction
///                   to the z-axis.
/// * `u1`          - The uniform random value.
fn invert_slope_x_cdf(cos_theta_i: Float, u1: Float) -> SlopeInversion {
    let sin_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();
    let tan_theta_i = sin_theta_i / cos_theta_i;
    let cot_theta_i = 1.0 / tan_theta_i;

    // Search interval -- everything is parameterized in the erf() domain.
    let mut a = -1.0;
    let mut c = erf(cot_theta_i);
    let sample_x = max(u1, 1e-6);

    // Initial guess from the inverse of a fitted approximation of the CDF.
    let theta_i = acos(cos_theta_i);
    let fit = 1.0 + theta_i * (-0.876 + theta_i * (0.4265 - 0.0594 * theta_i));
    let mut b = c - (1.0 + c) * (1.0 - sample_x).powf(fit);

    // Normalization factor for the CDF.
    let inv_sqrt_pi = 1.0 / PI.sqrt();
    let normalization =
        1.0 / (1.0 + c + inv_sqrt_pi * tan_theta_i * (-cot_theta_i * cot_theta_i).exp());

    let mut iterations = 0;
    let mut converged = false;
    while iterations < MAX_SLOPE_ITERATIONS {
        iterations += 1;

        // Bisection criterion; also catches NaNs.
        if !(b >= a && b <= c) {
            b = 0.5 * (a + c);
        }

        // Evaluate the CDF and its derivative (i.e. the density function).
        let inv_erf = erf_inv(b);
        let value = normalization
            * (1.0 + b + inv_sqrt_pi * tan_theta_i * (-inv_erf * inv_erf).exp())
            - sample_x;
        let derivative = normalization * (1.0 - inv_erf * tan_theta_i);

        if abs(value) < SLOPE_TOLERANCE {
            converged = true;
            break;
        }

        // Update bisection intervals.
        if value > 0.0 {
            c = b;
        } else {
            a = b;
        }

        b -= value / derivative;
    }

    if !converged && !(b >= a && b <= c) {
        b = 0.5 * (a + c);
    }

    SlopeInversion {
        b,
        iterations,
        converged,
    }
}

/// Samples slopes visible from a direction at angle θ to the normal of a unit
/// roughness Beckmann surface.
///
/// * `cos_theta_i` - Cosine of the angle θ measured from the incident direction
///                   to the z-axis.
/// * `u1`          - The uniform random value.
/// * `u2`          - The uniform random value.
fn beckmann_sample_11(cos_theta_i: Float, u1: Float, u2: Float) -> (Float, Float) {
    // Special case (normal incidence).
    if cos_theta_i > 0.9999 {
        let r = (-(1.0 - u1).ln()).sqrt();
        let sin_phi = sin(TWO_PI * u2);
        let cos_phi = cos(TWO_PI * u2);
        return (r * cos_phi, r * sin_phi);
    }

    let inversion = invert_slope_x_cdf(cos_theta_i, u1);
    if !inversion.converged {
        debug!(
            "Slope inversion did not converge after {} iterations for cos_theta = {}, u1 = {}",
            inversion.iterations, cos_theta_i, u1
        );
    }

    // Convert the solution in the erf() domain back into a slope value.
    let slope_x = erf_inv(inversion.b);

    // Simulate Y component.
    let slope_y = erf_inv(2.0 * max(u2, 1e-6) - 1.0);

    debug_assert!(slope_x.is_finite());
    debug_assert!(slope_y.is_finite());

    (slope_x, slope_y)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
