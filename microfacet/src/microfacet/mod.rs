//! Microfacet Distribution Models

use crate::geometry::*;
use crate::math::*;
use crate::reflection::*;
use std::sync::Arc;

mod beckmann;
mod params;
mod trowbridge_reitz;

// Re-exports
pub use beckmann::*;
pub use params::*;
pub use trowbridge_reitz::*;

/// Smallest alpha used by the distributions. Positive values below this are
/// raised to it to keep the NDF finite.
pub const MIN_ALPHA: Float = 0.001;

/// Smallest cos(θ) of the stretched direction passed to the slope samplers.
/// Grazing directions are sampled as if slightly above the horizon.
const MIN_SAMPLE_COS_THETA: Float = 1e-4;

/// Interface for microfacet distribution models.
///
/// All methods take directions in the local shading frame where the z-axis is
/// the macro-surface normal. Implementations hold no mutable state so a single
/// instance can be shared between threads.
pub trait MicrofacetDistribution {
    /// Returns whether or not the visible area is sampled or not.
    fn sample_visible_area(&self) -> bool;

    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn d(&self, wh: &Vector3f) -> Float;

    /// Returns the invisible masked microfacet area per visible microfacet area.
    ///
    /// * `w` - The direction from camera/viewer.
    fn lambda(&self, w: &Vector3f) -> Float;

    /// Evaluates Smith's masking-shadowing function which gives the fraction of
    /// microfacets that are visible from a given direction.
    ///
    /// * `w` - The direction from camera/viewer.
    fn g1(&self, w: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(w))
    }

    /// Returns the fraction of microfacets in a differential area that are
    /// visible from both directions `wo` and `wi`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn g(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(wo) + self.lambda(wi))
    }

    /// Returns a sample from the distribution of normal vectors. When sampling
    /// the visible area, the result follows the distribution of normals
    /// visible from `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f;

    /// Evaluates the PDF for the given outgoing direction and sampled surface
    /// normal.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn pdf(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        if self.sample_visible_area() {
            let cos_theta_o = abs_cos_theta(wo);
            if cos_theta_o == 0.0 {
                return 0.0;
            }
            self.d(wh) * self.g1(wo) * wo.abs_dot(wh) / cos_theta_o
        } else {
            self.d(wh) * abs_cos_theta(wh)
        }
    }
}

/// Atomic reference counted `MicrofacetDistribution`.
pub type ArcMicrofacetDistribution = Arc<dyn MicrofacetDistribution + Send + Sync>;

/// Samples the distribution of visible normals by stretching the outgoing
/// direction into the configuration of an isotropic distribution with unit
/// roughness, sampling slopes there and transforming them back.
///
/// * `wi`        - Outgoing direction in the upper hemisphere.
/// * `alpha_x`   - Roughness along the x-axis.
/// * `alpha_y`   - Roughness along the y-axis.
/// * `u1`        - The uniform random value.
/// * `u2`        - The uniform random value.
/// * `sample_11` - Samples the slopes of the unit roughness distribution given
///                 cos(θ) of the stretched direction and `u1`, `u2`.
pub(crate) fn sample_visible_normal<F>(
    wi: &Vector3f,
    alpha_x: Float,
    alpha_y: Float,
    u1: Float,
    u2: Float,
    sample_11: F,
) -> Vector3f
where
    F: Fn(Float, Float, Float) -> (Float, Float),
{
    // 1. Stretch wi.
    let wi_stretched = Vector3f::new(alpha_x * wi.x, alpha_y * wi.y, wi.z).normalize();

    // 2. Simulate P22_{wi}(x_slope, y_slope, 1, 1).
    let cos_theta_i = max(cos_theta(&wi_stretched), MIN_SAMPLE_COS_THETA);
    let (mut slope_x, mut slope_y) = sample_11(cos_theta_i, u1, u2);

    // 3. Rotate.
    let cos_phi_i = cos_phi(&wi_stretched);
    let sin_phi_i = sin_phi(&wi_stretched);
    let tmp = cos_phi_i * slope_x - sin_phi_i * slope_y;
    slope_y = sin_phi_i * slope_x + cos_phi_i * slope_y;
    slope_x = tmp;

    // 4. Unstretch.
    slope_x *= alpha_x;
    slope_y *= alpha_y;

    // 5. Compute normal.
    Vector3f::new(-slope_x, -slope_y, 1.0).normalize()
}

/// Visible area sampling for directions in either hemisphere. Directions below
/// the surface are mirrored before sampling and the half-vector is mirrored
/// back so it lies in the same hemisphere as `wo`.
///
/// * `wo`        - Outgoing direction.
/// * `alpha_x`   - Roughness along the x-axis.
/// * `alpha_y`   - Roughness along the y-axis.
/// * `u`         - The 2D uniform random values.
/// * `sample_11` - Samples the slopes of the unit roughness distribution.
pub(crate) fn sample_visible_wh<F>(
    wo: &Vector3f,
    alpha_x: Float,
    alpha_y: Float,
    u: &Point2f,
    sample_11: F,
) -> Vector3f
where
    F: Fn(Float, Float, Float) -> (Float, Float),
{
    let flip = wo.z < 0.0;
    let wo_upper = if flip { -(*wo) } else { *wo };
    let wh = sample_visible_normal(&wo_upper, alpha_x, alpha_y, u[0], u[1], sample_11);
    if flip {
        -wh
    } else {
        wh
    }
}

/// Samples the azimuth Ø of an anisotropic distribution of normals and
/// returns it along with `cos²Ø/αx² + sin²Ø/αy²` for that azimuth.
///
/// * `alpha_x` - Roughness along the x-axis.
/// * `alpha_y` - Roughness along the y-axis.
/// * `u`       - The uniform random value.
pub(crate) fn sample_anisotropic_phi(alpha_x: Float, alpha_y: Float, u: Float) -> (Float, Float) {
    let mut phi = atan(alpha_y / alpha_x * tan(TWO_PI * u + PI_OVER_TWO));
    if u > 0.5 {
        phi += PI;
    }
    let sin_phi = sin(phi);
    let cos_phi = cos(phi);
    let inv_alpha2 = cos_phi * cos_phi / (alpha_x * alpha_x) + sin_phi * sin_phi / (alpha_y * alpha_y);
    (phi, inv_alpha2)
}

/// Maps a sampled elevation and azimuth to a half-vector in the hemisphere of
/// `wo`.
///
/// * `wo`         - Outgoing direction.
/// * `tan2_theta` - Sampled tan²(θ).
/// * `phi`        - Sampled azimuth Ø.
pub(crate) fn half_vector_from_angles(wo: &Vector3f, tan2_theta: Float, phi: Float) -> Vector3f {
    let cos_theta = 1.0 / (1.0 + tan2_theta).sqrt();
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let wh = spherical_direction(sin_theta, cos_theta, phi);
    if !same_hemisphere(wo, &wh) {
        -wh
    } else {
        wh
    }
}

/// Applies the numerical floor to a validated roughness value.
///
/// * `axis`  - Name of the parameter.
/// * `alpha` - The alpha value.
pub(crate) fn floor_alpha(axis: &str, alpha: Float) -> Float {
    if alpha < MIN_ALPHA {
        debug!("Raising {} = {} to {}", axis, alpha, MIN_ALPHA);
        MIN_ALPHA
    } else {
        alpha
    }
}

/// Maps scalar roughness parameter in [0, 1] to alpha values where values
/// close to 0 are near-perfect specular reflection.
///
/// * `roughness` - Roughness parameter value.
pub(crate) fn roughness_to_alpha(roughness: Float) -> Float {
    let roughness = max(roughness, 1e-3);
    let x = roughness.ln();
    1.62142 + 0.819955 * x + 0.1734 * x * x + 0.0171201 * x * x * x + 0.000640711 * x * x * x * x
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    /// Both families with a mix of isotropic and anisotropic roughness.
    pub(crate) fn distributions(sample_visible_area: bool) -> Vec<ArcMicrofacetDistribution> {
        let mut result: Vec<ArcMicrofacetDistribution> = vec![];
        for (ax, ay) in [(0.1, 0.1), (0.5, 0.5), (0.3, 0.8), (1.0, 0.2)] {
            result.push(Arc::new(
                BeckmannDistribution::new(ax, ay, sample_visible_area).unwrap(),
            ));
            result.push(Arc::new(
                TrowbridgeReitzDistribution::new(ax, ay, sample_visible_area).unwrap(),
            ));
        }
        result
    }

    /// Stratified samples over [0, 1)^2.
    pub(crate) fn stratified(n: usize) -> Vec<Point2f> {
        let mut samples = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                samples.push(Point2f::new(
                    (i as Float + 0.5) / n as Float,
                    (j as Float + 0.5) / n as Float,
                ));
            }
        }
        samples
    }

    #[test]
    fn grazing_half_vector_has_no_density_or_masking() {
        let _ = env_logger::builder().is_test(true).try_init();

        for dist in distributions(true) {
            for w in [
                Vector3f::new(1.0, 0.0, 0.0),
                Vector3f::new(0.0, 1.0, 0.0),
                Vector3f::new(0.6, -0.8, 0.0),
            ] {
                assert_eq!(dist.d(&w), 0.0);
                assert_eq!(dist.lambda(&w), 0.0);
                assert_eq!(dist.g1(&w), 1.0);
            }
        }
    }

    #[test]
    fn pdf_is_zero_for_grazing_outgoing_direction() {
        let wo = Vector3f::new(1.0, 0.0, 0.0);
        let wh = Vector3f::new(0.0, 0.0, 1.0);
        for dist in distributions(true) {
            assert_eq!(dist.pdf(&wo, &wh), 0.0);
        }
    }

    #[test]
    fn pdf_uses_full_distribution_when_not_sampling_visible_area() {
        let wo = Vector3f::new(0.3, 0.4, 0.866).normalize();
        let wh = Vector3f::new(0.1, -0.2, 0.97).normalize();
        for dist in distributions(false) {
            let expected = dist.d(&wh) * abs_cos_theta(&wh);
            assert!(approx_eq!(Float, dist.pdf(&wo, &wh), expected, ulps = 2));
        }
    }

    #[test]
    fn pdf_uses_visible_normals_when_sampling_visible_area() {
        let wo = Vector3f::new(0.3, 0.4, 0.866).normalize();
        let wh = Vector3f::new(0.1, -0.2, 0.97).normalize();
        for dist in distributions(true) {
            let expected = dist.d(&wh) * dist.g1(&wo) * wo.abs_dot(&wh) / abs_cos_theta(&wo);
            assert!(approx_eq!(Float, dist.pdf(&wo, &wh), expected, ulps = 2));
        }
    }

    #[test]
    fn visible_samples_are_unit_and_follow_wo_hemisphere() {
        let wos = [
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(0.5, 0.5, 0.7071).normalize(),
            Vector3f::new(-0.9, 0.1, 0.2).normalize(),
            Vector3f::new(0.3, -0.2, -0.9).normalize(),
        ];
        for dist in distributions(true) {
            for wo in wos.iter() {
                for u in stratified(16) {
                    let wh = dist.sample_wh(wo, &u);
                    assert!(!wh.has_nans());
                    assert!(approx_eq!(Float, wh.length(), 1.0, epsilon = 1e-4));
                    assert!(same_hemisphere(wo, &wh), "wo = {:?}, wh = {:?}", wo, wh);
                }
            }
        }
    }

    #[test]
    fn grazing_outgoing_direction_gives_unit_samples() {
        let _ = env_logger::builder().is_test(true).try_init();

        let wos = [Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.6, 0.8, 0.0)];
        for dist in distributions(true) {
            for wo in wos.iter() {
                for u in stratified(8) {
                    let wh = dist.sample_wh(wo, &u);
                    assert!(!wh.has_nans(), "wo = {:?}, u = {:?}", wo, u);
                    assert!(approx_eq!(Float, wh.length(), 1.0, epsilon = 1e-4));
                    assert!(wh.z >= 0.0);
                }
            }
        }
    }

    #[test]
    fn full_distribution_samples_follow_wo_hemisphere() {
        let wos = [
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(0.3, -0.2, -0.9).normalize(),
        ];
        for dist in distributions(false) {
            for wo in wos.iter() {
                for u in stratified(16) {
                    let wh = dist.sample_wh(wo, &u);
                    assert!(!wh.has_nans());
                    assert!(approx_eq!(Float, wh.length(), 1.0, epsilon = 1e-4));
                    assert!(wh.z == 0.0 || same_hemisphere(wo, &wh));
                }
            }
        }
    }

    #[test]
    fn normal_incidence_samples_cluster_around_normal() {
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let samples = stratified(32);
        let alphas = [0.05, 0.2, 0.5, 0.9];

        let spread = |dist: &dyn MicrofacetDistribution| -> (Vector3f, Float) {
            let mut mean = Vector3f::zero();
            let mut total = 0.0;
            for u in samples.iter() {
                let wh = dist.sample_wh(&wo, u);
                mean = mean + wh;
                total += 1.0 - wh.z;
            }
            let n = samples.len() as Float;
            (mean / n, total / n)
        };

        let mut last_beckmann = 0.0;
        let mut last_trowbridge_reitz = 0.0;
        for alpha in alphas {
            let beckmann = BeckmannDistribution::new(alpha, alpha, true).unwrap();
            let trowbridge_reitz = TrowbridgeReitzDistribution::new(alpha, alpha, true).unwrap();

            for (dist, last) in [
                (&beckmann as &dyn MicrofacetDistribution, &mut last_beckmann),
                (&trowbridge_reitz as &dyn MicrofacetDistribution, &mut last_trowbridge_reitz),
            ] {
                let (mean, s) = spread(dist);
                assert!(mean.x.abs() < 0.05 && mean.y.abs() < 0.05, "mean = {:?}", mean);
                assert!(mean.z > 0.0);
                assert!(s > *last, "spread {} <= {} at alpha {}", s, *last, alpha);
                *last = s;
            }
        }
    }

    #[test]
    fn shared_across_threads() {
        let dist: ArcMicrofacetDistribution =
            Arc::new(BeckmannDistribution::new(0.3, 0.6, true).unwrap());
        let wo = Vector3f::new(0.2, 0.3, 0.9).normalize();
        let expected: Vec<Vector3f> = stratified(4).iter().map(|u| dist.sample_wh(&wo, u)).collect();

        std::thread::scope(|s| {
            for _ in 0..4 {
                let dist = Arc::clone(&dist);
                let expected = &expected;
                s.spawn(move || {
                    for (u, e) in stratified(4).iter().zip(expected.iter()) {
                        assert_eq!(dist.sample_wh(&wo, u), *e);
                    }
                });
            }
        });
    }

    #[test]
    fn roughness_to_alpha_is_monotonic() {
        let mut last = roughness_to_alpha(0.0);
        assert!(last > 0.0);
        for i in 1..=10 {
            let alpha = roughness_to_alpha(i as Float / 10.0);
            assert!(alpha > last);
            last = alpha;
        }
        assert!(approx_eq!(Float, roughness_to_alpha(1.0), 1.62142, ulps = 2));
    }

    #[test]
    fn floor_alpha_raises_tiny_values() {
        assert_eq!(floor_alpha("alpha_x", 1e-6), MIN_ALPHA);
        assert_eq!(floor_alpha("alpha_x", 0.25), 0.25);
    }

    crate::prop_direction!(upper_direction, 0.0..1.55 as Float);
    crate::prop_direction!(any_direction, 0.0..PI);

    proptest! {
        #[test]
        fn smith_terms_derive_from_lambda(wo in any_direction(), wi in any_direction()) {
            for dist in distributions(true) {
                prop_assert_eq!(dist.g1(&wo), 1.0 / (1.0 + dist.lambda(&wo)));
                prop_assert_eq!(
                    dist.g(&wo, &wi),
                    1.0 / (1.0 + dist.lambda(&wo) + dist.lambda(&wi))
                );
            }
        }

        #[test]
        fn d_is_non_negative_and_finite(wh in upper_direction()) {
            for dist in distributions(true) {
                let d = dist.d(&wh);
                prop_assert!(d >= 0.0 && d.is_finite(), "D({:?}) = {}", wh, d);
            }
        }

        #[test]
        fn pdf_is_non_negative(wo in upper_direction(), wh in upper_direction()) {
            for dist in distributions(false) {
                prop_assert!(dist.pdf(&wo, &wh) >= 0.0);
            }
        }
    }
}
