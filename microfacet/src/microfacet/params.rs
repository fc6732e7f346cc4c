//! Microfacet Distribution Parameters

use super::*;
use crate::error::*;
use std::fmt;
use std::str::FromStr;

/// Microfacet distribution families.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MicrofacetDistributionType {
    /// Beckmann-Spizzichino distribution.
    Beckmann,

    /// Trowbridge-Reitz (GGX) distribution.
    TrowbridgeReitz,
}

impl FromStr for MicrofacetDistributionType {
    type Err = Error;

    /// Parses a distribution name. Matching is case-insensitive.
    ///
    /// * `s` - The name.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beckmann" => Ok(Self::Beckmann),
            "trowbridgereitz" | "trowbridge-reitz" | "ggx" => Ok(Self::TrowbridgeReitz),
            _ => {
                warn!("Unknown microfacet distribution '{}'", s);
                Err(Error::UnknownDistribution(s.to_string()))
            }
        }
    }
}

impl fmt::Display for MicrofacetDistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beckmann => write!(f, "beckmann"),
            Self::TrowbridgeReitz => write!(f, "trowbridgereitz"),
        }
    }
}

/// Parameters used to create a microfacet distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MicrofacetParams {
    /// The distribution family.
    pub distribution: MicrofacetDistributionType,

    /// Microfacet roughness in the u direction.
    pub u_roughness: Float,

    /// Microfacet roughness in the v direction.
    pub v_roughness: Float,

    /// If true, roughness values are expected to be in the range [0,1], and
    /// are remapped to alpha values that range from near-perfect-specular at 0
    /// to very rough at 1. Otherwise the roughness values are used directly
    /// as alpha.
    pub remap_roughness: bool,

    /// Indicates whether or not the visible area is sampled or not.
    pub sample_visible_area: bool,
}

impl Default for MicrofacetParams {
    fn default() -> Self {
        Self {
            distribution: MicrofacetDistributionType::TrowbridgeReitz,
            u_roughness: 0.5,
            v_roughness: 0.5,
            remap_roughness: true,
            sample_visible_area: true,
        }
    }
}

/// Creates a shareable microfacet distribution from parameters.
///
/// * `params` - The parameters.
pub fn create_microfacet_distribution(params: &MicrofacetParams) -> Result<ArcMicrofacetDistribution> {
    let mut urough = params.u_roughness;
    let mut vrough = params.v_roughness;

    match params.distribution {
        MicrofacetDistributionType::Beckmann => {
            if params.remap_roughness {
                urough = BeckmannDistribution::roughness_to_alpha(urough);
                vrough = BeckmannDistribution::roughness_to_alpha(vrough);
            }
            let distrib = BeckmannDistribution::new(urough, vrough, params.sample_visible_area)?;
            Ok(Arc::new(distrib))
        }
        MicrofacetDistributionType::TrowbridgeReitz => {
            if params.remap_roughness {
                urough = TrowbridgeReitzDistribution::roughness_to_alpha(urough);
                vrough = TrowbridgeReitzDistribution::roughness_to_alpha(vrough);
            }
            let distrib = TrowbridgeReitzDistribution::new(urough, vrough, params.sample_visible_area)?;
            Ok(Arc::new(distrib))
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
