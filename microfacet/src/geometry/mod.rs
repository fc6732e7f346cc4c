//! Geometry

#[cfg(test)]
#[macro_export]
macro_rules! prop_range {
    ($name: ident, $t: ty, $r: expr) => {
        prop_compose! {
            fn $name()(f in $r) -> $t {
                f
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

/// Generates unit directions in the local shading frame from spherical angles
/// θ in `$theta` and Ø in [0, 2π).
#[cfg(test)]
#[macro_export]
macro_rules! prop_direction {
    ($name: ident, $theta: expr) => {
        prop_compose! {
            fn $name()(theta in $theta, phi in 0.0..$crate::math::TWO_PI) -> $crate::geometry::Vector3f {
                $crate::geometry::spherical_direction(
                    $crate::math::sin(theta),
                    $crate::math::cos(theta),
                    phi,
                )
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point2 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr) -> Point2<$t> {
                Point2 { x, y }
            }
        }
    };
}

mod common;
mod point2;
mod util;
mod vector3;

// Re-export
pub use common::*;
pub use point2::*;
pub use util::*;
pub use vector3::*;
