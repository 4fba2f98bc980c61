// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations and numeric tolerances.

#![allow(missing_docs)]

/// Two points closer than this are treated as the same vertex.
pub const COINCIDENT_EPSILON: f64 = 1e-6;

/// Added inside the logarithms of the closed-form arc length so that a
/// nearly straight segment never takes the log of zero.
pub const ARCLEN_LOG_EPSILON: f64 = 1e-5;

/// Below this magnitude the second derivative of a quadratic is treated as
/// zero, and the arc length is the chord length.
pub const ARCLEN_FLAT_THRESHOLD: f64 = 1e-5;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident/$lfname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f32 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lfname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("trend-arrow requires either the `std` or `libm` feature")
            })+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("trend-arrow requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs/fabsf;
    fn ln(self) -> Self => log/logf;
    fn powf(self, n: Self) -> Self => pow/powf;
    fn sin_cos(self) -> (Self, Self) => sincos/sincosf;
    fn sqrt(self) -> Self => sqrt/sqrtf;
}

/// Clamp a smoothing coefficient into `(0, 1]`.
///
/// Non-positive and NaN values become [`MIN_SMOOTHNESS`](crate::MIN_SMOOTHNESS)
/// so the control-point solver stays well defined.
#[inline]
pub fn clamp_smoothness(k: f64) -> f64 {
    if k.is_nan() || k <= 0.0 {
        crate::MIN_SMOOTHNESS
    } else {
        k.min(1.0)
    }
}

/// Whether a width can be drawn: finite and positive.
#[inline]
pub fn is_drawable_width(width: f64) -> bool {
    width.is_finite() && width > 0.0
}
