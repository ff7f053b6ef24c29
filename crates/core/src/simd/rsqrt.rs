//! Reciprocal square root estimators used to seed `normalize`.
//!
//! An estimator produces a low-precision `1/sqrt(d)` per lane. The caller
//! then applies exactly one Newton-Raphson step ([`refine`]), which roughly
//! squares the relative error. Iterating further is never done here: the
//! single step is the precision/throughput trade-off `normalize` is built on.
//!
//! | Estimator | Source | Estimate error | After one step |
//! |---|---|---|---|
//! | [`HardwareRsqrt`] | `rsqrtps` | `<= 1.5 * 2^-12` | about `2^-22` |
//! | [`SoftwareRsqrt`] | `1.0 / x.sqrt()` | about `2^-23` | rounding only |

use super::{native, Register};

/// A per-lane `1/sqrt(d)` approximation with a known minimum precision.
pub trait RsqrtEstimate {
    /// The estimate's relative error is below `2^-PRECISION_BITS` for
    /// finite, positive, normal inputs.
    const PRECISION_BITS: i32;

    /// Estimate `1/sqrt(d)` in every lane.
    fn estimate(d: Register) -> Register;
}

/// The `rsqrtps` instruction.
#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse",
    not(feature = "portable")
))]
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareRsqrt;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse",
    not(feature = "portable")
))]
impl RsqrtEstimate for HardwareRsqrt {
    const PRECISION_BITS: i32 = 11;

    #[inline(always)]
    fn estimate(d: Register) -> Register {
        native::rsqrt_estimate(d)
    }
}

/// Portable fallback seeded from the standard `1.0 / sqrt(x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareRsqrt;

impl RsqrtEstimate for SoftwareRsqrt {
    const PRECISION_BITS: i32 = 22;

    #[inline(always)]
    fn estimate(d: Register) -> Register {
        native::from_array(native::to_array(d).map(|lane| 1.0 / lane.sqrt()))
    }
}

/// The estimator `normalize` uses on this build.
#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse",
    not(feature = "portable")
))]
pub type NativeRsqrt = HardwareRsqrt;

/// The estimator `normalize` uses on this build.
#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse",
    not(feature = "portable")
)))]
pub type NativeRsqrt = SoftwareRsqrt;

/// One Newton-Raphson step: `1.5*r0 + (d*-0.5)*r0*(r0*r0)`.
///
/// The grouping of the products is fixed so every backend rounds the same way.
#[inline(always)]
pub fn refine(d: Register, r0: Register) -> Register {
    native::add(
        native::mul(native::splat(1.5), r0),
        native::mul(
            native::mul(native::mul(d, native::splat(-0.5)), r0),
            native::mul(r0, r0),
        ),
    )
}

/// Relative error bound of `1/sqrt(d)` after [`refine`] with estimator `E`.
///
/// A seed with relative error `e` leaves `1.5 * e^2` after one step; a few
/// ulps are added for the rounding of the step itself.
pub fn refined_error_bound<E: RsqrtEstimate>() -> f32 {
    let e = 2.0f32.powi(-E::PRECISION_BITS);
    1.5 * e * e + 4.0 * f32::EPSILON
}
