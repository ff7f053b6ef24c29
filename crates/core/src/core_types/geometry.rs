//! Free functions over [`Vec3Packed`]: lane-wise min/max, length and the
//! estimate-plus-one-refinement normalization.

use super::Vec3Packed;
use crate::simd::native;
use crate::simd::rsqrt::{self, NativeRsqrt, RsqrtEstimate};

/// Lane-wise minimum of all four lanes.
///
/// NaN handling is unspecified beyond matching the hardware `minps`
/// instruction: each lane is `a < b ? a : b`, so a NaN in either operand
/// yields the lane from `b`.
#[inline(always)]
pub fn min(a: Vec3Packed, b: Vec3Packed) -> Vec3Packed {
    Vec3Packed::from_packed(native::min(a.packed(), b.packed()))
}

/// Lane-wise maximum of all four lanes (`a > b ? a : b`, see [`min`]).
#[inline(always)]
pub fn max(a: Vec3Packed, b: Vec3Packed) -> Vec3Packed {
    Vec3Packed::from_packed(native::max(a.packed(), b.packed()))
}

/// `a · a` over `x, y, z`.
#[inline(always)]
pub fn length_squared(a: Vec3Packed) -> f32 {
    a * a
}

/// Euclidean length over `x, y, z`. NaN lanes propagate.
#[inline(always)]
pub fn length(a: Vec3Packed) -> f32 {
    (a * a).sqrt()
}

/// Distance between two points, `w` ignored.
#[inline(always)]
pub fn distance(a: Vec3Packed, b: Vec3Packed) -> f32 {
    length(a - b)
}

/// Scale `a` to unit length using the build's native rsqrt estimate.
///
/// See [`normalize_with`] for the algorithm and its edge cases.
#[inline(always)]
pub fn normalize(a: Vec3Packed) -> Vec3Packed {
    normalize_with::<NativeRsqrt>(a)
}

/// Scale `a` to unit length with estimator `E` and one Newton-Raphson step.
///
/// 1. The squared length `D` is taken over a copy of `a` with `w` zeroed,
///    summed with two pairwise horizontal adds so it lands in every lane.
/// 2. `r0 = E::estimate(D)` is refined exactly once by [`rsqrt::refine`].
/// 3. The result is `a * r`, with the caller's `w` scaled along.
///
/// For a finite `a` whose squared length `D` is a normal `f32`, the length
/// of the result is within [`rsqrt::refined_error_bound`] of 1; it is not
/// bit-exact. Inputs outside that range are not guarded and never trap:
///
/// - zero length: the estimate of `1/sqrt(0)` is hardware-defined and the
///   result lanes are inf/NaN;
/// - `D` overflows (`|a|` above about `1.8e19`): the estimate is 0 and the
///   refinement step yields NaN;
/// - `D` is subnormal (`|a|` below about `1.1e-19`): `rsqrtps` returns inf
///   and the software estimate overflows inside the step, so the result
///   lanes are inf/NaN.
#[inline(always)]
pub fn normalize_with<E: RsqrtEstimate>(a: Vec3Packed) -> Vec3Packed {
    let squared = {
        let v = a.with_w(0.0).packed();
        native::hsum_broadcast(native::mul(v, v))
    };
    let r = rsqrt::refine(squared, E::estimate(squared));
    Vec3Packed::from_packed(native::mul(a.packed(), r))
}

/// Reference normalization: `a / length(a)` with `w` zeroed first.
///
/// Slower than [`normalize`]; used as the baseline in precision checks
/// and benchmarks.
#[inline]
pub fn normalize_exact(a: Vec3Packed) -> Vec3Packed {
    a.with_w(0.0) / length(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::rsqrt::{refined_error_bound, SoftwareRsqrt};
    use approx::assert_relative_eq;

    #[test]
    fn test_min_max_lanes() {
        let a = Vec3Packed::new(1.0, 5.0, -2.0);
        let b = Vec3Packed::new(3.0, 2.0, -4.0);
        assert_eq!(min(a, b).to_array()[..3], [1.0, 2.0, -4.0]);
        assert_eq!(max(a, b).to_array()[..3], [3.0, 5.0, -2.0]);
    }

    #[test]
    fn test_min_prefers_second_operand_on_nan() {
        let a = Vec3Packed::new(f32::NAN, 1.0, 0.0);
        let b = Vec3Packed::new(2.0, f32::NAN, 0.0);
        let lo = min(a, b);
        assert_eq!(lo.x, 2.0);
        assert!(lo.y.is_nan());
    }

    #[test]
    fn test_length_matches_scalar_formula() {
        let (x, y, z) = (1.5f32, -2.0, 0.25);
        let tagged = Vec3Packed::new4(x, y, z, 99.0);
        assert_eq!(length(tagged), (x * x + y * y + z * z).sqrt());
        assert_eq!(length_squared(tagged), x * x + y * y + z * z);
    }

    #[test]
    fn test_length_propagates_nan() {
        assert!(length(Vec3Packed::new(f32::NAN, 0.0, 0.0)).is_nan());
    }

    #[test]
    fn test_distance() {
        let a = Vec3Packed::new(1.0, 1.0, 1.0);
        let b = Vec3Packed::new(4.0, 5.0, 1.0);
        assert_eq!(distance(a, b), 5.0);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = normalize(Vec3Packed::new(3.0, -4.0, 12.0));
        let bound = refined_error_bound::<NativeRsqrt>() + 2.0 * f32::EPSILON;
        assert!((length(v) - 1.0).abs() <= bound, "length {}", length(v));
    }

    #[test]
    fn test_normalize_ignores_w_for_length_but_scales_it() {
        let plain = normalize(Vec3Packed::new(0.0, 0.0, 2.0));
        let tagged = normalize(Vec3Packed::new4(0.0, 0.0, 2.0, 1000.0));
        assert_eq!(plain.z.to_bits(), tagged.z.to_bits());
        assert_relative_eq!(tagged.w, 500.0, max_relative = 1e-5);
    }

    #[test]
    fn test_normalize_with_software_estimate() {
        let v = Vec3Packed::new(1.0, 2.0, 2.0);
        let n = normalize_with::<SoftwareRsqrt>(v);
        assert_relative_eq!(n.x, 1.0 / 3.0, max_relative = 1e-6);
        assert_relative_eq!(n.y, 2.0 / 3.0, max_relative = 1e-6);
        assert_relative_eq!(n.z, 2.0 / 3.0, max_relative = 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_returns() {
        let n = normalize(Vec3Packed::ZERO);
        // Hardware-defined lanes; only the absence of a trap is guaranteed.
        assert_eq!(n.to_array().len(), 4);
    }

    #[test]
    fn test_normalize_exact_matches_fast_path() {
        let v = Vec3Packed::new(-7.0, 0.5, 3.0);
        let fast = normalize(v);
        let exact = normalize_exact(v);
        for i in 0..3 {
            assert_relative_eq!(fast[i], exact[i], max_relative = 1e-5);
        }
        assert_eq!(exact.w, 0.0);
    }
}
