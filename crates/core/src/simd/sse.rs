//! x86 SSE backend: a packed register is one `__m128`.

// Newer toolchains treat these intrinsics as safe when SSE is statically
// enabled, which leaves some of the blocks below redundant there.
#![allow(unused_unsafe)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128, _mm_add_ps, _mm_div_ps, _mm_load_ps, _mm_loadu_ps, _mm_max_ps, _mm_min_ps,
    _mm_mul_ps, _mm_rsqrt_ps, _mm_set1_ps, _mm_setr_ps, _mm_shuffle_ps, _mm_store_ps,
    _mm_storeu_ps, _mm_sub_ps,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128, _mm_add_ps, _mm_div_ps, _mm_load_ps, _mm_loadu_ps, _mm_max_ps, _mm_min_ps,
    _mm_mul_ps, _mm_rsqrt_ps, _mm_set1_ps, _mm_setr_ps, _mm_shuffle_ps, _mm_store_ps,
    _mm_storeu_ps, _mm_sub_ps,
};

#[cfg(all(target_arch = "x86", target_feature = "sse3"))]
use core::arch::x86::_mm_hadd_ps;
#[cfg(all(target_arch = "x86_64", target_feature = "sse3"))]
use core::arch::x86_64::_mm_hadd_ps;

use crate::Vec3Packed;

/// One SSE register, lane 0 = `x`.
pub type Register = __m128;

/// `shufps` immediate picking source lanes `(d0, d1, d2, d3)` for result lanes 0..4.
const fn shuffle_mask(d0: i32, d1: i32, d2: i32, d3: i32) -> i32 {
    (d3 << 6) | (d2 << 4) | (d1 << 2) | d0
}

const YZX: i32 = shuffle_mask(1, 2, 0, 3);
const ZXY: i32 = shuffle_mask(2, 0, 1, 3);
#[cfg(not(target_feature = "sse3"))]
const EVEN: i32 = shuffle_mask(0, 2, 0, 2);
#[cfg(not(target_feature = "sse3"))]
const ODD: i32 = shuffle_mask(1, 3, 1, 3);

#[inline(always)]
pub fn load(v: &Vec3Packed) -> Register {
    // SAFETY: `Vec3Packed` is 16-byte aligned and holds four contiguous f32 lanes.
    unsafe { _mm_load_ps(v.as_array().as_ptr()) }
}

#[inline(always)]
pub fn store(r: Register) -> Vec3Packed {
    let mut out = Vec3Packed::ZERO;
    // SAFETY: as in `load`; the destination is an aligned 16-byte value.
    unsafe {
        _mm_store_ps(out.as_array_mut().as_mut_ptr(), r);
    }
    out
}

#[inline(always)]
pub fn to_array(r: Register) -> [f32; 4] {
    let mut lanes = [0.0f32; 4];
    // SAFETY: `lanes` has room for four f32; the unaligned store has no alignment requirement.
    unsafe {
        _mm_storeu_ps(lanes.as_mut_ptr(), r);
    }
    lanes
}

#[inline(always)]
pub fn from_array(lanes: [f32; 4]) -> Register {
    // SAFETY: `lanes` holds four f32; the unaligned load has no alignment requirement.
    unsafe { _mm_loadu_ps(lanes.as_ptr()) }
}

#[inline(always)]
pub fn set(x: f32, y: f32, z: f32, w: f32) -> Register {
    unsafe { _mm_setr_ps(x, y, z, w) }
}

#[inline(always)]
pub fn splat(s: f32) -> Register {
    unsafe { _mm_set1_ps(s) }
}

#[inline(always)]
pub fn add(a: Register, b: Register) -> Register {
    unsafe { _mm_add_ps(a, b) }
}

#[inline(always)]
pub fn sub(a: Register, b: Register) -> Register {
    unsafe { _mm_sub_ps(a, b) }
}

#[inline(always)]
pub fn mul(a: Register, b: Register) -> Register {
    unsafe { _mm_mul_ps(a, b) }
}

#[inline(always)]
pub fn div(a: Register, b: Register) -> Register {
    unsafe { _mm_div_ps(a, b) }
}

/// `minps`: lane-wise `a < b ? a : b`.
#[inline(always)]
pub fn min(a: Register, b: Register) -> Register {
    unsafe { _mm_min_ps(a, b) }
}

/// `maxps`: lane-wise `a > b ? a : b`.
#[inline(always)]
pub fn max(a: Register, b: Register) -> Register {
    unsafe { _mm_max_ps(a, b) }
}

/// `(y, z, x, w)`
#[inline(always)]
pub fn yzx(a: Register) -> Register {
    unsafe { _mm_shuffle_ps::<YZX>(a, a) }
}

/// `(z, x, y, w)`
#[inline(always)]
pub fn zxy(a: Register) -> Register {
    unsafe { _mm_shuffle_ps::<ZXY>(a, a) }
}

/// `haddps(a, a)`: `(a0 + a1, a2 + a3, a0 + a1, a2 + a3)`.
#[cfg(target_feature = "sse3")]
#[inline(always)]
fn hadd(a: Register) -> Register {
    unsafe { _mm_hadd_ps(a, a) }
}

/// Shuffle emulation of `haddps(a, a)` with the same additions in the same order.
#[cfg(not(target_feature = "sse3"))]
#[inline(always)]
fn hadd(a: Register) -> Register {
    unsafe {
        let even = _mm_shuffle_ps::<EVEN>(a, a);
        let odd = _mm_shuffle_ps::<ODD>(a, a);
        _mm_add_ps(even, odd)
    }
}

/// Two pairwise horizontal adds: `(a0 + a1) + (a2 + a3)` broadcast to every lane.
#[inline(always)]
pub fn hsum_broadcast(a: Register) -> Register {
    hadd(hadd(a))
}

/// `rsqrtps`: relative error at most `1.5 * 2^-12`.
#[inline(always)]
pub fn rsqrt_estimate(a: Register) -> Register {
    unsafe { _mm_rsqrt_ps(a) }
}
