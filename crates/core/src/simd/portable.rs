//! Portable backend: a packed register is a plain `[f32; 4]`.
//!
//! Lane order and operation order mirror the SSE backend exactly, so the
//! two produce identical bits for the same inputs.

use crate::Vec3Packed;

/// Four lanes in `x, y, z, w` order.
pub type Register = [f32; 4];

#[inline(always)]
fn lanewise(a: Register, b: Register, f: fn(f32, f32) -> f32) -> Register {
    [f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])]
}

#[inline(always)]
pub fn load(v: &Vec3Packed) -> Register {
    v.to_array()
}

#[inline(always)]
pub fn store(r: Register) -> Vec3Packed {
    Vec3Packed::from(r)
}

#[inline(always)]
pub fn to_array(r: Register) -> [f32; 4] {
    r
}

#[inline(always)]
pub fn from_array(lanes: [f32; 4]) -> Register {
    lanes
}

#[inline(always)]
pub fn set(x: f32, y: f32, z: f32, w: f32) -> Register {
    [x, y, z, w]
}

#[inline(always)]
pub fn splat(s: f32) -> Register {
    [s; 4]
}

#[inline(always)]
pub fn add(a: Register, b: Register) -> Register {
    lanewise(a, b, |a, b| a + b)
}

#[inline(always)]
pub fn sub(a: Register, b: Register) -> Register {
    lanewise(a, b, |a, b| a - b)
}

#[inline(always)]
pub fn mul(a: Register, b: Register) -> Register {
    lanewise(a, b, |a, b| a * b)
}

#[inline(always)]
pub fn div(a: Register, b: Register) -> Register {
    lanewise(a, b, |a, b| a / b)
}

/// Lane-wise `a < b ? a : b`, the `minps` selection rule (second operand on NaN).
#[inline(always)]
pub fn min(a: Register, b: Register) -> Register {
    lanewise(a, b, |a, b| if a < b { a } else { b })
}

/// Lane-wise `a > b ? a : b`, the `maxps` selection rule (second operand on NaN).
#[inline(always)]
pub fn max(a: Register, b: Register) -> Register {
    lanewise(a, b, |a, b| if a > b { a } else { b })
}

/// `(y, z, x, w)`
#[inline(always)]
pub fn yzx(a: Register) -> Register {
    [a[1], a[2], a[0], a[3]]
}

/// `(z, x, y, w)`
#[inline(always)]
pub fn zxy(a: Register) -> Register {
    [a[2], a[0], a[1], a[3]]
}

/// Two pairwise horizontal adds: `(a0 + a1) + (a2 + a3)` broadcast to every lane.
#[inline(always)]
pub fn hsum_broadcast(a: Register) -> Register {
    let low = a[0] + a[1];
    let high = a[2] + a[3];
    [low + high; 4]
}
