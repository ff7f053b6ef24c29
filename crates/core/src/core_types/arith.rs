//! Operators on [`Vec3Packed`].
//!
//! Lane-wise arithmetic runs on the packed register. `*` between two
//! vectors is the dot product and `^` is the cross product; the lane-wise
//! product and quotient are spelled [`Vec3Packed::cmul`] and
//! [`Vec3Packed::cdiv`].

use std::ops::{
    Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

use super::Vec3Packed;
use crate::simd::native;

impl Vec3Packed {
    /// Lane-wise product of all four lanes.
    #[inline(always)]
    pub fn cmul(self, rhs: Self) -> Self {
        Self::from_packed(native::mul(self.packed(), rhs.packed()))
    }

    /// Lane-wise quotient of all four lanes. Zero divisors give inf/NaN.
    #[inline(always)]
    pub fn cdiv(self, rhs: Self) -> Self {
        Self::from_packed(native::div(self.packed(), rhs.packed()))
    }

    /// `x*x' + y*y' + z*z'`, evaluated left to right. `w` never contributes.
    #[inline(always)]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// `yzx(a)*zxy(b) - zxy(a)*yzx(b)` on the packed registers.
    ///
    /// The first three lanes are the cross product. The `w` lane is
    /// `a.w*b.w - a.w*b.w` and must be treated as garbage; re-zero it with
    /// [`Vec3Packed::with_w`] when a clean four-lane value is needed.
    #[inline(always)]
    pub fn cross(self, rhs: Self) -> Self {
        let (a, b) = (self.packed(), rhs.packed());
        Self::from_packed(native::sub(
            native::mul(native::yzx(a), native::zxy(b)),
            native::mul(native::zxy(a), native::yzx(b)),
        ))
    }
}

impl Add for Vec3Packed {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::from_packed(native::add(self.packed(), rhs.packed()))
    }
}

impl Sub for Vec3Packed {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::from_packed(native::sub(self.packed(), rhs.packed()))
    }
}

impl Mul<f32> for Vec3Packed {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: f32) -> Self {
        Self::from_packed(native::mul(self.packed(), native::splat(rhs)))
    }
}

impl Mul<Vec3Packed> for f32 {
    type Output = Vec3Packed;

    #[inline(always)]
    fn mul(self, rhs: Vec3Packed) -> Vec3Packed {
        Vec3Packed::from_packed(native::mul(native::splat(self), rhs.packed()))
    }
}

impl Div<f32> for Vec3Packed {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: f32) -> Self {
        Self::from_packed(native::div(self.packed(), native::splat(rhs)))
    }
}

/// Dot product.
impl Mul for Vec3Packed {
    type Output = f32;

    #[inline(always)]
    fn mul(self, rhs: Self) -> f32 {
        self.dot(rhs)
    }
}

/// Lane-wise quotient, same as [`Vec3Packed::cdiv`].
impl Div for Vec3Packed {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.cdiv(rhs)
    }
}

/// Cross product.
impl BitXor for Vec3Packed {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.cross(rhs)
    }
}

/// Flips the sign of all four lanes (exact).
impl Neg for Vec3Packed {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl AddAssign for Vec3Packed {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3Packed {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vec3Packed {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Vec3Packed {
    #[inline(always)]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn xyz(v: Vec3Packed) -> [f32; 3] {
        [v.x, v.y, v.z]
    }

    #[test]
    fn test_add_sub_include_w() {
        let a = Vec3Packed::new4(1.0, 2.0, 3.0, 4.0);
        let b = Vec3Packed::new4(0.5, 0.5, 0.5, 0.5);
        assert_eq!((a + b).to_array(), [1.5, 2.5, 3.5, 4.5]);
        assert_eq!((a - b).to_array(), [0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_scalar_mul_commutes() {
        let a = Vec3Packed::new4(1.5, -2.0, 3.25, 7.0);
        for s in [-3.0f32, 0.0, 0.125, 1.0e-3, -0.0] {
            assert_eq!((a * s).to_array().map(f32::to_bits), (s * a).to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn test_scalar_div_by_zero_is_ieee() {
        let v = Vec3Packed::new4(1.0, -1.0, 0.0, 2.0) / 0.0;
        assert_eq!(v.x, f32::INFINITY);
        assert_eq!(v.y, f32::NEG_INFINITY);
        assert!(v.z.is_nan());
    }

    #[test]
    fn test_cmul_cdiv() {
        let a = Vec3Packed::new4(2.0, 3.0, 4.0, 5.0);
        let b = Vec3Packed::new4(4.0, 2.0, 8.0, 10.0);
        assert_eq!(a.cmul(b).to_array(), [8.0, 6.0, 32.0, 50.0]);
        assert_eq!(a.cdiv(b).to_array(), [0.5, 1.5, 0.5, 0.5]);
        assert_eq!((a / b).to_array(), a.cdiv(b).to_array());
    }

    #[test]
    fn test_dot_ignores_w() {
        let a = Vec3Packed::new4(1.0, 2.0, 3.0, 100.0);
        let b = Vec3Packed::new4(4.0, 5.0, 6.0, 100.0);
        assert_eq!(a * b, 32.0);
        assert_eq!(Vec3Packed::new(1.0, 0.0, 0.0) * Vec3Packed::new(0.0, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_cross_of_basis_vectors() {
        let x = Vec3Packed::new(1.0, 0.0, 0.0);
        let y = Vec3Packed::new(0.0, 1.0, 0.0);
        let z = Vec3Packed::new(0.0, 0.0, 1.0);
        assert_eq!(xyz(x ^ y), [0.0, 0.0, 1.0]);
        assert_eq!(xyz(y ^ z), [1.0, 0.0, 0.0]);
        assert_eq!(xyz(z ^ x), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let a = Vec3Packed::new(1.0, 2.0, 3.0);
        let b = Vec3Packed::new(-4.0, 0.5, 2.0);
        let c = (a ^ b).with_w(0.0);
        assert_relative_eq!(c * a, 0.0, epsilon = 1e-5);
        assert_relative_eq!(c * b, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_neg_flips_every_lane() {
        let v = -Vec3Packed::new4(1.0, -2.0, 0.0, 3.0);
        assert_eq!(v.to_array(), [-1.0, 2.0, -0.0, -3.0]);
        assert!(v.z.is_sign_negative());
    }

    #[test]
    fn test_compound_assignment() {
        let mut v = Vec3Packed::new(1.0, 2.0, 3.0);
        v += Vec3Packed::new(1.0, 1.0, 1.0);
        v *= 2.0;
        v -= Vec3Packed::new(0.0, 2.0, 4.0);
        v /= 4.0;
        assert_eq!(v.to_array(), [1.0, 1.0, 1.0, 0.0]);
    }
}
