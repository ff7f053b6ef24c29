//! The packed 3D vector type.
//!
//! [`Vec3Packed`] is four `f32` lanes (`x, y, z, w`) laid out contiguously
//! and aligned to 16 bytes, so a whole vector moves in and out of one SIMD
//! register with an aligned load or store. The fourth lane is scratch:
//! it carries whatever the caller puts there and is ignored only by the
//! operations documented to ignore it (dot, length, the squared length
//! inside `normalize`).

use std::fmt;
use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};
use nalgebra::Vector3;

use crate::simd::{native, Register};

/// A 3D vector stored as one packed 4-lane register.
///
/// # Layout
/// ```text
/// offset:  0    4    8    12
/// lane:    x    y    z    w     (16-byte aligned)
/// ```
///
/// # Example
/// ```
/// use packed_vec3_core::{length, normalize, Vec3Packed};
///
/// let v = Vec3Packed::new(3.0, 0.0, 4.0);
/// assert_eq!(length(v), 5.0);
/// assert!((length(normalize(v)) - 1.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C, align(16))]
pub struct Vec3Packed {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Caller-defined scratch lane.
    pub w: f32,
}

// Packed loads and stores rely on this layout.
const _: () = assert!(std::mem::size_of::<Vec3Packed>() == 16);
const _: () = assert!(std::mem::align_of::<Vec3Packed>() == 16);

impl Vec3Packed {
    /// All four lanes zero.
    pub const ZERO: Self = Self::new4(0.0, 0.0, 0.0, 0.0);

    /// Vector `(x, y, z)` with `w = 0`.
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self::new4(x, y, z, 0.0)
    }

    /// Vector with all four lanes given.
    #[inline(always)]
    pub const fn new4(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// The same value in every lane, `w` included.
    #[inline(always)]
    pub fn splat(s: f32) -> Self {
        Self::from_packed(native::splat(s))
    }

    /// Wrap a backend register without unpacking it.
    ///
    /// This is the escape hatch for building new operators out of
    /// [`crate::simd::native`] lane functions.
    #[inline(always)]
    pub fn from_packed(register: Register) -> Self {
        native::store(register)
    }

    /// The vector as a backend register (aligned load).
    #[inline(always)]
    pub fn packed(self) -> Register {
        native::load(&self)
    }

    /// Copy with the `w` lane replaced.
    #[inline(always)]
    pub const fn with_w(self, w: f32) -> Self {
        Self { w, ..self }
    }

    /// Lanes in `x, y, z, w` order.
    #[inline(always)]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Borrow the lanes as an array.
    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }

    /// Mutably borrow the lanes as an array.
    #[inline(always)]
    pub fn as_array_mut(&mut self) -> &mut [f32; 4] {
        bytemuck::cast_mut(self)
    }

    /// Lane `index` (`0..4` = `x, y, z, w`), or `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.as_array().get(index).copied()
    }

    /// Lane `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be below 4. Any other value is undefined behavior.
    #[inline(always)]
    pub unsafe fn lane_unchecked(&self, index: usize) -> &f32 {
        // SAFETY: upheld by the caller.
        self.as_array().get_unchecked(index)
    }

    /// Mutable lane `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be below 4. Any other value is undefined behavior.
    #[inline(always)]
    pub unsafe fn lane_unchecked_mut(&mut self, index: usize) -> &mut f32 {
        // SAFETY: upheld by the caller.
        self.as_array_mut().get_unchecked_mut(index)
    }
}

/// Lane `index` (`0..4` = `x, y, z, w`).
///
/// # Panics
/// Panics when `index >= 4`. Use [`Vec3Packed::lane_unchecked`] to skip the check.
impl Index<usize> for Vec3Packed {
    type Output = f32;

    #[inline(always)]
    fn index(&self, index: usize) -> &f32 {
        &self.as_array()[index]
    }
}

impl IndexMut<usize> for Vec3Packed {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.as_array_mut()[index]
    }
}

impl From<[f32; 4]> for Vec3Packed {
    #[inline(always)]
    fn from(lanes: [f32; 4]) -> Self {
        Self::new4(lanes[0], lanes[1], lanes[2], lanes[3])
    }
}

impl From<Vec3Packed> for [f32; 4] {
    #[inline(always)]
    fn from(v: Vec3Packed) -> Self {
        v.to_array()
    }
}

/// `w` becomes 0.
impl From<Vector3<f32>> for Vec3Packed {
    #[inline]
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// `w` is dropped.
impl From<Vec3Packed> for Vector3<f32> {
    #[inline]
    fn from(v: Vec3Packed) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Vec3Packed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(
                f,
                "({:.p$}, {:.p$}, {:.p$}, {:.p$})",
                self.x, self.y, self.z, self.w
            ),
            None => write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w),
        }
    }
}
