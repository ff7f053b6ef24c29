use packed_vec3_core::batch::{normalize_in_place, try_from_lanes_mut};
use packed_vec3_core::{length, max, min, normalize, normalize_exact, Vec3Packed};

use crate::error::{FfiError, PackedVecErrorCode};
use crate::helpers::{out_ref, track_result};

/// C-compatible packed vector.
///
/// Same layout as the Rust `Vec3Packed`: four floats `x, y, z, w`. Buffers
/// passed to the batch functions must be 16-byte aligned
/// (`alignas(16)` / `_mm_malloc`), which the generated header cannot express.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<PackedVec3> for Vec3Packed {
    fn from(v: PackedVec3) -> Self {
        Vec3Packed::new4(v.x, v.y, v.z, v.w)
    }
}

impl From<Vec3Packed> for PackedVec3 {
    fn from(v: Vec3Packed) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: v.w,
        }
    }
}

/// Apply a unary vector function and write the result to `out`.
unsafe fn write_unary(
    v: PackedVec3,
    out: *mut PackedVec3,
    op: fn(Vec3Packed) -> Vec3Packed,
) -> PackedVecErrorCode {
    track_result(out_ref(out, "out").map(|out| *out = op(v.into()).into()))
}

/// Apply a binary vector function and write the result to `out`.
unsafe fn write_binary(
    a: PackedVec3,
    b: PackedVec3,
    out: *mut PackedVec3,
    op: fn(Vec3Packed, Vec3Packed) -> Vec3Packed,
) -> PackedVecErrorCode {
    track_result(out_ref(out, "out").map(|out| *out = op(a.into(), b.into()).into()))
}

/// Scale `v` to unit length (fast estimate plus one Newton-Raphson step).
///
/// A zero-length `v` produces hardware-defined inf/NaN lanes.
///
/// # Returns
/// - `Ok` with `out` written
/// - `NullPointer` if `out` is null
///
/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_normalize(
    v: PackedVec3,
    out: *mut PackedVec3,
) -> PackedVecErrorCode {
    write_unary(v, out, normalize)
}

/// Scale `v` to unit length with an exact square root and division.
///
/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_normalize_exact(
    v: PackedVec3,
    out: *mut PackedVec3,
) -> PackedVecErrorCode {
    write_unary(v, out, normalize_exact)
}

/// Cross product `a ^ b`. The `w` lane of the result is unspecified.
///
/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_cross(
    a: PackedVec3,
    b: PackedVec3,
    out: *mut PackedVec3,
) -> PackedVecErrorCode {
    write_binary(a, b, out, |a, b| a ^ b)
}

/// Lane-wise minimum.
///
/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_min(
    a: PackedVec3,
    b: PackedVec3,
    out: *mut PackedVec3,
) -> PackedVecErrorCode {
    write_binary(a, b, out, min)
}

/// Lane-wise maximum.
///
/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_max(
    a: PackedVec3,
    b: PackedVec3,
    out: *mut PackedVec3,
) -> PackedVecErrorCode {
    write_binary(a, b, out, max)
}

/// Dot product over `x, y, z`.
///
/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_dot(
    a: PackedVec3,
    b: PackedVec3,
    out: *mut f32,
) -> PackedVecErrorCode {
    track_result(
        out_ref(out, "out").map(|out| *out = Vec3Packed::from(a) * Vec3Packed::from(b)),
    )
}

/// Length over `x, y, z`.
///
/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_length(v: PackedVec3, out: *mut f32) -> PackedVecErrorCode {
    track_result(out_ref(out, "out").map(|out| *out = length(v.into())))
}

/// Normalize `count` vectors in place.
///
/// # Returns
/// - `Ok` (also for `count == 0`, where `vectors` may be null)
/// - `NullPointer` if `vectors` is null and `count > 0`
/// - `InvalidParameter` if `vectors` is not 16-byte aligned
///
/// # Safety
/// A non-null `vectors` must point to `count` initialized vectors that no
/// other thread accesses during the call.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_normalize_batch(
    vectors: *mut PackedVec3,
    count: usize,
) -> PackedVecErrorCode {
    track_result(normalize_batch(vectors, count))
}

unsafe fn normalize_batch(vectors: *mut PackedVec3, count: usize) -> Result<(), FfiError> {
    if count == 0 {
        return Ok(());
    }
    if vectors.is_null() {
        return Err(FfiError::null_pointer("vectors"));
    }
    if !vectors.is_aligned() {
        return Err(FfiError::invalid_parameter("vectors", "must be 16-byte aligned"));
    }
    let slice = std::slice::from_raw_parts_mut(vectors, count);
    normalize_in_place(bytemuck::cast_slice_mut(slice));
    Ok(())
}

/// Normalize a flat float buffer holding `lane_count / 4` vectors in place.
///
/// # Returns
/// - `Ok` (also for `lane_count == 0`)
/// - `NullPointer` if `lanes` is null and `lane_count > 0`
/// - `InvalidParameter` if `lane_count` is not a multiple of 4 or `lanes`
///   is not 16-byte aligned
///
/// # Safety
/// A non-null `lanes` must point to `lane_count` initialized floats that no
/// other thread accesses during the call.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_normalize_lanes(
    lanes: *mut f32,
    lane_count: usize,
) -> PackedVecErrorCode {
    track_result(normalize_lanes(lanes, lane_count))
}

unsafe fn normalize_lanes(lanes: *mut f32, lane_count: usize) -> Result<(), FfiError> {
    if lane_count == 0 {
        return Ok(());
    }
    if lanes.is_null() {
        return Err(FfiError::null_pointer("lanes"));
    }
    let slice = std::slice::from_raw_parts_mut(lanes, lane_count);
    let vectors = try_from_lanes_mut(slice).ok_or_else(|| {
        FfiError::invalid_parameter(
            "lanes",
            &format!("need a 16-byte aligned buffer of 4*n floats, got {lane_count} floats"),
        )
    })?;
    normalize_in_place(vectors);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::packed_vec3_get_last_error_code;
    use std::ptr;

    fn v(x: f32, y: f32, z: f32) -> PackedVec3 {
        Vec3Packed::new(x, y, z).into()
    }

    #[test]
    fn test_normalize_writes_output() {
        let mut out = PackedVec3::default();
        let code = unsafe { packed_vec3_normalize(v(0.0, 3.0, 4.0), ptr::from_mut(&mut out)) };
        assert_eq!(code, PackedVecErrorCode::Ok);
        assert!((out.y - 0.6).abs() < 1e-5);
        assert!((out.z - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_null_out_is_rejected() {
        let code = unsafe { packed_vec3_normalize(v(1.0, 0.0, 0.0), ptr::null_mut()) };
        assert_eq!(code, PackedVecErrorCode::NullPointer);
        assert_eq!(packed_vec3_get_last_error_code(), PackedVecErrorCode::NullPointer);

        let code = unsafe { packed_vec3_dot(v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0), ptr::null_mut()) };
        assert_eq!(code, PackedVecErrorCode::NullPointer);
    }

    #[test]
    fn test_success_clears_last_error() {
        let _ = unsafe { packed_vec3_length(v(1.0, 0.0, 0.0), ptr::null_mut()) };
        let mut len = 0.0f32;
        let code = unsafe { packed_vec3_length(v(2.0, 0.0, 0.0), ptr::from_mut(&mut len)) };
        assert_eq!(code, PackedVecErrorCode::Ok);
        assert_eq!(len, 2.0);
        assert_eq!(packed_vec3_get_last_error_code(), PackedVecErrorCode::Ok);
    }

    #[test]
    fn test_cross_dot_min_max() {
        let mut c = PackedVec3::default();
        let mut d = 0.0f32;
        let (cross_code, dot_code) = unsafe {
            (
                packed_vec3_cross(v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0), ptr::from_mut(&mut c)),
                packed_vec3_dot(v(1.0, 2.0, 3.0), v(4.0, 5.0, 6.0), ptr::from_mut(&mut d)),
            )
        };
        assert_eq!(cross_code, PackedVecErrorCode::Ok);
        assert_eq!(dot_code, PackedVecErrorCode::Ok);
        assert_eq!([c.x, c.y, c.z], [0.0, 0.0, 1.0]);
        assert_eq!(d, 32.0);

        let (mut lo, mut hi) = (PackedVec3::default(), PackedVec3::default());
        unsafe {
            packed_vec3_min(v(1.0, 5.0, -2.0), v(3.0, 2.0, -4.0), ptr::from_mut(&mut lo));
            packed_vec3_max(v(1.0, 5.0, -2.0), v(3.0, 2.0, -4.0), ptr::from_mut(&mut hi));
        }
        assert_eq!([lo.x, lo.y, lo.z], [1.0, 2.0, -4.0]);
        assert_eq!([hi.x, hi.y, hi.z], [3.0, 5.0, -2.0]);
    }

    #[test]
    fn test_batch_normalize() {
        let mut vectors = [v(2.0, 0.0, 0.0), v(0.0, 0.0, -5.0)];
        let code = unsafe { packed_vec3_normalize_batch(vectors.as_mut_ptr(), vectors.len()) };
        assert_eq!(code, PackedVecErrorCode::Ok);
        assert!((vectors[0].x - 1.0).abs() < 1e-5);
        assert!((vectors[1].z + 1.0).abs() < 1e-5);

        let code = unsafe { packed_vec3_normalize_batch(ptr::null_mut(), 3) };
        assert_eq!(code, PackedVecErrorCode::NullPointer);
        let code = unsafe { packed_vec3_normalize_batch(ptr::null_mut(), 0) };
        assert_eq!(code, PackedVecErrorCode::Ok);
    }

    #[test]
    fn test_batch_rejects_misaligned_vectors() {
        let mut storage = [v(3.0, 4.0, 0.0), v(0.0, 0.0, 2.0), v(1.0, 1.0, 1.0)];
        let before = storage;
        // One float into the buffer: readable memory, but not on a 16-byte boundary.
        let shifted = storage.as_mut_ptr().wrapping_byte_add(4);

        let code = unsafe { packed_vec3_normalize_batch(shifted, 2) };
        assert_eq!(code, PackedVecErrorCode::InvalidParameter);
        assert_eq!(packed_vec3_get_last_error_code(), PackedVecErrorCode::InvalidParameter);
        assert_eq!(storage, before);
    }

    #[test]
    fn test_lanes_require_alignment_and_whole_vectors() {
        let mut storage = [v(3.0, 4.0, 0.0), v(0.0, 0.0, 2.0)];
        let lanes: &mut [f32] = bytemuck::cast_slice_mut(&mut storage);

        let code = unsafe { packed_vec3_normalize_lanes(lanes.as_mut_ptr(), 7) };
        assert_eq!(code, PackedVecErrorCode::InvalidParameter);

        let code = unsafe { packed_vec3_normalize_lanes(lanes[1..].as_mut_ptr(), 4) };
        assert_eq!(code, PackedVecErrorCode::InvalidParameter);

        let code = unsafe { packed_vec3_normalize_lanes(lanes.as_mut_ptr(), 8) };
        assert_eq!(code, PackedVecErrorCode::Ok);
        assert!((lanes[0] - 0.6).abs() < 1e-5);
        assert!((lanes[6] - 1.0).abs() < 1e-5);
    }
}
