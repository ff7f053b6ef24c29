use packed_vec3_core::Stopwatch;

use crate::error::{FfiError, PackedVecErrorCode};
use crate::helpers::{out_ref, track_result};

/// Opaque stopwatch handle for C callers benchmarking vector code.
pub struct PackedVec3Stopwatch {
    inner: Stopwatch,
}

/// Create a stopwatch that starts counting immediately.
///
/// # Returns
/// - `Ok` with `*out_stopwatch` set to a handle to release with
///   `packed_vec3_stopwatch_free`
/// - `NullPointer` if `out_stopwatch` is null
///
/// # Safety
/// `out_stopwatch` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_stopwatch_new(
    out_stopwatch: *mut *mut PackedVec3Stopwatch,
) -> PackedVecErrorCode {
    track_result(out_ref(out_stopwatch, "out_stopwatch").map(|out| {
        *out = Box::into_raw(Box::new(PackedVec3Stopwatch {
            inner: Stopwatch::new(),
        }));
    }))
}

/// Make the current instant the stopwatch's zero reference.
///
/// # Safety
/// `stopwatch` must be null or a live handle from `packed_vec3_stopwatch_new`.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_stopwatch_reset(
    stopwatch: *mut PackedVec3Stopwatch,
) -> PackedVecErrorCode {
    track_result(
        stopwatch
            .as_mut()
            .ok_or_else(|| FfiError::null_pointer("stopwatch"))
            .map(|sw| sw.inner.reset()),
    )
}

/// Milliseconds elapsed since creation or the last reset.
///
/// # Safety
/// `stopwatch` must be null or a live handle; `out_ms` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_stopwatch_read(
    stopwatch: *const PackedVec3Stopwatch,
    out_ms: *mut f64,
) -> PackedVecErrorCode {
    let result = stopwatch
        .as_ref()
        .ok_or_else(|| FfiError::null_pointer("stopwatch"))
        .and_then(|sw| out_ref(out_ms, "out_ms").map(|out| *out = sw.inner.read()));
    track_result(result)
}

/// Release a stopwatch. Null is ignored.
///
/// # Safety
/// `stopwatch` must be null or a handle from `packed_vec3_stopwatch_new`
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn packed_vec3_stopwatch_free(stopwatch: *mut PackedVec3Stopwatch) {
    if !stopwatch.is_null() {
        drop(Box::from_raw(stopwatch));
    }
}
