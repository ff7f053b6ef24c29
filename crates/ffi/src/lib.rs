//! C ABI for the packed vector library.
//!
//! Every fallible function returns a [`PackedVecErrorCode`] and records a
//! message retrievable with [`packed_vec3_get_last_error`] on the same
//! thread. Vector inputs are passed by value; results are written through
//! an out pointer. A C header (`PackedVec3FFI.h`) is generated by the build
//! script.

mod error;
mod helpers;
mod stopwatch;
mod vector;

pub use error::{packed_vec3_get_last_error, packed_vec3_get_last_error_code, PackedVecErrorCode};
pub use stopwatch::{
    packed_vec3_stopwatch_free, packed_vec3_stopwatch_new, packed_vec3_stopwatch_read,
    packed_vec3_stopwatch_reset, PackedVec3Stopwatch,
};
pub use vector::{
    packed_vec3_cross, packed_vec3_dot, packed_vec3_length, packed_vec3_max, packed_vec3_min,
    packed_vec3_normalize, packed_vec3_normalize_batch, packed_vec3_normalize_exact,
    packed_vec3_normalize_lanes, PackedVec3,
};

use std::ffi::CStr;
use std::os::raw::c_char;

/// Name of the lane backend this library was built with
/// (`"sse"`, `"sse3"` or `"portable"`), as a static C string.
///
/// **DO NOT FREE THIS POINTER.**
#[no_mangle]
pub extern "C" fn packed_vec3_backend_name() -> *const c_char {
    let name: &'static CStr = match packed_vec3_core::log_backend() {
        packed_vec3_core::Backend::Sse => c"sse",
        packed_vec3_core::Backend::Sse3 => c"sse3",
        packed_vec3_core::Backend::Portable => c"portable",
    };
    name.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name_matches_core() {
        // SAFETY: the pointer refers to a static NUL-terminated string.
        let name = unsafe { CStr::from_ptr(packed_vec3_backend_name()) };
        assert_eq!(name.to_str().unwrap(), packed_vec3_core::Backend::active().name());
    }
}
