use crate::error::{with_last_error_mut, FfiError, PackedVecErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = PackedVecErrorCode::Ok;
    });
}

/// Record the outcome of an FFI call and turn it into the code handed to C.
pub(crate) fn track_result(result: Result<(), FfiError>) -> PackedVecErrorCode {
    match result {
        Ok(()) => {
            clear_last_error();
            PackedVecErrorCode::Ok
        }
        Err(error) => {
            set_last_error(&error);
            error.code()
        }
    }
}

/// Borrow an output pointer, rejecting null.
///
/// # Safety
/// A non-null `ptr` must be valid for writes and properly aligned.
pub(crate) unsafe fn out_ref<'a, T>(ptr: *mut T, name: &str) -> Result<&'a mut T, FfiError> {
    ptr.as_mut().ok_or_else(|| FfiError::null_pointer(name))
}
