use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// An error raised at the FFI boundary: a code for the caller plus a
/// message kept in thread-local storage for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FfiError {
    code: PackedVecErrorCode,
    msg: String,
}

impl FfiError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out"`, `"vectors"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: PackedVecErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `param_name` - The name of the invalid parameter
    /// * `message` - Description of the constraint that was violated
    pub fn invalid_parameter(param_name: &str, message: &str) -> Self {
        Self {
            code: PackedVecErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}': {message}"),
        }
    }

    /// Error code to return across the FFI boundary.
    pub fn code(&self) -> PackedVecErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by packed vector functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedVecErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter: misaligned buffer, bad length, or similar.
    InvalidParameter = 2,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored to keep the pointer handed to C alive.
    static LAST_ERROR: RefCell<(Option<CString>, PackedVecErrorCode)> =
        const { RefCell::new((None, PackedVecErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, PackedVecErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, PackedVecErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// if (packed_vec3_normalize(v, NULL) != Ok) {
///     printf("normalize failed: %s\n", packed_vec3_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn packed_vec3_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code for this thread.
#[no_mangle]
pub extern "C" fn packed_vec3_get_last_error_code() -> PackedVecErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
