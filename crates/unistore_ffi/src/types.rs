//! Type definitions for FFI.

use crate::error::{set_last_error, UnistoreResult};
use std::ffi::{c_char, CStr};

/// An opaque operator handle.
///
/// This is a pointer to the internal operator structure.
/// Never dereference or modify directly.
#[repr(C)]
pub struct UnistoreOperator {
    _private: [u8; 0],
}

/// An opaque configuration handle.
#[repr(C)]
pub struct UnistoreConfig {
    _private: [u8; 0],
}

/// An opaque metadata handle.
#[repr(C)]
pub struct UnistoreMetadata {
    _private: [u8; 0],
}

/// Borrows a null-terminated UTF-8 string argument.
///
/// Records the last error and returns the matching status on failure.
///
/// # Safety
///
/// `ptr` must be null or a valid null-terminated string that outlives `'a`.
pub(crate) unsafe fn borrow_str<'a>(
    ptr: *const c_char,
    what: &str,
) -> Result<&'a str, UnistoreResult> {
    if ptr.is_null() {
        set_last_error(format!("null {what}"));
        return Err(UnistoreResult::NullPointer);
    }
    CStr::from_ptr(ptr).to_str().map_err(|_| {
        set_last_error(format!("invalid UTF-8 in {what}"));
        UnistoreResult::InvalidArgument
    })
}
