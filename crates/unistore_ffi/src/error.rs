//! Status codes and the per-thread last error.

use std::cell::RefCell;
use std::ffi::CString;
use unistore_core::{ErrorKind, StorageError};

/// Result code for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnistoreResult {
    /// Operation succeeded.
    Ok = 0,
    /// Generic error.
    Error = 1,
    /// Invalid argument (bad UTF-8, malformed path).
    InvalidArgument = 2,
    /// Object not found.
    NotFound = 3,
    /// Access denied by the backend.
    PermissionDenied = 4,
    /// Operation not supported by the backend.
    Unsupported = 5,
    /// I/O error.
    IoError = 6,
    /// Backend rejected its configuration.
    InvalidConfig = 7,
    /// Object already exists.
    AlreadyExists = 8,
    /// Null pointer.
    NullPointer = 9,
    /// File operation on a directory.
    IsADirectory = 10,
    /// Directory operation on a non-directory.
    NotADirectory = 11,
    /// Directory has children.
    NotEmpty = 12,
    /// No backend registered for the scheme.
    UnsupportedScheme = 13,
}

impl From<ErrorKind> for UnistoreResult {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::UnsupportedScheme => UnistoreResult::UnsupportedScheme,
            ErrorKind::InvalidConfig => UnistoreResult::InvalidConfig,
            ErrorKind::NotFound => UnistoreResult::NotFound,
            ErrorKind::PermissionDenied => UnistoreResult::PermissionDenied,
            ErrorKind::AlreadyExists => UnistoreResult::AlreadyExists,
            ErrorKind::IsADirectory => UnistoreResult::IsADirectory,
            ErrorKind::NotADirectory => UnistoreResult::NotADirectory,
            ErrorKind::NotEmpty => UnistoreResult::NotEmpty,
            ErrorKind::InvalidPath => UnistoreResult::InvalidArgument,
            ErrorKind::Unsupported => UnistoreResult::Unsupported,
            ErrorKind::Io => UnistoreResult::IoError,
        }
    }
}

// Thread-local storage for last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Sets the last error message.
pub fn set_last_error(message: impl Into<String>) {
    let msg = message.into();
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clears the last error.
pub fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Records `err` as the last error and returns its status code.
pub fn report(err: &StorageError) -> UnistoreResult {
    set_last_error(err.to_string());
    err.kind().into()
}

/// Gets the last error message as a C string.
///
/// Returns null if no error is set.
///
/// # Safety
///
/// The returned pointer is valid until the next FFI call on this thread.
#[no_mangle]
pub extern "C" fn unistore_get_last_error() -> *const std::ffi::c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(cstr) => cstr.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Clears the last error message.
#[no_mangle]
pub extern "C" fn unistore_clear_error() {
    clear_last_error();
}
