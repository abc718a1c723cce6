//! Operator FFI functions.

use crate::buffer::UnistoreBytes;
use crate::error::{clear_last_error, report, set_last_error, UnistoreResult};
use crate::metadata::into_handle;
use crate::types::{borrow_str, UnistoreConfig, UnistoreMetadata, UnistoreOperator};
use std::ffi::c_char;
use unistore_core::{ByteBuffer, Operator, OperatorConfig};

/// Borrows the operator behind a handle, or returns `NullPointer`.
macro_rules! operator_ref {
    ($handle:expr) => {{
        if $handle.is_null() {
            set_last_error("null operator handle");
            return UnistoreResult::NullPointer;
        }
        &*($handle as *const Operator)
    }};
}

/// Borrows a string argument, or returns its error status.
macro_rules! str_arg {
    ($ptr:expr, $what:expr) => {
        match borrow_str($ptr, $what) {
            Ok(s) => s,
            Err(status) => return status,
        }
    };
}

/// Creates an operator.
///
/// # Arguments
///
/// * `scheme` - Null-terminated backend scheme, e.g. `"memory"` or `"fs"`
/// * `config` - Configuration handle, or null for an empty configuration
/// * `out_operator` - Output pointer for the operator handle
///
/// The configuration is only read; the caller still frees it.
///
/// # Returns
///
/// `UnistoreResult::Ok` on success, `UnsupportedScheme` or `InvalidConfig`
/// when the backend cannot be built.
///
/// # Safety
///
/// - `scheme` must be a valid null-terminated UTF-8 string
/// - `config` must be null or a handle from `unistore_config_new`
/// - `out_operator` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn unistore_operator_new(
    scheme: *const c_char,
    config: *const UnistoreConfig,
    out_operator: *mut *mut UnistoreOperator,
) -> UnistoreResult {
    clear_last_error();

    if out_operator.is_null() {
        set_last_error("null pointer argument");
        return UnistoreResult::NullPointer;
    }

    let scheme = str_arg!(scheme, "scheme");
    let config = match (config as *const OperatorConfig).as_ref() {
        Some(config) => config.clone(),
        None => OperatorConfig::new(),
    };

    match Operator::new(scheme, config) {
        Ok(op) => {
            *out_operator = Box::into_raw(Box::new(op)) as *mut UnistoreOperator;
            UnistoreResult::Ok
        }
        Err(e) => report(&e),
    }
}

/// Frees an operator.
///
/// # Safety
///
/// The handle must have been returned by `unistore_operator_new` and must
/// not be used after this call. Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn unistore_operator_free(operator: *mut UnistoreOperator) {
    if !operator.is_null() {
        drop(Box::from_raw(operator as *mut Operator));
    }
}

/// Writes `bytes` as the whole content of `path`.
///
/// # Arguments
///
/// * `operator` - The operator handle
/// * `path` - Null-terminated path relative to the operator root
/// * `bytes` - Caller-owned data; only `data` and `len` are read
///
/// # Returns
///
/// `UnistoreResult::Ok` on success, error code otherwise.
///
/// # Safety
///
/// - `operator` must be a valid operator handle
/// - `path` must be a valid null-terminated UTF-8 string
/// - `bytes.data` must be valid for `bytes.len` bytes (or null when empty)
#[no_mangle]
pub unsafe extern "C" fn unistore_blocking_write(
    operator: *const UnistoreOperator,
    path: *const c_char,
    bytes: UnistoreBytes,
) -> UnistoreResult {
    clear_last_error();

    let op = operator_ref!(operator);
    let path = str_arg!(path, "path");

    if bytes.data.is_null() && bytes.len > 0 {
        set_last_error("null data pointer with non-zero length");
        return UnistoreResult::InvalidArgument;
    }

    let data = ByteBuffer::copy_from_slice(bytes.as_slice());
    match op.blocking_write(path, data) {
        Ok(()) => UnistoreResult::Ok,
        Err(e) => report(&e),
    }
}

/// Reads the whole content of `path`.
///
/// # Returns
///
/// `UnistoreResult::Ok` on success (buffer will be filled and must be
/// released with `unistore_bytes_free`), `NotFound` if the object does not
/// exist, error code otherwise.
///
/// # Safety
///
/// - `operator` must be a valid operator handle
/// - `path` must be a valid null-terminated UTF-8 string
/// - `out_bytes` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn unistore_blocking_read(
    operator: *const UnistoreOperator,
    path: *const c_char,
    out_bytes: *mut UnistoreBytes,
) -> UnistoreResult {
    clear_last_error();

    let op = operator_ref!(operator);
    let path = str_arg!(path, "path");
    if out_bytes.is_null() {
        set_last_error("null output buffer");
        return UnistoreResult::NullPointer;
    }

    match op.blocking_read(path) {
        Ok(data) => {
            *out_bytes = UnistoreBytes::from_buffer(data);
            UnistoreResult::Ok
        }
        Err(e) => {
            *out_bytes = UnistoreBytes::empty();
            report(&e)
        }
    }
}

/// Checks whether `path` exists.
///
/// Absence is not an error: `out_exist` is set to false and `Ok` returned.
///
/// # Safety
///
/// - `operator` must be a valid operator handle
/// - `path` must be a valid null-terminated UTF-8 string
/// - `out_exist` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn unistore_is_exist(
    operator: *const UnistoreOperator,
    path: *const c_char,
    out_exist: *mut bool,
) -> UnistoreResult {
    clear_last_error();

    let op = operator_ref!(operator);
    let path = str_arg!(path, "path");
    if out_exist.is_null() {
        set_last_error("null output pointer");
        return UnistoreResult::NullPointer;
    }

    match op.is_exist(path) {
        Ok(exists) => {
            *out_exist = exists;
            UnistoreResult::Ok
        }
        Err(e) => report(&e),
    }
}

/// Returns the metadata of `path`.
///
/// # Returns
///
/// `UnistoreResult::Ok` on success (the handle must be released with
/// `unistore_metadata_free`), `NotFound` if the object does not exist.
///
/// # Safety
///
/// - `operator` must be a valid operator handle
/// - `path` must be a valid null-terminated UTF-8 string
/// - `out_metadata` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn unistore_stat(
    operator: *const UnistoreOperator,
    path: *const c_char,
    out_metadata: *mut *mut UnistoreMetadata,
) -> UnistoreResult {
    clear_last_error();

    let op = operator_ref!(operator);
    let path = str_arg!(path, "path");
    if out_metadata.is_null() {
        set_last_error("null output pointer");
        return UnistoreResult::NullPointer;
    }

    match op.stat(path) {
        Ok(meta) => {
            *out_metadata = into_handle(meta);
            UnistoreResult::Ok
        }
        Err(e) => {
            *out_metadata = std::ptr::null_mut();
            report(&e)
        }
    }
}

/// Deletes `path`. Deleting an absent object succeeds.
///
/// # Safety
///
/// - `operator` must be a valid operator handle
/// - `path` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn unistore_delete(
    operator: *const UnistoreOperator,
    path: *const c_char,
) -> UnistoreResult {
    clear_last_error();

    let op = operator_ref!(operator);
    let path = str_arg!(path, "path");

    match op.blocking_delete(path) {
        Ok(()) => UnistoreResult::Ok,
        Err(e) => report(&e),
    }
}

/// Creates the directory `path` (must end with `/`) and its parents.
///
/// # Safety
///
/// - `operator` must be a valid operator handle
/// - `path` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn unistore_create_dir(
    operator: *const UnistoreOperator,
    path: *const c_char,
) -> UnistoreResult {
    clear_last_error();

    let op = operator_ref!(operator);
    let path = str_arg!(path, "path");

    match op.blocking_create_dir(path) {
        Ok(()) => UnistoreResult::Ok,
        Err(e) => report(&e),
    }
}

/// Returns the library version as a null-terminated string.
///
/// The returned pointer is static and should not be freed.
#[no_mangle]
pub extern "C" fn unistore_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}
