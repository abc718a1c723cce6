//! Configuration FFI functions.

use crate::error::{clear_last_error, set_last_error, UnistoreResult};
use crate::types::{borrow_str, UnistoreConfig};
use std::ffi::c_char;
use unistore_core::OperatorConfig;

/// Creates an empty configuration.
///
/// The returned handle must be released with `unistore_config_free`.
#[no_mangle]
pub extern "C" fn unistore_config_new() -> *mut UnistoreConfig {
    Box::into_raw(Box::new(OperatorConfig::new())) as *mut UnistoreConfig
}

/// Sets an option, replacing any previous value for `key`.
///
/// # Arguments
///
/// * `config` - The configuration handle
/// * `key` - Null-terminated option key
/// * `value` - Null-terminated option value
///
/// # Returns
///
/// `UnistoreResult::Ok` on success, error code otherwise.
///
/// # Safety
///
/// - `config` must have been returned by `unistore_config_new`
/// - `key` and `value` must be valid null-terminated UTF-8 strings
#[no_mangle]
pub unsafe extern "C" fn unistore_config_set(
    config: *mut UnistoreConfig,
    key: *const c_char,
    value: *const c_char,
) -> UnistoreResult {
    clear_last_error();

    if config.is_null() {
        set_last_error("null config handle");
        return UnistoreResult::NullPointer;
    }

    let key = match borrow_str(key, "option key") {
        Ok(s) => s,
        Err(status) => return status,
    };
    let value = match borrow_str(value, "option value") {
        Ok(s) => s,
        Err(status) => return status,
    };

    let config = &mut *(config as *mut OperatorConfig);
    config.set(key, value);
    UnistoreResult::Ok
}

/// Frees a configuration.
///
/// # Safety
///
/// The handle must have been returned by `unistore_config_new` and must not
/// be used after this call. Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn unistore_config_free(config: *mut UnistoreConfig) {
    if !config.is_null() {
        drop(Box::from_raw(config as *mut OperatorConfig));
    }
}
