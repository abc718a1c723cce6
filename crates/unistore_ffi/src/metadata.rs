//! Metadata accessors.

use crate::types::UnistoreMetadata;
use std::time::UNIX_EPOCH;
use unistore_core::Metadata;

pub(crate) fn into_handle(meta: Metadata) -> *mut UnistoreMetadata {
    Box::into_raw(Box::new(meta)) as *mut UnistoreMetadata
}

unsafe fn borrow<'a>(meta: *const UnistoreMetadata) -> Option<&'a Metadata> {
    (meta as *const Metadata).as_ref()
}

/// Returns true if the object is a file. False for a null handle.
///
/// # Safety
///
/// `meta` must be null or a handle returned by `unistore_stat`.
#[no_mangle]
pub unsafe extern "C" fn unistore_metadata_is_file(meta: *const UnistoreMetadata) -> bool {
    borrow(meta).is_some_and(Metadata::is_file)
}

/// Returns true if the object is a directory. False for a null handle.
///
/// # Safety
///
/// `meta` must be null or a handle returned by `unistore_stat`.
#[no_mangle]
pub unsafe extern "C" fn unistore_metadata_is_dir(meta: *const UnistoreMetadata) -> bool {
    borrow(meta).is_some_and(Metadata::is_dir)
}

/// Returns the content length in bytes. Zero for a null handle.
///
/// # Safety
///
/// `meta` must be null or a handle returned by `unistore_stat`.
#[no_mangle]
pub unsafe extern "C" fn unistore_metadata_content_length(meta: *const UnistoreMetadata) -> u64 {
    borrow(meta).map_or(0, Metadata::content_length)
}

/// Returns the last-modified time in milliseconds since the Unix epoch.
///
/// Returns -1 if the backend does not track it or the handle is null.
///
/// # Safety
///
/// `meta` must be null or a handle returned by `unistore_stat`.
#[no_mangle]
pub unsafe extern "C" fn unistore_metadata_last_modified_ms(
    meta: *const UnistoreMetadata,
) -> i64 {
    borrow(meta)
        .and_then(Metadata::last_modified)
        .and_then(|at| at.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(-1)
}

/// Frees a metadata handle.
///
/// # Safety
///
/// The handle must have been returned by `unistore_stat` and must not be
/// used after this call. Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn unistore_metadata_free(meta: *mut UnistoreMetadata) {
    if !meta.is_null() {
        drop(Box::from_raw(meta as *mut Metadata));
    }
}
