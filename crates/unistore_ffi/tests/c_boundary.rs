//! Drives the C ABI the way a foreign caller would.

use std::ffi::{CStr, CString};
use tempfile::tempdir;
use unistore_ffi::buffer::unistore_bytes_free;
use unistore_ffi::config::{unistore_config_free, unistore_config_new, unistore_config_set};
use unistore_ffi::error::unistore_get_last_error;
use unistore_ffi::metadata::{
    unistore_metadata_content_length, unistore_metadata_free, unistore_metadata_is_dir,
    unistore_metadata_is_file, unistore_metadata_last_modified_ms,
};
use unistore_ffi::operator::{
    unistore_blocking_read, unistore_blocking_write, unistore_is_exist, unistore_operator_free,
    unistore_operator_new, unistore_stat,
};
use unistore_ffi::{UnistoreBytes, UnistoreMetadata, UnistoreOperator, UnistoreResult};

unsafe fn open(scheme: &str, root: &str) -> *mut UnistoreOperator {
    let scheme = CString::new(scheme).unwrap();
    let key = CString::new("root").unwrap();
    let value = CString::new(root).unwrap();

    let config = unistore_config_new();
    assert_eq!(
        unistore_config_set(config, key.as_ptr(), value.as_ptr()),
        UnistoreResult::Ok
    );

    let mut op: *mut UnistoreOperator = std::ptr::null_mut();
    let result = unistore_operator_new(scheme.as_ptr(), config, &mut op);
    unistore_config_free(config);
    assert_eq!(result, UnistoreResult::Ok);
    op
}

unsafe fn write(op: *mut UnistoreOperator, path: &str, data: &[u8]) -> UnistoreResult {
    let path = CString::new(path).unwrap();
    let bytes = UnistoreBytes {
        data: data.as_ptr() as *mut u8,
        len: data.len(),
        capacity: 0,
    };
    unistore_blocking_write(op, path.as_ptr(), bytes)
}

unsafe fn read(op: *mut UnistoreOperator, path: &str) -> Result<Vec<u8>, UnistoreResult> {
    let path = CString::new(path).unwrap();
    let mut bytes = UnistoreBytes::empty();
    match unistore_blocking_read(op, path.as_ptr(), &mut bytes) {
        UnistoreResult::Ok => {
            let data = bytes.as_slice().to_vec();
            unistore_bytes_free(bytes);
            Ok(data)
        }
        status => Err(status),
    }
}

#[test]
fn memory_hello_world() {
    unsafe {
        let op = open("memory", "/myroot");
        assert_eq!(write(op, "test", b"Hello, World!"), UnistoreResult::Ok);

        let path = CString::new("test").unwrap();
        let mut exists = false;
        assert_eq!(
            unistore_is_exist(op, path.as_ptr(), &mut exists),
            UnistoreResult::Ok
        );
        assert!(exists);

        let mut meta: *mut UnistoreMetadata = std::ptr::null_mut();
        assert_eq!(
            unistore_stat(op, path.as_ptr(), &mut meta),
            UnistoreResult::Ok
        );
        assert!(unistore_metadata_is_file(meta));
        assert_eq!(unistore_metadata_content_length(meta), 13);
        unistore_metadata_free(meta);

        assert_eq!(read(op, "test").unwrap(), b"Hello, World!");
        unistore_operator_free(op);
    }
}

#[test]
fn fs_round_trip() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_string_lossy().into_owned();

    unsafe {
        let op = open("fs", &root);
        assert_eq!(write(op, "nested/file.bin", &[0, 1, 2, 255]), UnistoreResult::Ok);
        assert_eq!(read(op, "nested/file.bin").unwrap(), vec![0, 1, 2, 255]);

        let path = CString::new("nested/file.bin").unwrap();
        let mut meta: *mut UnistoreMetadata = std::ptr::null_mut();
        assert_eq!(
            unistore_stat(op, path.as_ptr(), &mut meta),
            UnistoreResult::Ok
        );
        assert_eq!(unistore_metadata_content_length(meta), 4);
        assert!(unistore_metadata_last_modified_ms(meta) > 0);
        unistore_metadata_free(meta);

        let dir_path = CString::new("nested/").unwrap();
        let mut meta: *mut UnistoreMetadata = std::ptr::null_mut();
        assert_eq!(
            unistore_stat(op, dir_path.as_ptr(), &mut meta),
            UnistoreResult::Ok
        );
        assert!(unistore_metadata_is_dir(meta));
        unistore_metadata_free(meta);

        unistore_operator_free(op);
    }

    assert!(dir.path().join("nested").join("file.bin").is_file());
}

#[test]
fn fs_without_root_is_invalid_config() {
    let scheme = CString::new("fs").unwrap();

    unsafe {
        let mut op: *mut UnistoreOperator = std::ptr::null_mut();
        let result = unistore_operator_new(scheme.as_ptr(), std::ptr::null(), &mut op);
        assert_eq!(result, UnistoreResult::InvalidConfig);

        let msg = CStr::from_ptr(unistore_get_last_error());
        assert!(msg.to_str().unwrap().contains("root is required"));
    }
}

#[test]
fn empty_write_creates_empty_object() {
    unsafe {
        let op = open("memory", "/");
        assert_eq!(
            write(op, "empty", &[]),
            UnistoreResult::Ok
        );
        assert_eq!(read(op, "empty").unwrap(), Vec::<u8>::new());
        unistore_operator_free(op);
    }
}

#[test]
fn invalid_path_is_invalid_argument() {
    unsafe {
        let op = open("memory", "/");
        assert_eq!(write(op, "a/../b", b"x"), UnistoreResult::InvalidArgument);
        assert_eq!(read(op, "dir/"), Err(UnistoreResult::IsADirectory));
        unistore_operator_free(op);
    }
}

#[test]
fn fs_path_below_file_is_absent() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_string_lossy().into_owned();

    unsafe {
        let op = open("fs", &root);
        assert_eq!(write(op, "file", b"x"), UnistoreResult::Ok);

        let child = CString::new("file/child").unwrap();
        let mut exists = true;
        assert_eq!(
            unistore_is_exist(op, child.as_ptr(), &mut exists),
            UnistoreResult::Ok
        );
        assert!(!exists);

        let mut meta: *mut UnistoreMetadata = std::ptr::null_mut();
        assert_eq!(
            unistore_stat(op, child.as_ptr(), &mut meta),
            UnistoreResult::NotFound
        );
        assert!(meta.is_null());
        assert_eq!(read(op, "file/child"), Err(UnistoreResult::NotFound));

        unistore_operator_free(op);
    }
}
