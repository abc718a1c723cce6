//! Byte buffers crossing the C boundary.

use unistore_core::ByteBuffer;

/// A byte buffer for FFI.
///
/// Buffers filled by `unistore_blocking_read` are owned by Rust; release
/// them with `unistore_bytes_free` exactly once. Buffers the caller builds
/// for `unistore_blocking_write` stay owned by the caller and only need
/// `data` and `len` set.
#[repr(C)]
pub struct UnistoreBytes {
    /// Pointer to data.
    pub data: *mut u8,
    /// Length in bytes.
    pub len: usize,
    /// Capacity (for internal use).
    pub capacity: usize,
}

impl UnistoreBytes {
    /// Creates a new buffer from a Vec.
    pub fn from_vec(vec: Vec<u8>) -> Self {
        let mut vec = vec.into_boxed_slice();
        let data = vec.as_mut_ptr();
        let len = vec.len();
        std::mem::forget(vec);

        Self {
            data,
            len,
            capacity: len,
        }
    }

    /// Creates a buffer holding a copy of `buf`.
    pub fn from_buffer(buf: ByteBuffer) -> Self {
        Self::from_vec(buf.into())
    }

    /// Creates an empty buffer.
    pub fn empty() -> Self {
        Self {
            data: std::ptr::null_mut(),
            len: 0,
            capacity: 0,
        }
    }

    /// Returns true if the buffer is null/empty.
    pub fn is_null(&self) -> bool {
        self.data.is_null()
    }

    /// Views the bytes without taking ownership.
    ///
    /// # Safety
    ///
    /// `data` must be null or valid for `len` bytes.
    pub unsafe fn as_slice(&self) -> &[u8] {
        if self.data.is_null() || self.len == 0 {
            return &[];
        }
        std::slice::from_raw_parts(self.data, self.len)
    }

    /// Converts back to a Vec, consuming the buffer.
    ///
    /// # Safety
    ///
    /// The buffer must have been created from a Vec.
    pub unsafe fn into_vec(self) -> Vec<u8> {
        if self.data.is_null() {
            return Vec::new();
        }
        Vec::from_raw_parts(self.data, self.len, self.capacity)
    }
}

/// Frees a buffer allocated by Unistore.
///
/// # Safety
///
/// The buffer must have been allocated by Unistore FFI functions and not
/// freed before.
#[no_mangle]
pub unsafe extern "C" fn unistore_bytes_free(buffer: UnistoreBytes) {
    if !buffer.data.is_null() {
        drop(Vec::from_raw_parts(buffer.data, buffer.len, buffer.capacity));
    }
}
