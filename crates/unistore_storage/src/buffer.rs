//! Owned byte buffers passed into writes and returned from reads.

use bytes::Bytes;
use std::fmt;
use std::ops::Deref;

/// An owned, length-tracked block of bytes.
///
/// Buffers are immutable once built. Cloning is cheap: clones share the
/// same allocation, which is released when the last clone is dropped.
///
/// # Example
///
/// ```rust
/// use unistore_storage::ByteBuffer;
///
/// let buf = ByteBuffer::from("Hello, World!");
/// assert_eq!(buf.len(), 13);
/// assert_eq!(&buf[..5], b"Hello");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteBuffer {
    inner: Bytes,
}

impl ByteBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer by copying `data`.
    #[must_use]
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self {
            inner: Bytes::copy_from_slice(data),
        }
    }

    /// Returns the number of valid bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the bytes as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    /// Copies the bytes into a new `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.inner.to_vec()
    }

    /// Consumes the buffer, returning the underlying [`Bytes`].
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.inner
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.inner
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl From<Bytes> for ByteBuffer {
    fn from(inner: Bytes) -> Self {
        Self { inner }
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            inner: Bytes::from(data),
        }
    }
}

impl From<&'static [u8]> for ByteBuffer {
    fn from(data: &'static [u8]) -> Self {
        Self {
            inner: Bytes::from_static(data),
        }
    }
}

impl<const N: usize> From<&'static [u8; N]> for ByteBuffer {
    fn from(data: &'static [u8; N]) -> Self {
        Self {
            inner: Bytes::from_static(data),
        }
    }
}

impl From<&'static str> for ByteBuffer {
    fn from(data: &'static str) -> Self {
        Self {
            inner: Bytes::from_static(data.as_bytes()),
        }
    }
}

impl From<String> for ByteBuffer {
    fn from(data: String) -> Self {
        Self {
            inner: Bytes::from(data),
        }
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buf: ByteBuffer) -> Self {
        buf.inner.into()
    }
}

impl PartialEq<[u8]> for ByteBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.inner == other
    }
}

impl PartialEq<&[u8]> for ByteBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.inner == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for ByteBuffer {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.inner == other[..]
    }
}
