//! Storage backend trait definition.

use crate::buffer::ByteBuffer;
use crate::error::{StorageError, StorageResult};
use crate::metadata::{Entry, Metadata};
use std::fmt::Debug;

/// Static description of a backend instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    scheme: String,
    root: String,
}

impl BackendInfo {
    /// Creates a new backend description.
    #[must_use]
    pub fn new(scheme: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            root: root.into(),
        }
    }

    /// Returns the scheme the backend was registered under.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the resolved root. Always ends with `/`.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }
}

/// Options for [`Backend::write`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Fail with [`StorageError::AlreadyExists`] instead of overwriting.
    pub if_not_exists: bool,
}

impl WriteOptions {
    /// Creates default options (create or overwrite).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets create-exclusive semantics.
    #[must_use]
    pub const fn if_not_exists(mut self, value: bool) -> Self {
        self.if_not_exists = value;
        self
    }
}

/// A blocking storage backend.
///
/// Backends store whole objects addressed by path. Paths handed to a
/// backend are already normalized (see [`crate::path::normalize_path`]) and
/// relative to the backend root; the backend resolves them against the root
/// on every call.
///
/// # Invariants
///
/// - `read`, `stat` and `exists` are idempotent in the absence of writes
/// - a completed `write` is visible to every later call on the same backend
/// - a write either lands completely or not at all
/// - backends must be `Send + Sync`; they synchronize their own state
///
/// # Implementors
///
/// - [`super::MemoryBackend`] - process-local map, for tests and caches
/// - [`super::FsBackend`] - local filesystem under a root directory
pub trait Backend: Send + Sync + Debug {
    /// Returns the backend description.
    fn info(&self) -> &BackendInfo;

    /// Writes `data` as the whole content of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `path` is a directory path
    /// - an ancestor of `path` is a file
    /// - `options.if_not_exists` is set and `path` exists
    /// - the underlying storage fails
    fn write(&self, path: &str, data: ByteBuffer, options: WriteOptions) -> StorageResult<()>;

    /// Reads the whole content of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if `path` does not exist.
    fn read(&self, path: &str) -> StorageResult<ByteBuffer>;

    /// Returns the metadata of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if `path` does not exist.
    fn stat(&self, path: &str) -> StorageResult<Metadata>;

    /// Returns whether `path` exists.
    ///
    /// Absence is `Ok(false)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures other than absence.
    fn exists(&self, path: &str) -> StorageResult<bool> {
        match self.stat(path) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Deletes `path`. Deleting an absent path succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotEmpty`] for a directory with children.
    fn delete(&self, path: &str) -> StorageResult<()> {
        let _ = path;
        Err(StorageError::unsupported("delete", self.info().scheme()))
    }

    /// Lists the direct children of the directory `path`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the directory does not exist.
    fn list(&self, path: &str) -> StorageResult<Vec<Entry>> {
        let _ = path;
        Err(StorageError::unsupported("list", self.info().scheme()))
    }

    /// Creates the directory `path` and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if an ancestor is a file.
    fn create_dir(&self, path: &str) -> StorageResult<()> {
        let _ = path;
        Err(StorageError::unsupported("create_dir", self.info().scheme()))
    }
}
