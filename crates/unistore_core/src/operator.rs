//! The operator façade.

use crate::config::OperatorConfig;
use crate::registry::Registry;
use std::sync::Arc;
use tracing::debug;
use unistore_storage::path::normalize_path;
use unistore_storage::{
    Backend, BackendInfo, ByteBuffer, Entry, Metadata, StorageResult, WriteOptions,
};

/// Unified blocking access to one storage backend.
///
/// An operator is bound to exactly one backend for its whole lifetime.
/// Every call normalizes the path, blocks until the backend is done and
/// returns its result unchanged. The operator itself holds no mutable
/// state, so it is `Send + Sync`, and cloning it shares the same backend.
///
/// # Example
///
/// ```rust
/// use unistore_core::{Operator, OperatorConfig};
///
/// let config = OperatorConfig::new().with("root", "/myroot");
/// let op = Operator::new("memory", config).unwrap();
///
/// op.blocking_write("test", "Hello, World!").unwrap();
/// assert!(op.is_exist("test").unwrap());
///
/// let meta = op.stat("test").unwrap();
/// assert!(meta.is_file());
/// assert_eq!(meta.content_length(), 13);
///
/// let data = op.blocking_read("test").unwrap();
/// assert_eq!(data, b"Hello, World!");
/// ```
#[derive(Debug, Clone)]
pub struct Operator {
    backend: Arc<dyn Backend>,
}

impl Operator {
    /// Creates an operator for `scheme` using the built-in registry.
    ///
    /// # Errors
    ///
    /// Returns [`unistore_storage::StorageError::UnsupportedScheme`] if no
    /// backend is registered for `scheme`, and
    /// [`unistore_storage::StorageError::InvalidConfig`] if the backend
    /// rejects `config`.
    pub fn new(scheme: &str, config: OperatorConfig) -> StorageResult<Self> {
        Self::with_registry(&Registry::default(), scheme, config)
    }

    /// Creates an operator for `scheme` looked up in `registry`.
    ///
    /// # Errors
    ///
    /// Same as [`Operator::new`].
    pub fn with_registry(
        registry: &Registry,
        scheme: &str,
        config: OperatorConfig,
    ) -> StorageResult<Self> {
        let backend = registry.build(scheme, &config)?;
        debug!(
            scheme = backend.info().scheme(),
            root = backend.info().root(),
            "operator created"
        );
        Ok(Self { backend })
    }

    /// Wraps an already constructed backend.
    pub fn from_backend(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Returns the scheme and root of the backend.
    #[must_use]
    pub fn info(&self) -> &BackendInfo {
        self.backend.info()
    }

    fn normalize(&self, op: &'static str, path: &str) -> StorageResult<String> {
        let path = normalize_path(path)?;
        debug!(scheme = self.info().scheme(), path = %path, "{op}");
        Ok(path)
    }

    /// Writes `data` as the whole content of `path`, creating or
    /// overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or a directory path, if an
    /// intermediate segment is a file (`NotFound`), or if the backend fails.
    pub fn blocking_write(&self, path: &str, data: impl Into<ByteBuffer>) -> StorageResult<()> {
        self.blocking_write_with(path, data, WriteOptions::default())
    }

    /// Writes with explicit [`WriteOptions`].
    ///
    /// # Errors
    ///
    /// Same as [`Operator::blocking_write`], plus `AlreadyExists` when
    /// `if_not_exists` is set and the object exists.
    pub fn blocking_write_with(
        &self,
        path: &str,
        data: impl Into<ByteBuffer>,
        options: WriteOptions,
    ) -> StorageResult<()> {
        let path = self.normalize("write", path)?;
        self.backend.write(&path, data.into(), options)
    }

    /// Reads the whole content of `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the object does not exist.
    pub fn blocking_read(&self, path: &str) -> StorageResult<ByteBuffer> {
        let path = self.normalize("read", path)?;
        self.backend.read(&path)
    }

    /// Returns whether `path` exists. Absence is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid paths and backend failures other than
    /// absence.
    pub fn is_exist(&self, path: &str) -> StorageResult<bool> {
        let path = self.normalize("exists", path)?;
        self.backend.exists(&path)
    }

    /// Returns the metadata of `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the object does not exist.
    pub fn stat(&self, path: &str) -> StorageResult<Metadata> {
        let path = self.normalize("stat", path)?;
        self.backend.stat(&path)
    }

    /// Deletes `path`. Deleting an absent object succeeds.
    ///
    /// # Errors
    ///
    /// Returns `NotEmpty` for a directory with children.
    pub fn blocking_delete(&self, path: &str) -> StorageResult<()> {
        let path = self.normalize("delete", path)?;
        self.backend.delete(&path)
    }

    /// Lists the direct children of the directory `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotADirectory` if `path` does not end with `/` and
    /// `NotFound` if the directory does not exist.
    pub fn blocking_list(&self, path: &str) -> StorageResult<Vec<Entry>> {
        let path = self.normalize("list", path)?;
        self.backend.list(&path)
    }

    /// Creates the directory `path` and its missing parents.
    ///
    /// # Errors
    ///
    /// Returns `NotADirectory` if `path` does not end with `/` and
    /// `NotFound` if an ancestor is a file.
    pub fn blocking_create_dir(&self, path: &str) -> StorageResult<()> {
        let path = self.normalize("create_dir", path)?;
        self.backend.create_dir(&path)
    }
}
