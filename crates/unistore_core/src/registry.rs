//! Scheme registry.
//!
//! Maps scheme identifiers (`"memory"`, `"fs"`, ...) to the factories that
//! build their backends. [`Registry::default`] knows the built-in schemes;
//! callers can register their own.

use crate::config::OperatorConfig;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use unistore_storage::{Backend, FsBackend, MemoryBackend, StorageError, StorageResult};

/// Builds a backend from an already validated configuration.
pub type BuildFn = fn(&OperatorConfig) -> StorageResult<Arc<dyn Backend>>;

/// Describes how to build the backend of one scheme.
#[derive(Clone, Copy)]
pub struct BackendFactory {
    scheme: &'static str,
    accepted_keys: &'static [&'static str],
    build: BuildFn,
}

impl BackendFactory {
    /// Creates a factory for `scheme` accepting the given option keys.
    #[must_use]
    pub const fn new(
        scheme: &'static str,
        accepted_keys: &'static [&'static str],
        build: BuildFn,
    ) -> Self {
        Self {
            scheme,
            accepted_keys,
            build,
        }
    }

    /// Returns the scheme identifier.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        self.scheme
    }

    /// Returns the option keys the backend understands.
    #[must_use]
    pub const fn accepted_keys(&self) -> &'static [&'static str] {
        self.accepted_keys
    }

    /// Validates `config` and builds the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidConfig`] if an option is unknown or
    /// rejected by the backend.
    pub fn build(&self, config: &OperatorConfig) -> StorageResult<Arc<dyn Backend>> {
        config.validate(self.scheme, self.accepted_keys)?;
        (self.build)(config)
    }
}

impl fmt::Debug for BackendFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendFactory")
            .field("scheme", &self.scheme)
            .field("accepted_keys", &self.accepted_keys)
            .finish()
    }
}

fn build_memory(config: &OperatorConfig) -> StorageResult<Arc<dyn Backend>> {
    let backend = match config.get("root") {
        Some(root) => MemoryBackend::with_root(root)?,
        None => MemoryBackend::new(),
    };
    Ok(Arc::new(backend))
}

fn build_fs(config: &OperatorConfig) -> StorageResult<Arc<dyn Backend>> {
    let root = config
        .get("root")
        .ok_or_else(|| StorageError::invalid_config(FsBackend::SCHEME, "root is required"))?;
    Ok(Arc::new(FsBackend::new(root)?))
}

/// The in-memory backend factory.
pub const MEMORY: BackendFactory = BackendFactory::new(MemoryBackend::SCHEME, &["root"], build_memory);

/// The local filesystem backend factory.
pub const FS: BackendFactory = BackendFactory::new(FsBackend::SCHEME, &["root"], build_fs);

/// A set of schemes and their backend factories.
///
/// Scheme lookup is case-insensitive.
#[derive(Debug, Clone)]
pub struct Registry {
    factories: HashMap<String, BackendFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(MEMORY);
        registry.register(FS);
        registry
    }
}

impl Registry {
    /// Creates a registry with the built-in schemes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with no schemes at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers `factory`, returning the factory it replaced, if any.
    pub fn register(&mut self, factory: BackendFactory) -> Option<BackendFactory> {
        self.factories
            .insert(factory.scheme().to_ascii_lowercase(), factory)
    }

    /// Returns the factory for `scheme`.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<&BackendFactory> {
        self.factories.get(&scheme.to_ascii_lowercase())
    }

    /// Returns true if `scheme` is registered.
    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.get(scheme).is_some()
    }

    /// Returns the registered schemes, sorted.
    #[must_use]
    pub fn schemes(&self) -> Vec<&'static str> {
        let mut schemes: Vec<_> = self.factories.values().map(BackendFactory::scheme).collect();
        schemes.sort_unstable();
        schemes
    }

    /// Builds the backend registered for `scheme`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UnsupportedScheme`] if `scheme` is unknown and
    /// [`StorageError::InvalidConfig`] if the backend rejects `config`.
    pub fn build(&self, scheme: &str, config: &OperatorConfig) -> StorageResult<Arc<dyn Backend>> {
        self.get(scheme)
            .ok_or_else(|| StorageError::unsupported_scheme(scheme))?
            .build(config)
    }
}
