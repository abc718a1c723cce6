//! Test fixtures and operator helpers.
//!
//! Provides convenience functions for setting up operators over every
//! built-in backend.

use std::path::Path;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use unistore_core::{Operator, OperatorConfig};

/// Routes operator logs to the test output.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Safe to call
/// from every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A test operator with automatic cleanup.
pub struct TestOperator {
    /// The operator instance.
    pub op: Operator,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestOperator {
    /// Creates an operator over a fresh in-memory backend rooted at `/`.
    pub fn memory() -> Self {
        Self::memory_at("/")
    }

    /// Creates an operator over a fresh in-memory backend rooted at `root`.
    pub fn memory_at(root: &str) -> Self {
        let config = OperatorConfig::new().with("root", root);
        Self {
            op: Operator::new("memory", config).expect("Failed to open memory operator"),
            _temp_dir: None,
        }
    }

    /// Creates an operator over a fresh temporary directory.
    pub fn fs() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = OperatorConfig::new().with("root", temp_dir.path().to_string_lossy());

        Self {
            op: Operator::new("fs", config).expect("Failed to open fs operator"),
            _temp_dir: Some(temp_dir),
        }
    }

    /// Creates one operator per built-in scheme.
    pub fn all() -> Vec<(&'static str, Self)> {
        vec![("memory", Self::memory()), ("fs", Self::fs())]
    }

    /// Returns the on-disk root if file-based, None if in-memory.
    pub fn dir(&self) -> Option<&Path> {
        self._temp_dir.as_ref().map(TempDir::path)
    }
}

impl std::ops::Deref for TestOperator {
    type Target = Operator;

    fn deref(&self) -> &Self::Target {
        &self.op
    }
}

/// Runs a test with a temporary in-memory operator.
///
/// # Example
///
/// ```rust
/// use unistore_testkit::with_memory_operator;
///
/// with_memory_operator(|op| {
///     op.blocking_write("key", "value").unwrap();
///     assert!(op.is_exist("key").unwrap());
/// });
/// ```
pub fn with_memory_operator<F, R>(f: F) -> R
where
    F: FnOnce(&Operator) -> R,
{
    let fixture = TestOperator::memory();
    f(&fixture.op)
}

/// Runs a test with a temporary filesystem operator.
pub fn with_fs_operator<F, R>(f: F) -> R
where
    F: FnOnce(&Operator) -> R,
{
    let fixture = TestOperator::fs();
    f(&fixture.op)
}

/// Runs a test once per built-in backend.
///
/// The closure receives the scheme name so assertion messages can say
/// which backend failed.
pub fn for_each_backend<F>(mut f: F)
where
    F: FnMut(&str, &Operator),
{
    for (scheme, fixture) in TestOperator::all() {
        f(scheme, &fixture.op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fixture() {
        init_test_tracing();
        init_test_tracing();
        let fixture = TestOperator::memory();
        assert_eq!(fixture.info().scheme(), "memory");
        assert!(fixture.dir().is_none());
    }

    #[test]
    fn fs_fixture_has_directory() {
        let fixture = TestOperator::fs();
        assert_eq!(fixture.info().scheme(), "fs");
        let dir = fixture.dir().unwrap().to_path_buf();
        assert!(dir.is_dir());

        drop(fixture);
        assert!(!dir.exists());
    }

    #[test]
    fn each_backend_visited() {
        let mut seen = Vec::new();
        for_each_backend(|scheme, _| seen.push(scheme.to_string()));
        assert_eq!(seen, vec!["memory", "fs"]);
    }

    #[test]
    fn with_helpers_return_values() {
        let n = with_memory_operator(|op| {
            op.blocking_write("a", "123").unwrap();
            op.stat("a").unwrap().content_length()
        });
        assert_eq!(n, 3);

        let exists = with_fs_operator(|op| op.is_exist("nothing").unwrap());
        assert!(!exists);
    }
}
