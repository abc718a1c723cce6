//! Operator configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use unistore_storage::{StorageError, StorageResult};

/// String options that parameterize a backend at construction time.
///
/// Keys are backend-defined (`root` is understood by every built-in
/// backend). The map is kept sorted by key. It is checked when an
/// [`crate::Operator`] is built: unknown keys, empty keys and values with
/// embedded NUL bytes are rejected there.
///
/// Serializes as a plain JSON object, so configs can be stored in files.
///
/// # Example
///
/// ```rust
/// use unistore_core::OperatorConfig;
///
/// let config = OperatorConfig::new().with("root", "/myroot");
/// assert_eq!(config.get("root"), Some("/myroot"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorConfig {
    options: BTreeMap<String, String>,
}

impl OperatorConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`OperatorConfig::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.options.remove(key)
    }

    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterates the options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Checks the options against the keys a backend accepts.
    pub(crate) fn validate(&self, scheme: &str, accepted: &[&str]) -> StorageResult<()> {
        for (key, value) in self.iter() {
            if key.is_empty() {
                return Err(StorageError::invalid_config(scheme, "empty option key"));
            }
            if !accepted.contains(&key) {
                return Err(StorageError::invalid_config(
                    scheme,
                    format!("unknown option {key:?}"),
                ));
            }
            if value.contains('\0') {
                return Err(StorageError::invalid_config(
                    scheme,
                    format!("option {key:?} contains a NUL byte"),
                ));
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for OperatorConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        config.extend(iter);
        config
    }
}

impl<K, V> Extend<(K, V)> for OperatorConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
