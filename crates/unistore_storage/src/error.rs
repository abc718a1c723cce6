//! Error types for storage operations.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
///
/// Every fallible operator call surfaces exactly one of these. Use
/// [`StorageError::kind`] when only the category matters.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No backend is registered for the requested scheme.
    #[error("unsupported scheme: {scheme}")]
    UnsupportedScheme {
        /// The scheme that was requested.
        scheme: String,
    },

    /// The backend rejected its configuration.
    #[error("invalid config for {scheme}: {message}")]
    InvalidConfig {
        /// The scheme whose configuration was rejected.
        scheme: String,
        /// Description of the problem.
        message: String,
    },

    /// The object does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The operator-relative path.
        path: String,
    },

    /// The backend refused access to the object.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The operator-relative path.
        path: String,
    },

    /// The object already exists and the write was create-exclusive.
    #[error("already exists: {path}")]
    AlreadyExists {
        /// The operator-relative path.
        path: String,
    },

    /// A file operation was issued against a directory path.
    #[error("is a directory: {path}")]
    IsADirectory {
        /// The operator-relative path.
        path: String,
    },

    /// A directory operation was issued against a non-directory path.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The operator-relative path.
        path: String,
    },

    /// The directory still has children.
    #[error("directory not empty: {path}")]
    NotEmpty {
        /// The operator-relative path.
        path: String,
    },

    /// The path cannot be addressed by any backend.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The path as given by the caller.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// The backend does not implement the operation.
    #[error("{operation} is not supported by {scheme}")]
    Unsupported {
        /// The operation name.
        operation: &'static str,
        /// The scheme of the backend.
        scheme: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The category of a [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`StorageError::UnsupportedScheme`].
    UnsupportedScheme,
    /// See [`StorageError::InvalidConfig`].
    InvalidConfig,
    /// See [`StorageError::NotFound`].
    NotFound,
    /// See [`StorageError::PermissionDenied`].
    PermissionDenied,
    /// See [`StorageError::AlreadyExists`].
    AlreadyExists,
    /// See [`StorageError::IsADirectory`].
    IsADirectory,
    /// See [`StorageError::NotADirectory`].
    NotADirectory,
    /// See [`StorageError::NotEmpty`].
    NotEmpty,
    /// See [`StorageError::InvalidPath`].
    InvalidPath,
    /// See [`StorageError::Unsupported`].
    Unsupported,
    /// See [`StorageError::Io`].
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnsupportedScheme => "UnsupportedScheme",
            ErrorKind::InvalidConfig => "InvalidConfig",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::IsADirectory => "IsADirectory",
            ErrorKind::NotADirectory => "NotADirectory",
            ErrorKind::NotEmpty => "NotEmpty",
            ErrorKind::InvalidPath => "InvalidPath",
            ErrorKind::Unsupported => "Unsupported",
            ErrorKind::Io => "Io",
        };
        f.write_str(name)
    }
}

impl StorageError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedScheme { .. } => ErrorKind::UnsupportedScheme,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::IsADirectory { .. } => ErrorKind::IsADirectory,
            Self::NotADirectory { .. } => ErrorKind::NotADirectory,
            Self::NotEmpty { .. } => ErrorKind::NotEmpty,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns true if this error means the object does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Creates an unsupported scheme error.
    pub fn unsupported_scheme(scheme: impl Into<String>) -> Self {
        Self::UnsupportedScheme {
            scheme: scheme.into(),
        }
    }

    /// Creates an invalid config error.
    pub fn invalid_config(scheme: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            scheme: scheme.into(),
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an already exists error.
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Creates an is-a-directory error.
    pub fn is_a_directory(path: impl Into<String>) -> Self {
        Self::IsADirectory { path: path.into() }
    }

    /// Creates a not-a-directory error.
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Creates a directory-not-empty error.
    pub fn not_empty(path: impl Into<String>) -> Self {
        Self::NotEmpty { path: path.into() }
    }

    /// Creates an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(operation: &'static str, scheme: impl Into<String>) -> Self {
        Self::Unsupported {
            operation,
            scheme: scheme.into(),
        }
    }

    /// Classifies an I/O error raised while operating on `path`.
    ///
    /// Absence, permission and existence failures become their dedicated
    /// variants; everything else stays an [`StorageError::Io`].
    pub fn from_io(err: io::Error, path: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::not_found(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_string(),
            },
            io::ErrorKind::AlreadyExists => Self::already_exists(path),
            _ => Self::Io(err),
        }
    }
}
