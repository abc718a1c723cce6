//! Path normalization helpers shared by all backends.
//!
//! Operator paths are relative to the backend root:
//!
//! - `/` (or the empty string) is the root directory itself
//! - a trailing `/` marks a directory path (`logs/2024/`)
//! - anything else is a file path (`logs/2024/app.log`)
//!
//! Roots are absolute and always end with `/`, so joining is plain
//! concatenation.

use crate::error::{StorageError, StorageResult};

/// Normalizes an operator path.
///
/// Leading slashes are stripped, repeated slashes collapse, and `.` segments
/// are dropped. `..` segments and embedded NUL bytes are rejected.
///
/// # Errors
///
/// Returns [`StorageError::InvalidPath`] if the path contains NUL or `..`.
pub fn normalize_path(path: &str) -> StorageResult<String> {
    if path.contains('\0') {
        return Err(StorageError::invalid_path(path, "embedded NUL byte"));
    }

    let is_dir = path.ends_with('/');
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(StorageError::invalid_path(
                    path,
                    "parent segments are not allowed",
                ))
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Ok("/".to_string());
    }

    let mut normalized = segments.join("/");
    if is_dir {
        normalized.push('/');
    }
    Ok(normalized)
}

/// Normalizes a backend root into an absolute path ending with `/`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidPath`] under the same rules as
/// [`normalize_path`].
pub fn normalize_root(root: &str) -> StorageResult<String> {
    let normalized = normalize_path(root)?;
    if normalized == "/" {
        return Ok(normalized);
    }

    let mut abs = String::with_capacity(normalized.len() + 2);
    abs.push('/');
    abs.push_str(normalized.trim_end_matches('/'));
    abs.push('/');
    Ok(abs)
}

/// Returns true if the normalized path addresses a directory.
#[must_use]
pub fn is_dir_path(path: &str) -> bool {
    path.ends_with('/')
}

/// Joins a normalized root and a normalized operator path.
#[must_use]
pub fn build_abs_path(root: &str, path: &str) -> String {
    if path == "/" {
        return root.to_string();
    }
    format!("{root}{path}")
}

/// Strips `root` from an absolute path, giving back the operator path.
///
/// The root itself maps to `/`.
#[must_use]
pub fn build_rel_path(root: &str, abs: &str) -> String {
    match abs.strip_prefix(root) {
        Some("") | None => "/".to_string(),
        Some(rel) => rel.to_string(),
    }
}

/// Returns the parent directory of a normalized path.
///
/// Top-level entries and the root itself have `/` as parent.
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "/",
    }
}

/// Iterates the ancestor directories of a normalized path, outermost first.
///
/// `a/b/c` yields `a/` then `a/b/`. The root is not included.
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.trim_end_matches('/');
    trimmed
        .match_indices('/')
        .map(move |(idx, _)| &path[..=idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_simple_paths() {
        assert_eq!(normalize_path("test").unwrap(), "test");
        assert_eq!(normalize_path("/test").unwrap(), "test");
        assert_eq!(normalize_path("a//b///c").unwrap(), "a/b/c");
        assert_eq!(normalize_path("./a/./b").unwrap(), "a/b");
    }

    #[test]
    fn normalize_keeps_dir_marker() {
        assert_eq!(normalize_path("a/b/").unwrap(), "a/b/");
        assert_eq!(normalize_path("//a//").unwrap(), "a/");
    }

    #[test]
    fn normalize_root_variants() {
        assert_eq!(normalize_path("").unwrap(), "/");
        assert_eq!(normalize_path("/").unwrap(), "/");
        assert_eq!(normalize_path("///").unwrap(), "/");
        assert_eq!(normalize_path("./").unwrap(), "/");
    }

    #[test]
    fn normalize_rejects_parent_segments() {
        let err = normalize_path("a/../b").unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath { .. }));
    }

    #[test]
    fn normalize_rejects_nul() {
        let err = normalize_path("a\0b").unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath { .. }));
    }

    #[test]
    fn root_is_absolute_with_trailing_slash() {
        assert_eq!(normalize_root("/myroot").unwrap(), "/myroot/");
        assert_eq!(normalize_root("myroot/sub/").unwrap(), "/myroot/sub/");
        assert_eq!(normalize_root("").unwrap(), "/");
        assert_eq!(normalize_root("/").unwrap(), "/");
    }

    #[test]
    fn abs_and_rel_paths() {
        assert_eq!(build_abs_path("/myroot/", "test"), "/myroot/test");
        assert_eq!(build_abs_path("/myroot/", "/"), "/myroot/");
        assert_eq!(build_rel_path("/myroot/", "/myroot/test"), "test");
        assert_eq!(build_rel_path("/myroot/", "/myroot/"), "/");
    }

    #[test]
    fn parents() {
        assert_eq!(parent_dir("a/b/c"), "a/b/");
        assert_eq!(parent_dir("a/b/"), "a/");
        assert_eq!(parent_dir("a"), "/");
        assert_eq!(parent_dir("/"), "/");
    }

    #[test]
    fn ancestor_dirs() {
        let dirs: Vec<_> = ancestors("a/b/c").collect();
        assert_eq!(dirs, vec!["a/", "a/b/"]);

        let dirs: Vec<_> = ancestors("a/b/").collect();
        assert_eq!(dirs, vec!["a/"]);

        assert_eq!(ancestors("top").count(), 0);
    }
}
