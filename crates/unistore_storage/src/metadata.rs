//! Object metadata.

use std::time::SystemTime;

/// The kind of a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryMode {
    /// A regular object holding bytes.
    File,
    /// A directory containing other entries.
    Dir,
    /// The backend could not tell.
    Unknown,
}

/// Descriptive attributes of a stored object.
///
/// Metadata is a snapshot: it reflects the backend state at the time the
/// call that produced it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    mode: EntryMode,
    content_length: u64,
    last_modified: Option<SystemTime>,
}

impl Metadata {
    /// Creates metadata of the given mode with zero length and no timestamp.
    #[must_use]
    pub const fn new(mode: EntryMode) -> Self {
        Self {
            mode,
            content_length: 0,
            last_modified: None,
        }
    }

    /// Sets the content length.
    #[must_use]
    pub const fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = content_length;
        self
    }

    /// Sets the last-modified time.
    #[must_use]
    pub const fn with_last_modified(mut self, last_modified: SystemTime) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Returns the object kind.
    #[must_use]
    pub const fn mode(&self) -> EntryMode {
        self.mode
    }

    /// Returns true if the object is a file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.mode == EntryMode::File
    }

    /// Returns true if the object is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.mode == EntryMode::Dir
    }

    /// Returns the stored byte count. Always zero for directories.
    #[must_use]
    pub const fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Returns the last-modified time, if the backend tracks one.
    #[must_use]
    pub const fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }
}

/// A directory listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: String,
    metadata: Metadata,
}

impl Entry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(path: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            path: path.into(),
            metadata,
        }
    }

    /// Returns the operator-relative path. Directories end with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the last path segment, keeping a trailing `/` for directories.
    #[must_use]
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        let start = trimmed.rfind('/').map_or(0, |idx| idx + 1);
        &self.path[start..]
    }

    /// Returns the entry metadata.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn file_metadata() {
        let meta = Metadata::new(EntryMode::File).with_content_length(13);
        assert!(meta.is_file());
        assert!(!meta.is_dir());
        assert_eq!(meta.content_length(), 13);
        assert_eq!(meta.last_modified(), None);
    }

    #[test]
    fn dir_metadata() {
        let meta = Metadata::new(EntryMode::Dir);
        assert!(meta.is_dir());
        assert!(!meta.is_file());
        assert_eq!(meta.content_length(), 0);
    }

    #[test]
    fn unknown_is_neither() {
        let meta = Metadata::new(EntryMode::Unknown);
        assert!(!meta.is_file());
        assert!(!meta.is_dir());
    }

    #[test]
    fn last_modified_is_kept() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let meta = Metadata::new(EntryMode::File).with_last_modified(at);
        assert_eq!(meta.last_modified(), Some(at));
    }

    #[test]
    fn entry_name() {
        let file = Entry::new("a/b/c.txt", Metadata::new(EntryMode::File));
        assert_eq!(file.name(), "c.txt");

        let dir = Entry::new("a/b/", Metadata::new(EntryMode::Dir));
        assert_eq!(dir.name(), "b/");

        let top = Entry::new("top", Metadata::new(EntryMode::File));
        assert_eq!(top.name(), "top");
    }
}
