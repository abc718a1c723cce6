//! Local filesystem storage backend.

use crate::backend::{Backend, BackendInfo, WriteOptions};
use crate::buffer::ByteBuffer;
use crate::error::{StorageError, StorageResult};
use crate::metadata::{Entry, EntryMode, Metadata};
use crate::path::{ancestors, is_dir_path};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use uuid::Uuid;

/// Temporary files used for atomic writes are named
/// `.unistore-<uuid>.tmp` and hidden from listings.
const TEMP_PREFIX: &str = ".unistore-";
const TEMP_SUFFIX: &str = ".tmp";

/// A storage backend over a directory of the local filesystem.
///
/// Every operator path resolves beneath the root directory, which is
/// created on construction if missing.
///
/// # Durability
///
/// Writes land in a temporary sibling file that is renamed over the target
/// once complete, so readers observe either the previous content or the
/// new one. Create-exclusive writes hard-link the temporary file into
/// place, which fails atomically if the target exists.
///
/// # Example
///
/// ```no_run
/// use unistore_storage::{Backend, FsBackend, WriteOptions};
///
/// let backend = FsBackend::new("/tmp/unistore").unwrap();
/// backend.write("notes/today.txt", "persistent data".into(), WriteOptions::new()).unwrap();
/// ```
#[derive(Debug)]
pub struct FsBackend {
    info: BackendInfo,
    root: PathBuf,
}

impl FsBackend {
    /// The scheme this backend registers under.
    pub const SCHEME: &'static str = "fs";

    /// Opens a backend rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidConfig`] if the root is empty, exists
    /// but is not a directory, or cannot be created.
    pub fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(StorageError::invalid_config(Self::SCHEME, "root is empty"));
        }
        if root.exists() && !root.is_dir() {
            return Err(StorageError::invalid_config(
                Self::SCHEME,
                format!("root {} is not a directory", root.display()),
            ));
        }

        fs::create_dir_all(root).map_err(|e| {
            StorageError::invalid_config(
                Self::SCHEME,
                format!("cannot create root {}: {e}", root.display()),
            )
        })?;

        let mut display = root.to_string_lossy().into_owned();
        if !display.ends_with('/') {
            display.push('/');
        }

        Ok(Self {
            info: BackendInfo::new(Self::SCHEME, display),
            root: root.to_path_buf(),
        })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let rel = path.trim_end_matches('/');
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    /// Fails if `path` or any of its ancestors is an existing file.
    fn ensure_no_file_ancestor(&self, path: &str, include_self: bool) -> StorageResult<()> {
        let self_dir = include_self.then_some(path);
        for dir in ancestors(path).chain(self_dir) {
            if self.resolve(dir).is_file() {
                return Err(StorageError::not_found(path));
            }
        }
        Ok(())
    }

    /// Returns true if an ancestor of `path` is an existing file.
    fn below_file(&self, path: &str) -> bool {
        self.ensure_no_file_ancestor(path, false).is_err()
    }

    /// Returns true if `target` exists with the other kind than `path` names.
    fn kind_mismatch(&self, path: &str, target: &Path) -> bool {
        fs::metadata(target).is_ok_and(|meta| meta.is_dir() != is_dir_path(path))
    }

    fn write_temp(&self, target: &Path, data: &[u8]) -> std::io::Result<PathBuf> {
        let dir = target.parent().unwrap_or(self.root.as_path());
        let temp = dir.join(format!("{TEMP_PREFIX}{}{TEMP_SUFFIX}", Uuid::new_v4()));

        let mut file = fs::File::create(&temp)?;
        let written = file.write_all(data).and_then(|()| file.sync_all());
        if let Err(e) = written {
            remove_temp(&temp);
            return Err(e);
        }
        Ok(temp)
    }
}

fn is_temp_name(name: &str) -> bool {
    name.strip_prefix(TEMP_PREFIX)
        .and_then(|rest| rest.strip_suffix(TEMP_SUFFIX))
        .is_some_and(|id| Uuid::parse_str(id).is_ok())
}

fn remove_temp(temp: &Path) {
    if let Err(e) = fs::remove_file(temp) {
        warn!(path = %temp.display(), error = %e, "failed to remove temporary file");
    }
}

fn to_metadata(meta: &fs::Metadata) -> Metadata {
    let mode = if meta.is_file() {
        EntryMode::File
    } else if meta.is_dir() {
        EntryMode::Dir
    } else {
        EntryMode::Unknown
    };

    let mut out = Metadata::new(mode);
    if mode == EntryMode::File {
        out = out.with_content_length(meta.len());
    }
    if let Ok(modified) = meta.modified() {
        out = out.with_last_modified(modified);
    }
    out
}

impl Backend for FsBackend {
    fn info(&self) -> &BackendInfo {
        &self.info
    }

    fn write(&self, path: &str, data: ByteBuffer, options: WriteOptions) -> StorageResult<()> {
        if is_dir_path(path) {
            return Err(StorageError::is_a_directory(path));
        }

        let target = self.resolve(path);
        self.ensure_no_file_ancestor(path, false)?;
        if target.is_dir() {
            return Err(StorageError::is_a_directory(path));
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::from_io(e, path))?;
        }

        trace!(path = %target.display(), len = data.len(), "fs write");
        let temp = self
            .write_temp(&target, &data)
            .map_err(|e| StorageError::from_io(e, path))?;

        let placed = if options.if_not_exists {
            fs::hard_link(&temp, &target).map(|()| remove_temp(&temp))
        } else {
            fs::rename(&temp, &target)
        };

        placed.map_err(|e| {
            if temp.exists() {
                remove_temp(&temp);
            }
            StorageError::from_io(e, path)
        })
    }

    fn read(&self, path: &str) -> StorageResult<ByteBuffer> {
        if is_dir_path(path) {
            return Err(StorageError::is_a_directory(path));
        }

        let target = self.resolve(path);
        match fs::read(&target) {
            Ok(data) => Ok(ByteBuffer::from(data)),
            Err(_) if target.is_dir() => Err(StorageError::is_a_directory(path)),
            Err(_) if self.below_file(path) => Err(StorageError::not_found(path)),
            Err(e) => Err(StorageError::from_io(e, path)),
        }
    }

    fn stat(&self, path: &str) -> StorageResult<Metadata> {
        let target = self.resolve(path);
        let meta = match fs::metadata(&target) {
            Ok(meta) => to_metadata(&meta),
            Err(_) if self.below_file(path) => return Err(StorageError::not_found(path)),
            Err(e) => return Err(StorageError::from_io(e, path)),
        };

        // The trailing slash must agree with what is on disk.
        if path != "/" && is_dir_path(path) != meta.is_dir() {
            return Err(StorageError::not_found(path));
        }
        Ok(meta)
    }

    fn delete(&self, path: &str) -> StorageResult<()> {
        let target = self.resolve(path);

        let result = if is_dir_path(path) {
            match fs::read_dir(&target) {
                Ok(mut entries) => {
                    if entries.next().is_some() {
                        return Err(StorageError::not_empty(path));
                    }
                    if path == "/" {
                        return Ok(());
                    }
                    fs::remove_dir(&target)
                }
                Err(e) => Err(e),
            }
        } else {
            fs::remove_file(&target)
        };

        match result {
            Ok(()) => {
                trace!(path = %target.display(), "fs delete");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            // A file addressed as a directory (or the reverse) is absent.
            Err(_) if self.below_file(path) || self.kind_mismatch(path, &target) => Ok(()),
            Err(e) => Err(StorageError::from_io(e, path)),
        }
    }

    fn list(&self, path: &str) -> StorageResult<Vec<Entry>> {
        if !is_dir_path(path) {
            return Err(StorageError::not_a_directory(path));
        }

        let target = self.resolve(path);
        if !target.is_dir() {
            return Err(StorageError::not_found(path));
        }

        let prefix = if path == "/" { "" } else { path };
        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&target).map_err(|e| StorageError::from_io(e, path))? {
            let dir_entry = dir_entry.map_err(|e| StorageError::from_io(e, path))?;
            let file_name = dir_entry.file_name();
            let Some(name) = file_name.to_str() else {
                warn!(dir = %target.display(), name = ?file_name, "skipping non UTF-8 entry");
                continue;
            };
            if is_temp_name(name) {
                continue;
            }

            let meta = dir_entry
                .metadata()
                .map_err(|e| StorageError::from_io(e, path))?;
            let meta = to_metadata(&meta);
            let mut rel = format!("{prefix}{name}");
            if meta.is_dir() {
                rel.push('/');
            }
            entries.push(Entry::new(rel, meta));
        }

        entries.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(entries)
    }

    fn create_dir(&self, path: &str) -> StorageResult<()> {
        if !is_dir_path(path) {
            return Err(StorageError::not_a_directory(path));
        }

        self.ensure_no_file_ancestor(path, true)?;
        fs::create_dir_all(self.resolve(path)).map_err(|e| StorageError::from_io(e, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(backend: &FsBackend, path: &str, data: &'static str) {
        backend
            .write(path, ByteBuffer::from(data), WriteOptions::new())
            .unwrap();
    }

    #[test]
    fn fs_creates_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("root");

        let backend = FsBackend::new(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(backend.root(), root);
        assert!(backend.info().root().ends_with('/'));
        assert_eq!(backend.info().scheme(), "fs");
    }

    #[test]
    fn fs_root_must_be_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, b"x").unwrap();

        let result = FsBackend::new(&file);
        assert!(matches!(result, Err(StorageError::InvalidConfig { .. })));
    }

    #[test]
    fn fs_empty_root_fails() {
        let result = FsBackend::new("");
        assert!(matches!(result, Err(StorageError::InvalidConfig { .. })));
    }

    #[test]
    fn fs_write_and_read() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();

        write(&backend, "test", "Hello, World!");
        assert_eq!(backend.read("test").unwrap(), b"Hello, World!");
        assert_eq!(fs::read(dir.path().join("test")).unwrap(), b"Hello, World!");
    }

    #[test]
    fn fs_write_creates_parents() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();

        write(&backend, "a/b/c.txt", "deep");
        assert!(dir.path().join("a").join("b").is_dir());
        assert!(backend.stat("a/b/").unwrap().is_dir());
    }

    #[test]
    fn fs_overwrite_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();

        write(&backend, "key", "first");
        write(&backend, "key", "second");

        assert_eq!(backend.read("key").unwrap(), b"second");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn fs_persistence() {
        let dir = tempdir().unwrap();

        {
            let backend = FsBackend::new(dir.path()).unwrap();
            write(&backend, "kept", "persistent data");
        }

        {
            let backend = FsBackend::new(dir.path()).unwrap();
            let meta = backend.stat("kept").unwrap();
            assert_eq!(meta.content_length(), 15);
            assert_eq!(backend.read("kept").unwrap(), b"persistent data");
        }
    }

    #[test]
    fn fs_read_missing_fails() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();

        assert!(matches!(
            backend.read("missing"),
            Err(StorageError::NotFound { .. })
        ));
        assert!(!backend.exists("missing").unwrap());
    }

    #[test]
    fn fs_read_dir_fails() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        backend.create_dir("d/").unwrap();

        assert!(matches!(
            backend.read("d"),
            Err(StorageError::IsADirectory { .. })
        ));
        assert!(matches!(
            backend.write("d", ByteBuffer::from("x"), WriteOptions::new()),
            Err(StorageError::IsADirectory { .. })
        ));
    }

    #[test]
    fn fs_write_under_file_fails() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        write(&backend, "a", "file");

        let result = backend.write("a/b", ByteBuffer::from("x"), WriteOptions::new());
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[test]
    fn fs_write_if_not_exists() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        let options = WriteOptions::new().if_not_exists(true);

        backend
            .write("once", ByteBuffer::from("first"), options)
            .unwrap();
        let result = backend.write("once", ByteBuffer::from("second"), options);
        assert!(matches!(result, Err(StorageError::AlreadyExists { .. })));
        assert_eq!(backend.read("once").unwrap(), b"first");
        assert_eq!(backend.list("/").unwrap().len(), 1);
    }

    #[test]
    fn fs_stat_kind_must_match_path() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        write(&backend, "file", "x");
        backend.create_dir("dir/").unwrap();

        assert!(backend.stat("file").unwrap().is_file());
        assert!(backend.stat("dir/").unwrap().is_dir());
        assert!(backend.stat("/").unwrap().is_dir());
        assert!(backend.stat("file/").unwrap_err().is_not_found());
        assert!(backend.stat("dir").unwrap_err().is_not_found());
    }

    #[test]
    fn fs_delete() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        write(&backend, "d/f", "x");

        assert!(matches!(
            backend.delete("d/"),
            Err(StorageError::NotEmpty { .. })
        ));
        backend.delete("d/f").unwrap();
        backend.delete("d/f").unwrap();
        backend.delete("d/").unwrap();
        assert!(!backend.exists("d/").unwrap());
    }

    #[test]
    fn fs_list() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        write(&backend, "b.txt", "22");
        write(&backend, "a/inner.txt", "1");

        let entries = backend.list("/").unwrap();
        let paths: Vec<_> = entries.iter().map(Entry::path).collect();
        assert_eq!(paths, vec!["a/", "b.txt"]);
        assert_eq!(entries[1].metadata().content_length(), 2);

        let entries = backend.list("a/").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), "a/inner.txt");

        assert!(matches!(
            backend.list("missing/"),
            Err(StorageError::NotFound { .. })
        ));
        assert!(matches!(
            backend.list("b.txt"),
            Err(StorageError::NotADirectory { .. })
        ));
    }

    #[test]
    fn fs_create_dir_over_file_fails() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        write(&backend, "f", "x");

        assert!(matches!(
            backend.create_dir("f/"),
            Err(StorageError::NotFound { .. })
        ));
        assert!(matches!(
            backend.create_dir("f/sub/"),
            Err(StorageError::NotFound { .. })
        ));
    }

    #[test]
    fn fs_paths_below_a_file_are_absent() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        write(&backend, "file", "x");

        assert!(!backend.exists("file/child").unwrap());
        assert!(backend.stat("file/child").unwrap_err().is_not_found());
        assert!(backend.read("file/child").unwrap_err().is_not_found());
        assert!(backend.stat("file/a/b/").unwrap_err().is_not_found());
    }

    #[test]
    fn fs_delete_with_mismatched_kind_is_noop() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        write(&backend, "file", "x");
        backend.create_dir("dir/").unwrap();

        backend.delete("file/").unwrap();
        backend.delete("dir").unwrap();
        backend.delete("file/child").unwrap();

        assert!(backend.exists("file").unwrap());
        assert!(backend.exists("dir/").unwrap());
    }

    #[test]
    fn fs_list_hides_only_temp_files() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path()).unwrap();
        write(&backend, "hidden/.unistore-notes", "kept");
        write(&backend, "hidden/.unistore-x.tmp", "kept too");
        let temp = format!("{TEMP_PREFIX}{}{TEMP_SUFFIX}", Uuid::new_v4());
        fs::write(dir.path().join("hidden").join(&temp), b"in flight").unwrap();

        let entries = backend.list("hidden/").unwrap();
        let paths: Vec<_> = entries.iter().map(Entry::path).collect();
        assert_eq!(
            paths,
            vec!["hidden/.unistore-notes", "hidden/.unistore-x.tmp"]
        );
    }

    #[test]
    fn temp_names() {
        assert!(is_temp_name(&format!(".unistore-{}.tmp", Uuid::new_v4())));
        assert!(!is_temp_name(".unistore-notes"));
        assert!(!is_temp_name(".unistore-.tmp"));
        assert!(!is_temp_name("unistore-0.tmp"));
    }
}
