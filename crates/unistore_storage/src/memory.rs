//! In-memory storage backend.

use crate::backend::{Backend, BackendInfo, WriteOptions};
use crate::buffer::ByteBuffer;
use crate::error::{StorageError, StorageResult};
use crate::metadata::{Entry, EntryMode, Metadata};
use crate::path::{ancestors, build_abs_path, build_rel_path, is_dir_path, normalize_root};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::trace;

#[derive(Debug, Clone)]
enum Node {
    File {
        content: ByteBuffer,
        modified: SystemTime,
    },
    Dir {
        modified: SystemTime,
    },
}

impl Node {
    fn metadata(&self) -> Metadata {
        match self {
            Node::File { content, modified } => Metadata::new(EntryMode::File)
                .with_content_length(content.len() as u64)
                .with_last_modified(*modified),
            Node::Dir { modified } => Metadata::new(EntryMode::Dir).with_last_modified(*modified),
        }
    }
}

/// An in-memory storage backend.
///
/// Objects live in a map keyed by their absolute path (root + operator
/// path). A backend built with [`MemoryBackend::new`] or
/// [`MemoryBackend::with_root`] owns a fresh map; [`MemoryBackend::view`]
/// opens another root over the same map, and the root prefix keeps the
/// two namespaces apart. Nothing survives the process.
///
/// Directories exist either explicitly (created with `create_dir`) or
/// implicitly, as soon as any object lives beneath them.
///
/// # Thread Safety
///
/// The map sits behind a read-write lock. Readers share it; a write swaps
/// the whole object in one step, so concurrent readers see either the old
/// or the new content, never a mix.
///
/// # Example
///
/// ```rust
/// use unistore_storage::{Backend, MemoryBackend, WriteOptions};
///
/// let backend = MemoryBackend::new();
/// backend.write("hello.txt", "hello world".into(), WriteOptions::new()).unwrap();
/// assert_eq!(backend.read("hello.txt").unwrap(), b"hello world");
/// ```
#[derive(Debug)]
pub struct MemoryBackend {
    info: BackendInfo,
    nodes: Arc<RwLock<BTreeMap<String, Node>>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            info: BackendInfo::new(Self::SCHEME, "/"),
            nodes: Arc::default(),
        }
    }
}

impl MemoryBackend {
    /// The scheme this backend registers under.
    pub const SCHEME: &'static str = "memory";

    /// Creates an empty backend rooted at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty backend rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidConfig`] if the root is not a valid path.
    pub fn with_root(root: &str) -> StorageResult<Self> {
        Self::new().view(root)
    }

    /// Opens another backend over the same objects, rooted at `root`.
    ///
    /// `root` is absolute within the shared map, not relative to this
    /// backend's root.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidConfig`] if the root is not a valid path.
    pub fn view(&self, root: &str) -> StorageResult<Self> {
        let root = normalize_root(root)
            .map_err(|e| StorageError::invalid_config(Self::SCHEME, format!("root: {e}")))?;
        Ok(Self {
            info: BackendInfo::new(Self::SCHEME, root),
            nodes: Arc::clone(&self.nodes),
        })
    }

    fn abs(&self, path: &str) -> String {
        build_abs_path(self.info.root(), path)
    }

    /// Returns the first ancestor of `path` that is stored as a file.
    fn file_ancestor<'a>(&self, nodes: &BTreeMap<String, Node>, path: &'a str) -> Option<&'a str> {
        ancestors(path).find(|dir| {
            let abs = self.abs(dir.trim_end_matches('/'));
            matches!(nodes.get(&abs), Some(Node::File { .. }))
        })
    }
}

fn has_children(nodes: &BTreeMap<String, Node>, abs_dir: &str) -> bool {
    nodes
        .range::<str, _>((Bound::Excluded(abs_dir), Bound::Unbounded))
        .next()
        .is_some_and(|(key, _)| key.starts_with(abs_dir))
}

fn dir_exists(nodes: &BTreeMap<String, Node>, abs_dir: &str) -> bool {
    nodes.contains_key(abs_dir) || has_children(nodes, abs_dir)
}

impl Backend for MemoryBackend {
    fn info(&self) -> &BackendInfo {
        &self.info
    }

    fn write(&self, path: &str, data: ByteBuffer, options: WriteOptions) -> StorageResult<()> {
        if is_dir_path(path) {
            return Err(StorageError::is_a_directory(path));
        }

        let abs = self.abs(path);
        let mut nodes = self.nodes.write();

        if self.file_ancestor(&nodes, path).is_some() {
            return Err(StorageError::not_found(path));
        }
        if dir_exists(&nodes, &format!("{abs}/")) {
            return Err(StorageError::is_a_directory(path));
        }
        if options.if_not_exists && nodes.contains_key(&abs) {
            return Err(StorageError::already_exists(path));
        }

        trace!(path = %abs, len = data.len(), "memory write");
        nodes.insert(
            abs,
            Node::File {
                content: data,
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn read(&self, path: &str) -> StorageResult<ByteBuffer> {
        if is_dir_path(path) {
            return Err(StorageError::is_a_directory(path));
        }

        match self.nodes.read().get(&self.abs(path)) {
            Some(Node::File { content, .. }) => Ok(content.clone()),
            _ => Err(StorageError::not_found(path)),
        }
    }

    fn stat(&self, path: &str) -> StorageResult<Metadata> {
        if path == "/" {
            return Ok(Metadata::new(EntryMode::Dir));
        }

        let abs = self.abs(path);
        let nodes = self.nodes.read();

        if let Some(node) = nodes.get(&abs) {
            return Ok(node.metadata());
        }
        if is_dir_path(path) && has_children(&nodes, &abs) {
            return Ok(Metadata::new(EntryMode::Dir));
        }
        Err(StorageError::not_found(path))
    }

    fn delete(&self, path: &str) -> StorageResult<()> {
        let abs = self.abs(path);
        let mut nodes = self.nodes.write();

        if is_dir_path(path) && has_children(&nodes, &abs) {
            return Err(StorageError::not_empty(path));
        }

        trace!(path = %abs, "memory delete");
        nodes.remove(&abs);
        Ok(())
    }

    fn list(&self, path: &str) -> StorageResult<Vec<Entry>> {
        if !is_dir_path(path) {
            return Err(StorageError::not_a_directory(path));
        }

        let abs = self.abs(path);
        let nodes = self.nodes.read();

        if path != "/" && !dir_exists(&nodes, &abs) {
            return Err(StorageError::not_found(path));
        }

        let mut children: BTreeMap<String, Metadata> = BTreeMap::new();
        let range = nodes.range::<str, _>((Bound::Excluded(abs.as_str()), Bound::Unbounded));
        for (key, node) in range {
            let Some(rest) = key.strip_prefix(abs.as_str()) else {
                break;
            };
            match rest.find('/') {
                Some(idx) if idx + 1 < rest.len() => {
                    // Nested deeper; only the direct child directory is listed.
                    children
                        .entry(format!("{abs}{}", &rest[..=idx]))
                        .or_insert_with(|| Metadata::new(EntryMode::Dir));
                }
                _ => {
                    children.insert(key.clone(), node.metadata());
                }
            }
        }

        Ok(children
            .into_iter()
            .map(|(key, meta)| Entry::new(build_rel_path(self.info.root(), &key), meta))
            .collect())
    }

    fn create_dir(&self, path: &str) -> StorageResult<()> {
        if !is_dir_path(path) {
            return Err(StorageError::not_a_directory(path));
        }
        if path == "/" {
            return Ok(());
        }

        let mut nodes = self.nodes.write();
        let trimmed = path.trim_end_matches('/');
        if self.file_ancestor(&nodes, path).is_some()
            || matches!(nodes.get(&self.abs(trimmed)), Some(Node::File { .. }))
        {
            return Err(StorageError::not_found(path));
        }

        let now = SystemTime::now();
        for dir in ancestors(path).chain(std::iter::once(path)) {
            nodes
                .entry(self.abs(dir))
                .or_insert(Node::Dir { modified: now });
        }
        Ok(())
    }
}
