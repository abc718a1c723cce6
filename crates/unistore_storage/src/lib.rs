//! # Unistore Storage
//!
//! Backend trait, data model and built-in backends for Unistore.
//!
//! This crate provides the lowest-level storage abstraction. A backend
//! stores **whole objects addressed by path**: it writes, reads, stats,
//! deletes and lists them. Scheme lookup and configuration parsing live in
//! `unistore_core`.
//!
//! ## Design Principles
//!
//! - Backends are blocking; every call runs to completion on the caller's thread
//! - Paths are normalized before they reach a backend (see [`path`])
//! - Must be `Send + Sync`; backends synchronize their own state
//! - A write either lands completely or not at all
//!
//! ## Available Backends
//!
//! - [`MemoryBackend`] - For testing and ephemeral storage
//! - [`FsBackend`] - For persistent storage under a local directory
//!
//! ## Example
//!
//! ```rust
//! use unistore_storage::{Backend, ByteBuffer, MemoryBackend, WriteOptions};
//!
//! let backend = MemoryBackend::new();
//! backend.write("greeting", ByteBuffer::from("hello world"), WriteOptions::new()).unwrap();
//!
//! let meta = backend.stat("greeting").unwrap();
//! assert!(meta.is_file());
//! assert_eq!(meta.content_length(), 11);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod buffer;
mod error;
mod fs;
mod memory;
mod metadata;
pub mod path;

pub use backend::{Backend, BackendInfo, WriteOptions};
pub use buffer::ByteBuffer;
pub use error::{ErrorKind, StorageError, StorageResult};
pub use fs::FsBackend;
pub use memory::MemoryBackend;
pub use metadata::{Entry, EntryMode, Metadata};
