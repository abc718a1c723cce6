//! # Unistore Core
//!
//! The unified blocking storage operator.
//!
//! This crate provides:
//! - [`OperatorConfig`] - string options that parameterize a backend
//! - [`Registry`] - scheme identifiers mapped to backend factories
//! - [`Operator`] - the façade every caller goes through
//!
//! The data model and the backends themselves live in `unistore_storage`
//! and are re-exported here.
//!
//! ## Example
//!
//! ```rust
//! use unistore_core::{Operator, OperatorConfig};
//!
//! let op = Operator::new("memory", OperatorConfig::new()).unwrap();
//! op.blocking_write("notes/today", "remember the milk").unwrap();
//!
//! let entries = op.blocking_list("notes/").unwrap();
//! assert_eq!(entries[0].path(), "notes/today");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod operator;
pub mod registry;

pub use config::OperatorConfig;
pub use operator::Operator;
pub use registry::{BackendFactory, Registry};

pub use unistore_storage::{
    Backend, BackendInfo, ByteBuffer, Entry, EntryMode, ErrorKind, Metadata, StorageError,
    StorageResult, WriteOptions,
};

/// The library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
