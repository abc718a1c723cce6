//! # Unistore FFI
//!
//! Stable C ABI for Unistore bindings.
//!
//! This crate provides:
//! - C-compatible function exports (`unistore_*`)
//! - Memory ownership conventions: every handle or buffer handed out by a
//!   `unistore_*` function is released by its matching `*_free` exactly once
//! - Error code mapping ([`UnistoreResult`]) plus a per-thread last error
//!   message
//! - Buffer management ([`UnistoreBytes`])

#![warn(missing_docs)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod metadata;
pub mod operator;
pub mod types;

pub use buffer::UnistoreBytes;
pub use error::UnistoreResult;
pub use types::{UnistoreConfig, UnistoreMetadata, UnistoreOperator};
