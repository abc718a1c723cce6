//! # Unistore Testkit
//!
//! Test utilities for unistore operators.
//!
//! This crate provides:
//! - Fixtures that open operators over every built-in backend
//! - A behavior suite every backend must pass
//! - Property-based test generators using proptest
//! - Fuzz testing harnesses
//! - Stress testing utilities
//!
//! ## Usage
//!
//! ```rust
//! use unistore_testkit::prelude::*;
//!
//! for_each_backend(|_scheme, op| {
//!     check_round_trip(op);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod behavior;
pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::behavior::*;
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use stress::*;
