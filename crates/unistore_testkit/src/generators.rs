//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data that stays within
//! what every backend can address.

use proptest::prelude::*;

/// Strategy for a single path segment safe on every backend.
///
/// Segments never start with `.`, so dot segments and hidden files are
/// never generated.
pub fn segment_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_-][a-zA-Z0-9_.-]{0,15}")
        .expect("Invalid regex")
}

/// Strategy for file paths of one to four segments.
pub fn file_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..=4).prop_map(|segments| segments.join("/"))
}

/// Strategy for object content (arbitrary bytes, empty included).
pub fn content_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..4096)
}

/// Strategy for backend roots such as `/a/b`.
pub fn root_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..=3)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

/// Strategy for a set of distinct top-level file names.
pub fn distinct_names_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(segment_strategy(), 1..=max)
        .prop_map(|names| names.into_iter().collect())
}

/// Proptest configuration for operator properties.
///
/// Every case touches a backend, and the fs backend hits the disk, so the
/// case count is kept explicit and shrinking is bounded.
#[must_use]
pub fn operator_proptest_config(cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases,
        max_shrink_iters: 256,
        ..ProptestConfig::default()
    }
}
