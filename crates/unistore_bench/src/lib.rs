//! Benchmark utilities.

use rand::Rng;
use tempfile::TempDir;
use unistore_core::{Operator, OperatorConfig};

/// Object sizes the benchmarks sweep over.
pub const SIZES: [usize; 4] = [64, 1024, 16 * 1024, 256 * 1024];

/// Generate random object content of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate `count` distinct object paths spread over a few directories.
pub fn object_paths(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("bench/{:02}/{i:06}", i % 16))
        .collect()
}

/// Open a memory operator.
pub fn memory_operator() -> Operator {
    Operator::new("memory", OperatorConfig::new()).expect("memory operator")
}

/// Open an fs operator over a fresh temporary directory.
///
/// The directory lives as long as the returned guard.
pub fn fs_operator() -> (Operator, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let config = OperatorConfig::new().with("root", dir.path().to_string_lossy());
    let op = Operator::new("fs", config).expect("fs operator");
    (op, dir)
}
