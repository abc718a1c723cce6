//! Stress tests for operators.
//!
//! These drive an operator under heavy load and concurrent access. The
//! concurrent runs also verify that readers never observe a partially
//! written object.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use unistore_core::Operator;

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Reads that returned content no writer ever wrote.
    pub torn_reads: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            torn_reads: 0,
            duration,
            ops_per_second,
        }
    }

    fn with_torn_reads(mut self, torn: usize) -> Self {
        self.torn_reads = torn;
        self
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {name} ===");
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Torn reads: {}", self.torn_reads);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of operations to perform (per thread for concurrent tests).
    pub operations: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Size of each object in bytes.
    pub object_size: usize,
    /// Number of distinct object paths.
    pub object_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 10_000,
            threads: 4,
            object_size: 256,
            object_count: 1_000,
        }
    }
}

fn object_path(i: usize, config: &StressConfig) -> String {
    format!("stress/{:05}", i % config.object_count.max(1))
}

/// Content made of one repeated byte, so a mix of two writes is detectable.
fn uniform(fill: u8, size: usize) -> Vec<u8> {
    vec![fill; size]
}

fn is_uniform(data: &[u8], size: usize) -> bool {
    data.len() == size && data.iter().all(|b| *b == data[0])
}

/// Run a sequential write stress test.
pub fn stress_sequential_writes(op: &Operator, config: &StressConfig) -> StressTestResult {
    let data = uniform(0xAB, config.object_size);

    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for i in 0..config.operations {
        match op.blocking_write(&object_path(i, config), data.clone()) {
            Ok(()) => successful += 1,
            Err(_) => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Run a sequential read stress test over pre-populated objects.
pub fn stress_sequential_reads(op: &Operator, config: &StressConfig) -> StressTestResult {
    let data = uniform(0xAB, config.object_size);
    for i in 0..config.object_count {
        let _ = op.blocking_write(&object_path(i, config), data.clone());
    }

    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for i in 0..config.operations {
        match op.blocking_read(&object_path(i, config)) {
            Ok(read) if read.len() == config.object_size => successful += 1,
            _ => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Run a mixed write/read/stat stress test.
pub fn stress_mixed_operations(op: &Operator, config: &StressConfig) -> StressTestResult {
    let data = uniform(0xAB, config.object_size);

    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for i in 0..config.operations {
        let path = object_path(i, config);

        let ok = match i % 3 {
            0 => op.blocking_write(&path, data.clone()).is_ok(),
            1 => match op.blocking_read(&path) {
                Ok(_) => true,
                Err(e) => e.is_not_found(),
            },
            _ => op.is_exist(&path).is_ok(),
        };

        if ok {
            successful += 1;
        } else {
            failed += 1;
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Run concurrent readers against a fixed set of objects.
pub fn stress_concurrent_reads(op: Arc<Operator>, config: &StressConfig) -> StressTestResult {
    let data = uniform(0xAB, config.object_size);
    for i in 0..config.object_count {
        let _ = op.blocking_write(&object_path(i, config), data.clone());
    }

    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();
    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let op = Arc::clone(&op);
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);
            let config = config.clone();

            thread::spawn(move || {
                for i in 0..config.operations {
                    match op.blocking_read(&object_path(t * config.operations + i, &config)) {
                        Ok(_) => successful.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                    };
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

/// Run concurrent writers and readers on the same paths.
///
/// Each writer thread fills objects with its own byte value. Readers check
/// that every successful read is entirely one writer's content; anything
/// else is counted as a torn read.
pub fn stress_concurrent_overwrites(op: Arc<Operator>, config: &StressConfig) -> StressTestResult {
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let torn = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();
    let mut handles = Vec::with_capacity(config.threads * 2);

    for t in 0..config.threads {
        let op = Arc::clone(&op);
        let successful = Arc::clone(&successful);
        let failed = Arc::clone(&failed);
        let config = config.clone();
        let fill = u8::try_from(t % 255).unwrap_or(0) + 1;

        handles.push(thread::spawn(move || {
            let data = uniform(fill, config.object_size);
            for i in 0..config.operations {
                match op.blocking_write(&object_path(i, &config), data.clone()) {
                    Ok(()) => successful.fetch_add(1, Ordering::Relaxed),
                    Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                };
            }
        }));
    }

    for _ in 0..config.threads {
        let op = Arc::clone(&op);
        let successful = Arc::clone(&successful);
        let failed = Arc::clone(&failed);
        let torn = Arc::clone(&torn);
        let config = config.clone();

        handles.push(thread::spawn(move || {
            for i in 0..config.operations {
                match op.blocking_read(&object_path(i, &config)) {
                    Ok(read) => {
                        if !is_uniform(&read, config.object_size) {
                            torn.fetch_add(1, Ordering::Relaxed);
                        }
                        successful.fetch_add(1, Ordering::Relaxed);
                    }
                    // The object may not be written yet.
                    Err(e) if e.is_not_found() => {
                        successful.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(_) => {
                        failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
    .with_torn_reads(torn.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestOperator;

    fn small() -> StressConfig {
        StressConfig {
            operations: 1_000,
            object_count: 100,
            object_size: 64,
            ..Default::default()
        }
    }

    #[test]
    fn test_sequential_writes() {
        let op = TestOperator::memory();
        let result = stress_sequential_writes(&op, &small());
        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.successful_ops, 1_000);
    }

    #[test]
    fn test_sequential_reads() {
        let op = TestOperator::memory();
        let result = stress_sequential_reads(&op, &small());
        assert_eq!(result.failed_ops, 0);
    }

    #[test]
    fn test_mixed_operations() {
        let op = TestOperator::memory();
        let result = stress_mixed_operations(&op, &small());
        assert_eq!(result.failed_ops, 0);
    }

    #[test]
    fn test_concurrent_reads() {
        let op = Arc::new(TestOperator::memory().op);
        let result = stress_concurrent_reads(op, &small());
        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.successful_ops, 4_000);
    }

    #[test]
    fn test_concurrent_overwrites_memory() {
        let op = Arc::new(TestOperator::memory().op);
        let config = StressConfig {
            operations: 500,
            object_count: 10,
            object_size: 1024,
            threads: 4,
        };

        let result = stress_concurrent_overwrites(op, &config);
        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.torn_reads, 0);
    }

    #[test]
    fn test_concurrent_overwrites_fs() {
        let fixture = TestOperator::fs();
        let op = Arc::new(fixture.op.clone());
        let config = StressConfig {
            operations: 100,
            object_count: 5,
            object_size: 4096,
            threads: 4,
        };

        let result = stress_concurrent_overwrites(op, &config);
        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.torn_reads, 0);
    }
}
