//! Fuzz testing harnesses.
//!
//! These targets can be driven by cargo-fuzz or any other byte-feeding
//! fuzzer. They must never panic on any input.

use unistore_core::Operator;
use unistore_storage::path::normalize_path;

/// Fuzz target for path normalization.
///
/// Arbitrary input either normalizes or is rejected. A normalized path
/// normalizes to itself.
pub fn fuzz_normalize_path(data: &[u8]) {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(normalized) = normalize_path(input) {
        assert!(!normalized.contains("//"), "doubled slash in {normalized:?}");
        assert_eq!(
            normalize_path(&normalized).ok().as_deref(),
            Some(normalized.as_str()),
            "normalization not idempotent for {input:?}"
        );
    }
}

/// Fuzz target for operator calls.
///
/// Interprets the input as a sequence of records: one opcode byte, one
/// path byte, one length byte, then that many payload bytes. Every call
/// may fail but none may panic, and a successful write must be readable
/// right after.
pub fn fuzz_operator_calls(op: &Operator, data: &[u8]) {
    let mut offset = 0;

    while offset + 3 <= data.len() {
        let opcode = data[offset];
        let path = fuzz_path(data[offset + 1]);
        let len = usize::from(data[offset + 2]);
        offset += 3;

        let end = (offset + len).min(data.len());
        let payload = data[offset..end].to_vec();
        offset = end;

        match opcode % 6 {
            0 => {
                if op.blocking_write(&path, payload.clone()).is_ok() {
                    let read = op.blocking_read(&path).ok();
                    assert_eq!(read.as_deref(), Some(payload.as_slice()));
                }
            }
            1 => {
                let _ = op.blocking_read(&path);
            }
            2 => {
                let _ = op.stat(&path);
            }
            3 => {
                let _ = op.is_exist(&path);
            }
            4 => {
                let _ = op.blocking_delete(&path);
            }
            _ => {
                let _ = op.blocking_list(&path);
            }
        }
    }
}

/// Maps one byte onto a small path space so calls collide often.
fn fuzz_path(selector: u8) -> String {
    const NAMES: [&str; 8] = ["a", "b", "a/b", "a/c", "b/a", "a/", "b/", ""];
    NAMES[usize::from(selector) % NAMES.len()].to_string()
}
