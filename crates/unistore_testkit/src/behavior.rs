//! Backend behavior suite.
//!
//! Every backend must pass these checks. Each check works under its own
//! path prefix so they can share one operator; failures panic with the
//! scheme in the message.

use unistore_core::{ByteBuffer, ErrorKind, Operator, WriteOptions};

fn tag(op: &Operator) -> String {
    format!("[{}]", op.info().scheme())
}

/// Write then read returns the same bytes, empty content included.
pub fn check_round_trip(op: &Operator) {
    let tag = tag(op);
    let cases: [(&str, Vec<u8>); 3] = [
        ("round_trip/text", b"Hello, World!".to_vec()),
        ("round_trip/empty", Vec::new()),
        ("round_trip/binary", (0..=255u8).collect()),
    ];

    for (path, data) in cases {
        op.blocking_write(path, data.clone())
            .unwrap_or_else(|e| panic!("{tag} write {path}: {e}"));
        let read = op
            .blocking_read(path)
            .unwrap_or_else(|e| panic!("{tag} read {path}: {e}"));
        assert_eq!(read.len(), data.len(), "{tag} length of {path}");
        assert_eq!(read.as_slice(), data.as_slice(), "{tag} content of {path}");
    }
}

/// Absent paths do not exist; written paths do.
pub fn check_existence(op: &Operator) {
    let tag = tag(op);
    let path = "existence/file";

    assert!(!op.is_exist(path).unwrap(), "{tag} exists before write");
    op.blocking_write(path, "x").unwrap();
    assert!(op.is_exist(path).unwrap(), "{tag} missing after write");
    assert!(op.is_exist("existence/").unwrap(), "{tag} parent dir missing");
}

/// Stat after write reports a file of the written length.
pub fn check_stat_consistency(op: &Operator) {
    let tag = tag(op);
    let path = "stat/file";
    let data = vec![42u8; 1000];

    op.blocking_write(path, data.clone()).unwrap();
    let meta = op.stat(path).unwrap();
    assert!(meta.is_file(), "{tag} not a file");
    assert!(!meta.is_dir(), "{tag} file reported as dir");
    assert_eq!(meta.content_length(), data.len() as u64, "{tag} length");
    assert_eq!(
        meta.content_length(),
        op.blocking_read(path).unwrap().len() as u64,
        "{tag} stat and read disagree"
    );

    let err = op.stat("stat/missing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound, "{tag} stat missing");
}

/// Consecutive reads without writes in between are identical.
pub fn check_idempotent_reads(op: &Operator) {
    let tag = tag(op);
    let path = "idempotent/file";

    op.blocking_write(path, "stable content").unwrap();
    let first = op.blocking_read(path).unwrap();
    let second = op.blocking_read(path).unwrap();
    assert_eq!(first, second, "{tag} reads differ");
    assert_eq!(op.stat(path).unwrap(), op.stat(path).unwrap(), "{tag} stats differ");
}

/// Overwrites replace the whole content.
pub fn check_overwrite(op: &Operator) {
    let tag = tag(op);
    let path = "overwrite/file";

    op.blocking_write(path, "a much longer first version").unwrap();
    op.blocking_write(path, "short").unwrap();
    assert_eq!(op.blocking_read(path).unwrap(), b"short", "{tag} stale tail");
    assert_eq!(op.stat(path).unwrap().content_length(), 5, "{tag} length");
}

/// Create-exclusive writes refuse to overwrite.
pub fn check_write_if_not_exists(op: &Operator) {
    let tag = tag(op);
    let path = "exclusive/file";
    let options = WriteOptions::new().if_not_exists(true);

    op.blocking_write_with(path, "first", options).unwrap();
    let err = op
        .blocking_write_with(path, ByteBuffer::from("second"), options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists, "{tag} second write");
    assert_eq!(op.blocking_read(path).unwrap(), b"first", "{tag} content");
}

/// Misaddressed operations fail with the dedicated error kinds.
pub fn check_error_kinds(op: &Operator) {
    let tag = tag(op);

    op.blocking_write("errors/file", "x").unwrap();
    let cases = [
        (
            op.blocking_read("errors/missing").unwrap_err().kind(),
            ErrorKind::NotFound,
        ),
        (
            op.blocking_write("errors/file/child", "x")
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound,
        ),
        (
            op.blocking_write("errors/", "x").unwrap_err().kind(),
            ErrorKind::IsADirectory,
        ),
        (
            op.blocking_read("errors/").unwrap_err().kind(),
            ErrorKind::IsADirectory,
        ),
        (
            op.blocking_list("errors/file").unwrap_err().kind(),
            ErrorKind::NotADirectory,
        ),
        (
            op.blocking_list("errors/nowhere/").unwrap_err().kind(),
            ErrorKind::NotFound,
        ),
        (
            op.blocking_write("errors/../escape", "x")
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidPath,
        ),
    ];

    for (i, (actual, expected)) in cases.into_iter().enumerate() {
        assert_eq!(actual, expected, "{tag} case {i}");
    }
}

/// Delete is idempotent and refuses non-empty directories.
pub fn check_delete(op: &Operator) {
    let tag = tag(op);

    op.blocking_write("delete/dir/file", "x").unwrap();
    let err = op.blocking_delete("delete/dir/").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotEmpty, "{tag} non-empty dir");

    op.blocking_delete("delete/dir/file").unwrap();
    assert!(!op.is_exist("delete/dir/file").unwrap(), "{tag} file kept");
    op.blocking_delete("delete/dir/file").unwrap();
    op.blocking_delete("delete/never-existed").unwrap();

    // Addressing an object with the wrong kind deletes nothing.
    op.blocking_write("delete/kept", "x").unwrap();
    op.blocking_create_dir("delete/kept-dir/").unwrap();
    op.blocking_delete("delete/kept/").unwrap();
    op.blocking_delete("delete/kept-dir").unwrap();
    op.blocking_delete("delete/kept/child").unwrap();
    assert!(op.is_exist("delete/kept").unwrap(), "{tag} file removed");
    assert!(op.is_exist("delete/kept-dir/").unwrap(), "{tag} dir removed");
}

/// Paths beneath an existing file are absent, not I/O failures.
pub fn check_absent_under_file(op: &Operator) {
    let tag = tag(op);

    op.blocking_write("under_file/file", "x").unwrap();
    for path in ["under_file/file/child", "under_file/file/a/b", "under_file/file/dir/"] {
        assert!(!op.is_exist(path).unwrap(), "{tag} is_exist {path}");
        assert_eq!(
            op.stat(path).unwrap_err().kind(),
            ErrorKind::NotFound,
            "{tag} stat {path}"
        );
    }
    assert_eq!(
        op.blocking_read("under_file/file/child").unwrap_err().kind(),
        ErrorKind::NotFound,
        "{tag} read below file"
    );
}

/// Names starting with a dot are ordinary objects.
pub fn check_dot_names(op: &Operator) {
    let tag = tag(op);
    let names = [".hidden", ".unistore-notes", ".unistore-x.tmp"];

    for name in names {
        op.blocking_write(&format!("dots/{name}"), name).unwrap();
    }

    let entries = op.blocking_list("dots/").unwrap();
    let listed: Vec<_> = entries.iter().map(|e| e.name()).collect();
    assert_eq!(listed, names, "{tag} dot names listed");
    for name in names {
        assert!(op.is_exist(&format!("dots/{name}")).unwrap(), "{tag} {name}");
    }
}

/// Listing returns direct children, sorted, directories marked with `/`.
pub fn check_list(op: &Operator) {
    let tag = tag(op);

    op.blocking_write("list/b.txt", "bb").unwrap();
    op.blocking_write("list/a.txt", "a").unwrap();
    op.blocking_write("list/sub/deep.txt", "ddd").unwrap();
    op.blocking_create_dir("list/empty/").unwrap();

    let entries = op.blocking_list("list/").unwrap();
    let paths: Vec<_> = entries.iter().map(|e| e.path()).collect();
    assert_eq!(
        paths,
        vec!["list/a.txt", "list/b.txt", "list/empty/", "list/sub/"],
        "{tag} listing"
    );
    assert_eq!(entries[1].metadata().content_length(), 2, "{tag} size");
    assert!(entries[2].metadata().is_dir(), "{tag} empty dir");
    assert!(entries[3].metadata().is_dir(), "{tag} sub dir");
    assert!(op.blocking_list("list/empty/").unwrap().is_empty(), "{tag} empty");
}

/// Runs every single-operator check.
pub fn run_all(op: &Operator) {
    check_round_trip(op);
    check_existence(op);
    check_stat_consistency(op);
    check_idempotent_reads(op);
    check_overwrite(op);
    check_write_if_not_exists(op);
    check_error_kinds(op);
    check_delete(op);
    check_absent_under_file(op);
    check_list(op);
    check_dot_names(op);
}

/// Operators with different roots do not observe each other's objects.
///
/// `open` builds an operator of one scheme for the given root.
pub fn check_config_isolation<F>(open: F)
where
    F: Fn(&str) -> Operator,
{
    let one = open("one");
    let two = open("two");
    let tag = tag(&one);

    one.blocking_write("shared/name", "from one").unwrap();
    assert!(!two.is_exist("shared/name").unwrap(), "{tag} leaked to two");

    two.blocking_write("shared/name", "from two").unwrap();
    assert_eq!(
        one.blocking_read("shared/name").unwrap(),
        b"from one",
        "{tag} two overwrote one"
    );
}
