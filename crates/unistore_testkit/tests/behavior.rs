//! Runs the behavior suite against every built-in backend.

use tempfile::tempdir;
use unistore_core::{ErrorKind, Operator, OperatorConfig, Registry};
use unistore_storage::MemoryBackend;
use unistore_testkit::behavior::{check_config_isolation, run_all};
use unistore_testkit::fixtures::{for_each_backend, init_test_tracing, TestOperator};

#[test]
fn every_backend_passes_suite() {
    init_test_tracing();
    for_each_backend(|_scheme, op| run_all(op));
}

#[test]
fn suite_passes_under_nested_memory_root() {
    run_all(&TestOperator::memory_at("/deeply/nested/root"));
}

#[test]
fn memory_roots_are_isolated() {
    check_config_isolation(|root| {
        Operator::new("memory", OperatorConfig::new().with("root", root)).unwrap()
    });
}

#[test]
fn memory_roots_sharing_one_store_are_isolated() {
    let base = MemoryBackend::new();
    check_config_isolation(|root| Operator::from_backend(base.view(root).unwrap()));

    let whole = Operator::from_backend(base);
    assert_eq!(whole.blocking_read("one/shared/name").unwrap(), b"from one");
    assert_eq!(whole.blocking_read("two/shared/name").unwrap(), b"from two");
}

#[test]
fn memory_suite_over_shared_store() {
    let base = MemoryBackend::new();
    run_all(&Operator::from_backend(base.view("/a").unwrap()));
    run_all(&Operator::from_backend(base.view("/b").unwrap()));
}

#[test]
fn fs_roots_are_isolated() {
    let dir = tempdir().unwrap();
    check_config_isolation(|root| {
        let root = dir.path().join(root);
        Operator::new(
            "fs",
            OperatorConfig::new().with("root", root.to_string_lossy()),
        )
        .unwrap()
    });
}

#[test]
fn separate_memory_operators_do_not_share_state() {
    let one = TestOperator::memory();
    let two = TestOperator::memory();

    one.blocking_write("only-in-one", "x").unwrap();
    assert!(!two.is_exist("only-in-one").unwrap());
}

#[test]
fn fs_operators_share_a_root() {
    let dir = tempdir().unwrap();
    let config = OperatorConfig::new().with("root", dir.path().to_string_lossy());
    let writer = Operator::new("fs", config.clone()).unwrap();
    let reader = Operator::new("fs", config).unwrap();

    writer.blocking_write("shared", "visible").unwrap();
    assert_eq!(reader.blocking_read("shared").unwrap(), b"visible");
}

#[test]
fn hello_world_through_public_api() {
    let config = OperatorConfig::new().with("root", "/myroot");
    let op = Operator::new("memory", config).unwrap();

    op.blocking_write("test", "Hello, World!").unwrap();
    assert!(op.is_exist("test").unwrap());

    let meta = op.stat("test").unwrap();
    assert!(meta.is_file());
    assert_eq!(meta.content_length(), 13);

    let data = op.blocking_read("test").unwrap();
    assert_eq!(data.len(), 13);
    assert_eq!(data, b"Hello, World!");
}

#[test]
fn construction_errors() {
    let err = Operator::new("s3", OperatorConfig::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedScheme);

    let err = Operator::new("fs", OperatorConfig::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);

    let err = Operator::new("memory", OperatorConfig::new().with("bucket", "x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);

    let err = Operator::with_registry(&Registry::empty(), "memory", OperatorConfig::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedScheme);
}

#[test]
fn scheme_lookup_ignores_case() {
    let op = Operator::new("MEMORY", OperatorConfig::new()).unwrap();
    assert_eq!(op.info().scheme(), "memory");
}
