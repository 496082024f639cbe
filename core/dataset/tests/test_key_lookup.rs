//! FILENAME: tests/test_key_lookup.rs
//! Integration tests for key computation and key lookups.

mod common;

use common::text_dataset;
use dataset::{compute_key, find_by_key, KeyFields, LazyIndex, Value};

#[test]
fn test_lazy_scan_returns_last_match() {
    let ds = text_dataset("joined", &["id", "v"], &[&["1", "y"], &["2", "q"], &["1", "z"]]);
    let kf = KeyFields::resolve("id", ds.schema());
    let mut lazy = LazyIndex::default();

    let row = find_by_key("1", &ds, false, &mut lazy, &kf).unwrap();
    assert_eq!(row.get(1), Some(&Value::text("z")));
    assert_eq!(lazy.len(), 2);
}

#[test]
fn test_lazy_index_is_reused_after_first_scan() {
    let ds = text_dataset("joined", &["id", "v"], &[&["1", "y"], &["2", "q"]]);
    let kf = KeyFields::resolve("id", ds.schema());
    let mut lazy = LazyIndex::default();

    assert!(find_by_key("3", &ds, false, &mut lazy, &kf).is_none());
    assert_eq!(lazy.len(), 2);
    // A pre-filled lazy index is trusted as is.
    lazy.insert("3".to_string(), 0);
    let row = find_by_key("3", &ds, false, &mut lazy, &kf).unwrap();
    assert_eq!(row.get(0), Some(&Value::text("1")));
}

#[test]
fn test_precomputed_index_lookup() {
    let mut ds = text_dataset("joined", &["id", "v"], &[&[" 1 ", "y"], &["2", "q"]]);
    ds.set_key_spec(Some("id".to_string()));
    ds.build_index().unwrap();
    let kf = ds.key_fields();
    let mut lazy = LazyIndex::default();

    let row = find_by_key("1", &ds, true, &mut lazy, &kf).unwrap();
    assert_eq!(row.get(1), Some(&Value::text("y")));
    assert!(lazy.is_empty());
    assert!(ds.index().unwrap().matches_spec(" id "));
}

#[test]
fn test_use_index_without_index_finds_nothing() {
    let ds = text_dataset("joined", &["id"], &[&["1"]]);
    let kf = KeyFields::resolve("id", ds.schema());
    let mut lazy = LazyIndex::default();
    assert!(find_by_key("1", &ds, true, &mut lazy, &kf).is_none());
}

#[test]
fn test_compute_key_multi_field_order() {
    let ds = text_dataset("t", &["a", "b", "c"], &[&["x", "", "z"]]);
    let kf = KeyFields::resolve("c,a,b", ds.schema());
    let row = ds.row(0).unwrap();
    assert_eq!(compute_key(row, &kf, false, true), "zxnull");
    assert_eq!(compute_key(row, &kf, false, false), "zx");
}
