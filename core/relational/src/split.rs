//! FILENAME: core/relational/src/split.rs
//! PURPOSE: Partitions a dataset into one dataset per row key.

use rustc_hash::FxHashMap;
use dataset::{compute_key, DataSet, KeyFields};

/// Splits `dataset` by the trimmed, case-sensitive key of each row.
///
/// Buckets are returned in first-seen key order and keep the source row
/// order. Each bucket shares the source schema and is named
/// `source_name + key`. When `keys` (default: the declared key spec) does
/// not resolve, the whole dataset is returned as the single bucket `""`;
/// rows whose own key is empty share the `""` bucket.
pub fn split(dataset: DataSet, keys: Option<&str>) -> Vec<(String, DataSet)> {
    let spec = keys.or(dataset.key_spec()).unwrap_or_default().to_string();
    let key_fields = KeyFields::resolve(&spec, dataset.schema());
    if key_fields.is_empty() {
        log::debug!("split: key '{}' unresolved, single bucket", spec);
        return vec![(String::new(), dataset)];
    }

    let mut dataset = dataset;
    let rows = dataset.take_rows();
    let mut buckets: Vec<(String, DataSet)> = Vec::new();
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();

    for row in rows {
        let key = compute_key(&row, &key_fields, false, true);
        let slot = match positions.get(&key) {
            Some(&slot) => slot,
            None => {
                let mut bucket = dataset.copy();
                bucket.name = format!("{}{}", dataset.name, key);
                buckets.push((key.clone(), bucket));
                positions.insert(key, buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[slot].1.push_row(row);
    }

    log::debug!("split: '{}' into {} buckets", dataset.name, buckets.len());
    buckets
}
