//! FILENAME: core/dataset/src/key.rs
//! PURPOSE: Row keys and key lookups shared by every relational operator.
//! CONTEXT: A row key is the separator-less concatenation of the string
//! forms of the key fields. Values that differ only by where a substring
//! boundary falls can collide ("ab"+"c" == "a"+"bc"); that is an accepted
//! limitation, and `compute_key` is the only place that knows the encoding.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use crate::dataset::DataSet;
use crate::row::Row;
use crate::schema::Schema;

/// Caller-owned index filled lazily by `find_by_key`: key -> row position.
pub type LazyIndex = FxHashMap<String, usize>;

/// Key fields resolved against one schema, in key-spec order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFields {
    fields: Vec<(String, usize)>,
}

impl KeyFields {
    /// Resolves a comma-separated key spec against a schema.
    ///
    /// Resolution fails closed: if any named field is missing, the result
    /// is empty as a whole.
    pub fn resolve(spec: &str, schema: &Schema) -> Self {
        let mut fields = Vec::new();
        for name in spec.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match schema.index_of(name) {
                Some(col) => fields.push((name.to_string(), col)),
                None => return KeyFields::default(),
            }
        }
        KeyFields { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn contains_column(&self, col: usize) -> bool {
        self.fields.iter().any(|&(_, c)| c == col)
    }

    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields.iter().map(|&(_, col)| col)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}

/// Strips all whitespace so "a, b" and "a,b" compare equal.
pub fn normalize_key_spec(spec: &str) -> String {
    spec.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Computes the row key for `row`.
///
/// A null or empty key value contributes the literal `null` when `trim` is
/// requested and nothing otherwise.
pub fn compute_key(row: &Row, key_fields: &KeyFields, ignore_case: bool, trim: bool) -> String {
    let mut key = String::new();
    for col in key_fields.columns() {
        let text = row.get(col).map(|v| v.display_value()).unwrap_or_default();
        let text = if trim { text.trim() } else { text.as_str() };
        if text.is_empty() {
            if trim {
                key.push_str("null");
            }
        } else if ignore_case {
            key.push_str(&text.to_lowercase());
        } else {
            key.push_str(text);
        }
    }
    key
}

/// Precomputed key -> row position map for a dataset's declared key spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowIndex {
    key_spec: String,
    rows: FxHashMap<String, usize>,
}

impl RowIndex {
    /// Builds the index with case-sensitive, trimmed keys.
    /// For duplicate keys the last row wins.
    pub fn build(key_spec: &str, key_fields: &KeyFields, rows: &[Row]) -> Self {
        let mut map = FxHashMap::default();
        map.reserve(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            map.insert(compute_key(row, key_fields, false, true), pos);
        }
        RowIndex {
            key_spec: key_spec.to_string(),
            rows: map,
        }
    }

    pub fn key_spec(&self) -> &str {
        &self.key_spec
    }

    /// True when this index was built for `keys` (whitespace-insensitive).
    pub fn matches_spec(&self, keys: &str) -> bool {
        normalize_key_spec(&self.key_spec) == normalize_key_spec(keys)
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.rows.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolves a row of `dataset` by key.
///
/// With `use_index` the dataset's precomputed index is consulted. Otherwise
/// `lazy_index` is used; when it is still empty, one linear scan fills it
/// with every row's key (case-sensitive, trimmed) while searching. On that
/// scan the last row with a matching key is returned.
pub fn find_by_key<'a>(
    key: &str,
    dataset: &'a DataSet,
    use_index: bool,
    lazy_index: &mut LazyIndex,
    key_fields: &KeyFields,
) -> Option<&'a Row> {
    if use_index {
        let pos = dataset.index()?.get(key)?;
        return dataset.row(pos);
    }
    if !lazy_index.is_empty() {
        return lazy_index.get(key).and_then(|&pos| dataset.row(pos));
    }

    let mut found = None;
    lazy_index.reserve(dataset.row_count());
    for (pos, row) in dataset.rows().iter().enumerate() {
        let row_key = compute_key(row, key_fields, false, true);
        if row_key == key {
            found = Some(row);
        }
        lazy_index.insert(row_key, pos);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDef;
    use crate::scalar_type::ScalarType;
    use crate::value::Value;

    fn schema(names: &[&str]) -> Schema {
        names
            .iter()
            .map(|n| FieldDef::new(*n, ScalarType::Character))
            .collect()
    }

    #[test]
    fn test_resolve_fails_closed() {
        let s = schema(&["id", "name", "phone"]);
        let kf = KeyFields::resolve(" name , id ", &s);
        assert_eq!(kf.names().collect::<Vec<_>>(), vec!["name", "id"]);
        assert_eq!(kf.columns().collect::<Vec<_>>(), vec![1, 0]);
        assert!(KeyFields::resolve("id,missing", &s).is_empty());
        assert!(KeyFields::resolve("", &s).is_empty());
    }

    #[test]
    fn test_compute_key_concatenates_without_separator() {
        let s = schema(&["a", "b"]);
        let kf = KeyFields::resolve("a,b", &s);
        let r1 = Row::from(vec![Value::text("ab"), Value::text("c")]);
        let r2 = Row::from(vec![Value::text("a"), Value::text("bc")]);
        assert_eq!(compute_key(&r1, &kf, false, false), "abc");
        // Known collision.
        assert_eq!(compute_key(&r1, &kf, false, false), compute_key(&r2, &kf, false, false));
    }

    #[test]
    fn test_compute_key_null_handling() {
        let s = schema(&["a", "b"]);
        let kf = KeyFields::resolve("a,b", &s);
        let row = Row::from(vec![Value::Null, Value::text(" X ")]);
        assert_eq!(compute_key(&row, &kf, false, false), " X ");
        assert_eq!(compute_key(&row, &kf, false, true), "nullX");
        assert_eq!(compute_key(&row, &kf, true, true), "nullx");
    }

    #[test]
    fn test_normalize_key_spec() {
        assert_eq!(normalize_key_spec(" id , name "), "id,name");
    }
}
