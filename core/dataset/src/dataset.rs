//! FILENAME: core/dataset/src/dataset.rs
//! PURPOSE: The tabular dataset: one schema, an ordered list of rows, and an
//! optional key index.
//! CONTEXT: The dataset exclusively owns its schema and rows. The row index
//! is a cache over the declared key spec and current rows, so every call
//! that can change row contents or order drops it; callers rebuild it with
//! `build_index` when they need it again.

use serde::{Deserialize, Serialize};
use crate::cell::Cell;
use crate::error::{TransformError, TransformResult};
use crate::field::FieldDef;
use crate::key::{KeyFields, RowIndex};
use crate::row::Row;
use crate::schema::Schema;
use crate::value::Value;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Display name.
    pub name: String,

    /// Passed through untouched for the persistence layer.
    #[serde(default)]
    pub encode: bool,

    #[serde(default)]
    key_spec: Option<String>,

    schema: Schema,

    rows: Vec<Row>,

    #[serde(skip)]
    index: Option<RowIndex>,
}

impl DataSet {
    pub fn new(name: impl Into<String>) -> Self {
        DataSet {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_schema(name: impl Into<String>, schema: Schema) -> Self {
        DataSet {
            name: name.into(),
            schema,
            ..Self::default()
        }
    }

    /// A new, empty dataset with this dataset's settings and field
    /// definitions. Rows and the index are never copied.
    pub fn copy(&self) -> Self {
        DataSet {
            name: self.name.clone(),
            encode: self.encode,
            key_spec: self.key_spec.clone(),
            schema: self.schema.clone(),
            rows: Vec::new(),
            index: None,
        }
    }

    /// Drops schema, rows and index to release memory once the dataset
    /// has been consumed.
    pub fn clear(&mut self) {
        self.rows = Vec::new();
        self.schema.clear();
        self.index = None;
    }

    // ========================================================================
    // SCHEMA
    // ========================================================================

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut Schema {
        self.index = None;
        &mut self.schema
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Adds a column and pads every existing row with a null cell.
    /// Re-adding an existing name replaces its definition and leaves rows alone.
    pub fn append_column(&mut self, field: FieldDef) -> usize {
        let before = self.schema.len();
        let col = self.schema.add(field);
        if col == before {
            for row in &mut self.rows {
                while row.len() <= col {
                    row.push(Cell::null());
                }
            }
        }
        col
    }

    // ========================================================================
    // ROWS
    // ========================================================================

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.index = None;
        self.rows.get_mut(index)
    }

    /// Appends a row, padding it with null cells up to the column count.
    pub fn push_row(&mut self, mut row: Row) {
        while row.len() < self.schema.len() {
            row.push(Cell::null());
        }
        self.index = None;
        self.rows.push(row);
    }

    pub fn insert_row(&mut self, index: usize, row: Row) -> TransformResult<()> {
        if index > self.rows.len() {
            return Err(self.out_of_bounds(index));
        }
        self.index = None;
        self.rows.insert(index, row);
        Ok(())
    }

    /// Replaces the row at `index`, returning the previous one.
    pub fn set_row(&mut self, index: usize, row: Row) -> TransformResult<Row> {
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or(TransformError::RowOutOfBounds { index, len })?;
        self.index = None;
        Ok(std::mem::replace(slot, row))
    }

    pub fn remove_row(&mut self, index: usize) -> TransformResult<Row> {
        if index >= self.rows.len() {
            return Err(self.out_of_bounds(index));
        }
        self.index = None;
        Ok(self.rows.remove(index))
    }

    /// Takes all rows out, leaving the schema in place.
    pub fn take_rows(&mut self) -> Vec<Row> {
        self.index = None;
        std::mem::take(&mut self.rows)
    }

    /// Schema and rows borrowed together, for edits that grow field
    /// version counts while writing cells.
    pub fn parts_mut(&mut self) -> (&mut Schema, &mut Vec<Row>) {
        self.index = None;
        (&mut self.schema, &mut self.rows)
    }

    fn out_of_bounds(&self, index: usize) -> TransformError {
        TransformError::RowOutOfBounds {
            index,
            len: self.rows.len(),
        }
    }

    // ========================================================================
    // CELLS
    // ========================================================================

    pub fn get_value(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: Value) -> bool {
        self.index = None;
        self.rows.get_mut(row).is_some_and(|r| r.set(col, value))
    }

    /// Primary values of one column, in row order.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |r| r.get(col))
    }

    /// Appends a version to a cell and raises the field's version count to
    /// cover it.
    pub fn add_version(&mut self, row: usize, col: usize, value: Value) -> bool {
        let Some(r) = self.rows.get_mut(row) else {
            return false;
        };
        if !r.add_version(col, value) {
            return false;
        }
        let count = r.version_count(col);
        if let Some(field) = self.schema.field_mut(col) {
            field.ensure_versions(count);
        }
        self.index = None;
        true
    }

    pub fn get_version(&self, row: usize, col: usize, n: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get_version(col, n))
    }

    pub fn set_version(&mut self, row: usize, col: usize, n: usize, value: Value) -> bool {
        self.index = None;
        self.rows
            .get_mut(row)
            .is_some_and(|r| r.set_version(col, n, value))
    }

    /// Removes one version of a cell. When no cell of the column needs the
    /// field's current version count any more, the count drops by one.
    pub fn remove_version(&mut self, row: usize, col: usize, n: usize) -> Option<Value> {
        let removed = self.rows.get_mut(row)?.remove_version(col, n)?;
        self.index = None;
        let widest = self
            .rows
            .iter()
            .map(|r| r.version_count(col))
            .max()
            .unwrap_or(1);
        if let Some(field) = self.schema.field_mut(col) {
            if widest < field.version_count() {
                field.remove_version();
            }
        }
        Some(removed)
    }

    pub fn version_count(&self, row: usize, col: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.version_count(col))
    }

    pub fn contains_value(
        &self,
        row: usize,
        col: usize,
        value: &Value,
        ignore_case: bool,
        trim: bool,
    ) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.contains_value(col, value, ignore_case, trim))
    }

    pub fn index_of_version(
        &self,
        row: usize,
        col: usize,
        value: &Value,
        ignore_case: bool,
        trim: bool,
    ) -> Option<usize> {
        self.rows
            .get(row)
            .and_then(|r| r.index_of_version(col, value, ignore_case, trim))
    }

    // ========================================================================
    // KEY SPEC & INDEX
    // ========================================================================

    pub fn key_spec(&self) -> Option<&str> {
        self.key_spec.as_deref()
    }

    pub fn set_key_spec(&mut self, spec: Option<String>) {
        self.key_spec = spec;
        self.index = None;
    }

    /// Key fields of the declared key spec, resolved against this schema.
    pub fn key_fields(&self) -> KeyFields {
        self.key_spec
            .as_deref()
            .map(|spec| KeyFields::resolve(spec, &self.schema))
            .unwrap_or_default()
    }

    /// Builds the row index for the declared key spec.
    pub fn build_index(&mut self) -> TransformResult<()> {
        let spec = self.key_spec.clone().unwrap_or_default();
        let key_fields = KeyFields::resolve(&spec, &self.schema);
        if key_fields.is_empty() {
            return Err(TransformError::UnresolvedKey(spec));
        }
        self.index = Some(RowIndex::build(&spec, &key_fields, &self.rows));
        Ok(())
    }

    pub fn index(&self) -> Option<&RowIndex> {
        self.index.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar_type::ScalarType;

    fn contacts() -> DataSet {
        let schema: Schema = ["id", "name", "phone"]
            .into_iter()
            .map(|n| FieldDef::new(n, ScalarType::Character))
            .collect();
        let mut ds = DataSet::with_schema("contacts", schema);
        ds.push_row(Row::from(vec![Value::text("1"), Value::text("A"), Value::text("555-1")]));
        ds.push_row(Row::from(vec![Value::text("2"), Value::text("B"), Value::text("555-3")]));
        ds
    }

    #[test]
    fn test_copy_duplicates_schema_not_rows() {
        let mut ds = contacts();
        ds.encode = true;
        ds.set_key_spec(Some("id".to_string()));
        let copy = ds.copy();
        assert_eq!(copy.schema(), ds.schema());
        assert_eq!(copy.row_count(), 0);
        assert!(copy.encode);
        assert_eq!(copy.key_spec(), Some("id"));
    }

    #[test]
    fn test_row_edits_and_bounds() {
        let mut ds = contacts();
        let old = ds
            .set_row(0, Row::from(vec![Value::text("9"), Value::text("Z"), Value::Null]))
            .unwrap();
        assert_eq!(old.get(0), Some(&Value::text("1")));
        assert_eq!(
            ds.remove_row(5),
            Err(TransformError::RowOutOfBounds { index: 5, len: 2 })
        );
        ds.insert_row(0, Row::from(vec![Value::text("0")])).unwrap();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.remove_row(0).unwrap().get(0), Some(&Value::text("0")));
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut ds = contacts();
        ds.push_row(Row::from(vec![Value::text("3")]));
        assert_eq!(ds.row(2).map(Row::len), Some(3));
    }

    #[test]
    fn test_add_version_tracks_field_count() {
        let mut ds = contacts();
        assert!(ds.add_version(0, 2, Value::text("555-2")));
        assert_eq!(ds.schema().field(2).unwrap().version_count(), 2);
        assert!(!ds.add_version(7, 2, Value::text("x")));
        assert_eq!(ds.remove_version(0, 2, 1), Some(Value::text("555-2")));
        assert_eq!(ds.schema().field(2).unwrap().version_count(), 1);
    }

    #[test]
    fn test_index_is_dropped_on_edit() {
        let mut ds = contacts();
        ds.set_key_spec(Some("id".to_string()));
        ds.build_index().unwrap();
        assert_eq!(ds.index().and_then(|ix| ix.get("2")), Some(1));
        ds.remove_row(0).unwrap();
        assert!(ds.index().is_none());
    }

    #[test]
    fn test_build_index_requires_resolvable_spec() {
        let mut ds = contacts();
        ds.set_key_spec(Some("nope".to_string()));
        assert_eq!(
            ds.build_index(),
            Err(TransformError::UnresolvedKey("nope".to_string()))
        );
    }

    #[test]
    fn test_append_column_pads_rows() {
        let mut ds = contacts();
        let col = ds.append_column(FieldDef::new("total", ScalarType::Decimal));
        assert_eq!(col, 3);
        assert!(ds.rows().iter().all(|r| r.len() == 4));
        assert_eq!(ds.get_value(1, 3), Some(&Value::Null));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut ds = contacts();
        ds.clear();
        assert_eq!(ds.column_count(), 0);
        assert_eq!(ds.row_count(), 0);
    }
}
