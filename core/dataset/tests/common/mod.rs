//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the dataset integration tests.

use dataset::{DataSet, FieldDef, Row, ScalarType, Schema, Value};

/// Builds a dataset of character columns from string rows.
/// An empty string cell becomes Null.
pub fn text_dataset(name: &str, columns: &[&str], rows: &[&[&str]]) -> DataSet {
    let schema: Schema = columns
        .iter()
        .map(|c| FieldDef::new(*c, ScalarType::Character))
        .collect();
    let mut ds = DataSet::with_schema(name, schema);
    for row in rows {
        ds.push_row(Row::from(
            row.iter()
                .map(|v| if v.is_empty() { Value::Null } else { Value::text(*v) })
                .collect::<Vec<_>>(),
        ));
    }
    ds
}
