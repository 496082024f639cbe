//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the consolidation integration tests.

#![allow(dead_code)]

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

/// Display strings of one row, in column order.
pub fn row_text(ds: &DataSet, row: usize) -> Vec<String> {
    ds.row(row)
        .expect("row exists")
        .cells()
        .iter()
        .map(|c| c.value().display_value())
        .collect()
}

pub fn column_names(ds: &DataSet) -> Vec<&str> {
    ds.schema().names().collect()
}

pub struct SalesFixture;

impl SalesFixture {
    pub fn columns() -> &'static [&'static str] {
        &["region", "month", "amount"]
    }

    pub fn data() -> Vec<&'static [&'static str]> {
        vec![
            &["North", "Jan", "100"],
            &["South", "Jan", "200"],
            &["North", "Feb", "150"],
            &["North", "Mar", "50"],
            &["South", "Feb", "250"],
        ]
    }

    pub fn dataset() -> DataSet {
        text_dataset("sales", Self::columns(), &Self::data())
    }
}
