//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the relational integration tests.

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

/// Display strings of one column, in row order.
pub fn column_text(ds: &DataSet, name: &str) -> Vec<String> {
    let col = ds.index_of(name).expect("column exists");
    ds.column_values(col).map(Value::display_value).collect()
}

pub struct CustomerFixture;

impl CustomerFixture {
    pub fn customers() -> DataSet {
        text_dataset(
            "customers",
            &["id", "name", "city"],
            &[
                &["1", "Alice", "Oslo"],
                &["2", "Bob", "Bergen"],
                &["3", "Carol", "Oslo"],
                &["4", "Dave", ""],
            ],
        )
    }

    pub fn orders() -> DataSet {
        text_dataset(
            "orders",
            &["id", "order_no", "city"],
            &[
                &["1", "A-100", "Trondheim"],
                &["3", "A-101", "Oslo"],
                &["3", "A-102", "Oslo"],
            ],
        )
    }
}
