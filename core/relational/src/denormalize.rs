//! FILENAME: core/relational/src/denormalize.rs
//! PURPOSE: Flattens multi-valued cells into real columns.
//! CONTEXT: A field with `version_count` N becomes N columns named `name`,
//! `name_2`, ..., `name_N`. Fields marked for deletion are dropped.

use dataset::{Cell, DataSet, Row, Schema, Value};

/// Builds the flattened dataset for `source`.
///
/// Returns None when nothing needs flattening (no field has extra versions
/// and none is marked for deletion): `source` itself is then the result.
/// With `cleanup`, the source's schema and rows are cleared once the new
/// dataset is built.
pub fn denormalize(source: &mut DataSet, cleanup: bool) -> Option<DataSet> {
    let needed = source
        .schema()
        .iter()
        .any(|f| f.marked_for_deletion || f.version_count() > 1);
    if !needed {
        return None;
    }

    // (source column, version) feeding each output column
    let mut sources: Vec<(usize, usize)> = Vec::new();
    let mut schema = Schema::new();
    for (col, field) in source.schema().iter().enumerate() {
        if field.marked_for_deletion {
            continue;
        }
        for version in 0..field.version_count() {
            let name = if version == 0 {
                field.name.clone()
            } else {
                format!("{}_{}", field.name, version + 1)
            };
            // A generated name can collide with a real column; last write wins.
            let out_col = schema.add(field.flattened(name));
            if out_col == sources.len() {
                sources.push((col, version));
            } else {
                sources[out_col] = (col, version);
            }
        }
    }

    let mut output = DataSet::with_schema(source.name.clone(), schema);
    output.encode = source.encode;
    for row in source.rows() {
        output.push_row(
            sources
                .iter()
                .map(|&(col, version)| {
                    Cell::Single(row.get_version(col, version).cloned().unwrap_or(Value::Null))
                })
                .collect::<Row>(),
        );
    }

    log::debug!(
        "denormalize: '{}' {} -> {} columns, {} rows",
        source.name,
        source.column_count(),
        output.column_count(),
        output.row_count()
    );

    if cleanup {
        source.clear();
    }
    Some(output)
}

/// Consumes `source` and returns its flattened form, or `source` itself
/// when nothing needs flattening.
pub fn denormalize_into(mut source: DataSet) -> DataSet {
    match denormalize(&mut source, true) {
        Some(output) => output,
        None => source,
    }
}
