//! FILENAME: core/relational/src/union.rs
//! PURPOSE: UNION / UNION ALL of two datasets with identical column layouts.
//!
//! Deduplication keys are case-sensitive. Rows of the first input are keyed
//! trimmed; rows of the second input are keyed untrimmed. The asymmetry is
//! kept as is: downstream pipelines depend on which rows survive.

use rustc_hash::FxHashSet;
use dataset::{compute_key, DataSet, KeyFields, Row, Schema, TransformError, TransformResult};
use crate::projection::{project_schema, Projection};

/// Appends the projected rows of `a`, then those of `b`.
///
/// Unless `union_all` is set, a row is skipped when its key has already
/// been emitted; for rows of `b` the check also consults `a`'s precomputed
/// index when it was built for `keys`. `keys` defaults to `a`'s declared
/// key spec.
pub fn union(
    a: DataSet,
    b: &DataSet,
    keys: Option<&str>,
    union_all: bool,
    projection: &Projection,
) -> TransformResult<DataSet> {
    if a.column_count() != b.column_count() {
        return Err(TransformError::ColumnCountMismatch {
            left: a.column_count(),
            right: b.column_count(),
        });
    }
    for (position, (left, right)) in a.schema().names().zip(b.schema().names()).enumerate() {
        if left != right {
            return Err(TransformError::ColumnNameMismatch {
                position,
                left: left.to_string(),
                right: right.to_string(),
            });
        }
    }

    let columns = projection.columns(a.schema());
    if columns.is_empty() {
        return Err(TransformError::EmptyProjection);
    }

    let spec = keys.or(a.key_spec()).unwrap_or_default().to_string();
    let (a_keys, b_keys) = if union_all {
        (KeyFields::default(), KeyFields::default())
    } else {
        let a_keys = KeyFields::resolve(&spec, a.schema());
        if a_keys.is_empty() {
            return Err(TransformError::UnresolvedKey(spec));
        }
        (a_keys, KeyFields::resolve(&spec, b.schema()))
    };

    let mut output = DataSet::with_schema(
        a.name.clone(),
        Schema::from(project_schema(a.schema(), &columns)),
    );
    output.encode = a.encode;

    let mut a = a;
    // Taken before the rows: moving rows out drops the index.
    let a_index = if union_all {
        None
    } else {
        a.index().filter(|ix| ix.matches_spec(&spec)).cloned()
    };
    log::debug!(
        "union{}: '{}' ({} rows) + '{}' ({} rows){}",
        if union_all { " all" } else { "" },
        a.name,
        a.row_count(),
        b.name,
        b.row_count(),
        if a_index.is_some() { " using precomputed index" } else { "" }
    );

    let mut seen: FxHashSet<String> = FxHashSet::default();
    for mut row in a.take_rows() {
        if !union_all && !seen.insert(compute_key(&row, &a_keys, false, true)) {
            continue;
        }
        output.push_row(project_row(&mut row, &columns));
    }

    for row in b.rows() {
        if !union_all {
            let key = compute_key(row, &b_keys, false, false);
            let in_a = a_index.as_ref().is_some_and(|ix| ix.contains(&key));
            if in_a || !seen.insert(key) {
                continue;
            }
        }
        output.push_row(
            columns
                .iter()
                .map(|&col| row.cell(col).cloned().unwrap_or_default())
                .collect(),
        );
    }

    log::debug!("union: {} rows out", output.row_count());
    Ok(output)
}

fn project_row(row: &mut Row, columns: &[usize]) -> Row {
    columns
        .iter()
        .map(|&col| row.cell_mut(col).map(std::mem::take).unwrap_or_default())
        .collect()
}
