//! FILENAME: core/relational/src/join.rs
//! PURPOSE: Inner/outer key join of a driving dataset against a joined one.
//!
//! Algorithm:
//! 1. Resolve the key spec against both sides
//! 2. Output schema = projected driving columns + projected joined columns
//!    not already present
//! 3. For each driving row (in order), compute its key and look up a match
//! 4. Emit driving cells plus the matched joined cells (or nulls when outer)

use rustc_hash::FxHashSet;
use dataset::{Cell, DataSet, Row, Schema, TransformError, TransformResult};
use crate::matcher::KeyMatcher;
use crate::projection::{project_schema, Projection};

/// Joins `joined` onto `driving`.
///
/// `keys` defaults to the joined side's declared key spec. Driving rows
/// with an empty key are always dropped, even for an outer join. If either
/// input has no rows, `driving` is returned unchanged.
pub fn join(
    driving: DataSet,
    joined: &DataSet,
    keys: Option<&str>,
    outer: bool,
    projection: &Projection,
) -> TransformResult<DataSet> {
    if driving.is_empty() || joined.is_empty() {
        log::debug!("join: empty input, returning '{}' unchanged", driving.name);
        return Ok(driving);
    }

    let mut matcher = KeyMatcher::new(&driving, joined, keys)?;

    let driving_cols = projection.columns(driving.schema());
    let mut fields = project_schema(driving.schema(), &driving_cols);
    let present: FxHashSet<&str> = driving_cols
        .iter()
        .filter_map(|&col| driving.schema().field(col))
        .map(|f| f.name.as_str())
        .collect();
    let joined_cols: Vec<usize> = joined
        .schema()
        .iter()
        .enumerate()
        .filter(|(_, f)| projection.keeps(&f.name) && !present.contains(f.name.as_str()))
        .map(|(col, _)| col)
        .collect();
    fields.extend(project_schema(joined.schema(), &joined_cols));
    if fields.is_empty() {
        return Err(TransformError::EmptyProjection);
    }

    let mut output = DataSet::with_schema(driving.name.clone(), Schema::from(fields));
    output.encode = driving.encode;

    let mut driving = driving;
    let rows_in = driving.row_count();
    for mut row in driving.take_rows() {
        let key = matcher.driving_key(&row);
        if key.is_empty() {
            log::trace!("join: dropping driving row with empty key");
            continue;
        }
        let matched = matcher.find(&key);
        if matched.is_none() && !outer {
            continue;
        }

        let mut out = Row::with_capacity(output.column_count());
        for &col in &driving_cols {
            out.push(row.cell_mut(col).map(std::mem::take).unwrap_or_default());
        }
        for &col in &joined_cols {
            out.push(
                matched
                    .and_then(|m| m.cell(col))
                    .cloned()
                    .unwrap_or_else(Cell::null),
            );
        }
        output.push_row(out);
    }

    log::debug!(
        "join{}: {} driving rows -> {} rows",
        if outer { " (outer)" } else { "" },
        rows_in,
        output.row_count()
    );
    Ok(output)
}
