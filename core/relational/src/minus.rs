//! FILENAME: core/relational/src/minus.rs
//! PURPOSE: Keeps the driving rows that have no key match in the subtrahend.

use dataset::{DataSet, TransformResult};
use crate::matcher::KeyMatcher;

/// Driving rows without a match in `subtrahend`, in driving order.
///
/// Key resolution and matching are the same as for `join`; rows with an
/// empty key are dropped. The output schema is the unprojected driving
/// schema. If either input has no rows, `driving` is returned unchanged.
pub fn minus(
    driving: DataSet,
    subtrahend: &DataSet,
    keys: Option<&str>,
) -> TransformResult<DataSet> {
    if driving.is_empty() || subtrahend.is_empty() {
        return Ok(driving);
    }

    let mut matcher = KeyMatcher::new(&driving, subtrahend, keys)?;
    let mut driving = driving;
    let mut output = driving.copy();
    let rows_in = driving.row_count();

    for row in driving.take_rows() {
        let key = matcher.driving_key(&row);
        if key.is_empty() {
            log::trace!("minus: dropping driving row with empty key");
            continue;
        }
        if matcher.find(&key).is_none() {
            output.push_row(row);
        }
    }

    log::debug!("minus: {} driving rows -> {} rows", rows_in, output.row_count());
    Ok(output)
}
