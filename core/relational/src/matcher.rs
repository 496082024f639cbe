//! FILENAME: core/relational/src/matcher.rs
//! PURPOSE: Key resolution and row matching shared by join and minus.
//! CONTEXT: The other side's precomputed index is only trusted when it was
//! built for the requested key spec; otherwise a lazy index is filled on
//! the first lookup and reused for the rest of the operator call.

use dataset::{
    compute_key, find_by_key, DataSet, KeyFields, LazyIndex, Row, TransformError,
    TransformResult,
};

pub(crate) struct KeyMatcher<'a> {
    other: &'a DataSet,
    driving_keys: KeyFields,
    other_keys: KeyFields,
    use_index: bool,
    lazy: LazyIndex,
}

impl<'a> KeyMatcher<'a> {
    /// Resolves `keys` (or the other side's declared key spec) against both
    /// schemas.
    pub(crate) fn new(
        driving: &DataSet,
        other: &'a DataSet,
        keys: Option<&str>,
    ) -> TransformResult<Self> {
        let spec = keys.or(other.key_spec()).unwrap_or_default().to_string();

        let driving_keys = KeyFields::resolve(&spec, driving.schema());
        if driving_keys.is_empty() {
            return Err(TransformError::UnresolvedDrivingKey(spec));
        }
        let other_keys = KeyFields::resolve(&spec, other.schema());
        if other_keys.is_empty() {
            return Err(TransformError::UnresolvedOtherKey(spec));
        }

        let use_index = other.index().is_some_and(|ix| ix.matches_spec(&spec));
        log::debug!(
            "matching '{}' against '{}' on [{}] using {}",
            driving.name,
            other.name,
            spec,
            if use_index { "precomputed index" } else { "lazy index" }
        );

        Ok(KeyMatcher {
            other,
            driving_keys,
            other_keys,
            use_index,
            lazy: LazyIndex::default(),
        })
    }

    /// Case-sensitive, trimmed key of a driving row.
    pub(crate) fn driving_key(&self, row: &Row) -> String {
        compute_key(row, &self.driving_keys, false, true)
    }

    pub(crate) fn find(&mut self, key: &str) -> Option<&'a Row> {
        find_by_key(key, self.other, self.use_index, &mut self.lazy, &self.other_keys)
    }
}
