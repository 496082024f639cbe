//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE a consolidation step:
//! which fields form the group key, which fields are computed by reducers,
//! which fields are merged into multi-valued cells, and how those cells
//! grow.

use serde::{Deserialize, Serialize};
use dataset::{DataSet, TransformError, TransformResult};
use crate::engine::consolidate;
use crate::reducer::ReducerRegistry;

fn default_max_versions() -> i32 {
    -1
}

/// Configuration of one group-by / pivot consolidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotDefinition {
    /// Comma-separated group key fields.
    pub key_fields: String,

    /// `name=REDUCER;name=REDUCER(source);...`
    #[serde(default)]
    pub calculated_fields: String,

    /// Comma-separated fields to merge; empty means all.
    #[serde(default)]
    pub include: String,

    /// Comma-separated fields never merged.
    #[serde(default)]
    pub exclude: String,

    /// Upper bound on versions per field; zero or negative is unbounded.
    #[serde(default = "default_max_versions")]
    pub max_versions: i32,

    /// Field whose distinct values decide the version slot of the others.
    #[serde(default)]
    pub leading_field: Option<String>,

    #[serde(default)]
    pub ignore_case: bool,

    #[serde(default)]
    pub trim: bool,
}

impl PivotDefinition {
    pub fn new(key_fields: impl Into<String>) -> Self {
        PivotDefinition {
            key_fields: key_fields.into(),
            calculated_fields: String::new(),
            include: String::new(),
            exclude: String::new(),
            max_versions: default_max_versions(),
            leading_field: None,
            ignore_case: false,
            trim: false,
        }
    }

    pub fn run(&self, dataset: DataSet, registry: &ReducerRegistry) -> TransformResult<DataSet> {
        consolidate(dataset, self, registry)
    }

    /// The version cap as a count, or None when unbounded.
    pub fn version_limit(&self) -> Option<usize> {
        usize::try_from(self.max_versions).ok().filter(|&n| n > 0)
    }
}

// ============================================================================
// CALCULATED FIELDS
// ============================================================================

/// One `name=REDUCER(source)` entry of the calculated-field spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedField {
    /// Output field; created when the dataset does not have it.
    pub name: String,
    /// Reducer name, upper-cased.
    pub reducer: String,
    /// Input field; defaults to `name`.
    pub source: Option<String>,
}

impl CalculatedField {
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.name)
    }
}

/// Parses `name=REDUCER;name=REDUCER(source);...`.
/// Empty segments are skipped.
pub fn parse_calculated_fields(spec: &str) -> TransformResult<Vec<CalculatedField>> {
    let mut fields = Vec::new();
    for segment in spec.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let invalid = || TransformError::InvalidCalculatedField(segment.to_string());

        let (name, expression) = segment.split_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        let expression = expression.trim();
        if name.is_empty() || expression.is_empty() {
            return Err(invalid());
        }

        let (reducer, source) = match expression.split_once('(') {
            Some((reducer, rest)) => {
                let source = rest.strip_suffix(')').ok_or_else(invalid)?.trim();
                if source.contains(['(', ')']) {
                    return Err(invalid());
                }
                let source = (!source.is_empty()).then(|| source.to_string());
                (reducer.trim(), source)
            }
            None if expression.contains(')') => return Err(invalid()),
            None => (expression, None),
        };
        if reducer.is_empty() {
            return Err(invalid());
        }

        fields.push(CalculatedField {
            name: name.to_string(),
            reducer: reducer.to_uppercase(),
            source,
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_sourced() {
        let fields = parse_calculated_fields(" total = sum(amount) ; n=COUNT;; hi=Max ").unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name, "total");
        assert_eq!(fields[0].reducer, "SUM");
        assert_eq!(fields[0].source_name(), "amount");
        assert_eq!(fields[1].source_name(), "n");
        assert_eq!(fields[2].reducer, "MAX");
    }

    #[test]
    fn test_parse_rejects_malformed_segments() {
        for bad in ["total", "=SUM", "total=", "t=SUM(a", "t=SUM)a(", "t=(a)", "t=SUM(a(b))"] {
            assert_eq!(
                parse_calculated_fields(bad),
                Err(TransformError::InvalidCalculatedField(bad.to_string())),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_empty_spec_is_no_fields() {
        assert!(parse_calculated_fields("").unwrap().is_empty());
        assert!(parse_calculated_fields(" ; ").unwrap().is_empty());
    }

    #[test]
    fn test_version_limit() {
        let mut def = PivotDefinition::new("id");
        assert_eq!(def.version_limit(), None);
        def.max_versions = 0;
        assert_eq!(def.version_limit(), None);
        def.max_versions = 3;
        assert_eq!(def.version_limit(), Some(3));
    }
}
