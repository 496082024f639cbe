//! FILENAME: core/relational/src/definition.rs
//! Operator Definitions - The serializable configuration.
//!
//! These structures describe one relational step of a pipeline the way the
//! task layer stores it: key specs and include/exclude lists as plain
//! comma-separated strings, flags as booleans.

use serde::{Deserialize, Serialize};
use dataset::{DataSet, TransformResult};
use crate::denormalize::denormalize_into;
use crate::join::join;
use crate::minus::minus;
use crate::projection::Projection;
use crate::split::split;
use crate::union::union;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinDefinition {
    /// Key spec; defaults to the joined dataset's declared key spec.
    #[serde(default)]
    pub keys: Option<String>,

    #[serde(default)]
    pub outer: bool,

    #[serde(default)]
    pub include: String,

    #[serde(default)]
    pub exclude: String,
}

impl JoinDefinition {
    pub fn apply(&self, driving: DataSet, joined: &DataSet) -> TransformResult<DataSet> {
        join(
            driving,
            joined,
            self.keys.as_deref(),
            self.outer,
            &Projection::new(&self.include, &self.exclude),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinusDefinition {
    #[serde(default)]
    pub keys: Option<String>,
}

impl MinusDefinition {
    pub fn apply(&self, driving: DataSet, subtrahend: &DataSet) -> TransformResult<DataSet> {
        minus(driving, subtrahend, self.keys.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnionDefinition {
    #[serde(default)]
    pub keys: Option<String>,

    #[serde(default)]
    pub union_all: bool,

    #[serde(default)]
    pub include: String,

    #[serde(default)]
    pub exclude: String,
}

impl UnionDefinition {
    pub fn apply(&self, a: DataSet, b: &DataSet) -> TransformResult<DataSet> {
        union(
            a,
            b,
            self.keys.as_deref(),
            self.union_all,
            &Projection::new(&self.include, &self.exclude),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitDefinition {
    #[serde(default)]
    pub keys: Option<String>,
}

impl SplitDefinition {
    pub fn apply(&self, dataset: DataSet) -> Vec<(String, DataSet)> {
        split(dataset, self.keys.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenormalizeDefinition {}

impl DenormalizeDefinition {
    /// Flattens `source`, releasing it once the result is built.
    pub fn apply(&self, source: DataSet) -> DataSet {
        denormalize_into(source)
    }
}
