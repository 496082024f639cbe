//! FILENAME: core/relational/src/projection.rs
//! PURPOSE: Include/exclude column projection shared by the operators.

use rustc_hash::FxHashSet;
use dataset::{FieldDef, Schema};

/// Output column filter built from comma-separated include/exclude lists.
///
/// A column survives when (include is empty or names it) and
/// (exclude is empty or does not name it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    include: FxHashSet<String>,
    exclude: FxHashSet<String>,
}

fn parse_names(spec: &str) -> FxHashSet<String> {
    spec.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

impl Projection {
    pub fn new(include: &str, exclude: &str) -> Self {
        Projection {
            include: parse_names(include),
            exclude: parse_names(exclude),
        }
    }

    /// A projection that keeps every column.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_selective(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    pub fn keeps(&self, name: &str) -> bool {
        (self.include.is_empty() || self.include.contains(name))
            && (self.exclude.is_empty() || !self.exclude.contains(name))
    }

    /// Positions of the surviving columns of `schema`, in column order.
    pub fn columns(&self, schema: &Schema) -> Vec<usize> {
        schema
            .iter()
            .enumerate()
            .filter(|(_, f)| self.keeps(&f.name))
            .map(|(col, _)| col)
            .collect()
    }
}

/// Clones the field definitions at `columns` into a new schema.
pub(crate) fn project_schema(schema: &Schema, columns: &[usize]) -> Vec<FieldDef> {
    columns
        .iter()
        .filter_map(|&col| schema.field(col).cloned())
        .collect()
}
