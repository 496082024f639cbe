//! FILENAME: core/dataset/src/field.rs
//! PURPOSE: Column metadata for a dataset schema.

use serde::{Deserialize, Serialize};
use crate::scalar_type::ScalarType;

/// Describes one column of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Column name, unique and case-sensitive within a schema.
    pub name: String,

    pub scalar_type: ScalarType,

    /// Dialect-specific type spelling. Opaque to the core.
    #[serde(default)]
    pub native_type: String,

    #[serde(default)]
    pub precision: u32,

    #[serde(default)]
    pub scale: u32,

    #[serde(default)]
    pub size: u32,

    #[serde(default = "default_true")]
    pub nullable: bool,

    #[serde(default = "default_true")]
    pub visible: bool,

    /// Marked fields are dropped by `denormalize`.
    #[serde(default)]
    pub marked_for_deletion: bool,

    /// Upper bound of the version counts observed in this column's cells.
    #[serde(default = "default_version_count")]
    version_count: usize,

    /// Name of a related field in another schema, consumed by code generation.
    #[serde(default)]
    pub best_match: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_version_count() -> usize {
    1
}

impl FieldDef {
    pub fn new(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        FieldDef {
            name: name.into(),
            scalar_type,
            native_type: String::new(),
            precision: 0,
            scale: 0,
            size: 0,
            nullable: true,
            visible: true,
            marked_for_deletion: false,
            version_count: 1,
            best_match: None,
        }
    }

    pub fn version_count(&self) -> usize {
        self.version_count
    }

    pub fn add_version(&mut self) {
        self.version_count += 1;
    }

    /// Decrements the version count, never below 1.
    pub fn remove_version(&mut self) {
        if self.version_count > 1 {
            self.version_count -= 1;
        }
    }

    /// Raises the version count to at least `count`.
    pub fn ensure_versions(&mut self, count: usize) {
        while self.version_count < count {
            self.add_version();
        }
    }

    /// A copy of this definition renamed and reset to a single version,
    /// as used for flattened columns.
    pub fn flattened(&self, name: String) -> Self {
        FieldDef {
            name,
            version_count: 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_count_floor() {
        let mut field = FieldDef::new("phone", ScalarType::Character);
        field.remove_version();
        assert_eq!(field.version_count(), 1);
        field.add_version();
        field.add_version();
        assert_eq!(field.version_count(), 3);
        field.remove_version();
        assert_eq!(field.version_count(), 2);
    }

    #[test]
    fn test_ensure_versions_only_grows() {
        let mut field = FieldDef::new("phone", ScalarType::Character);
        field.ensure_versions(4);
        assert_eq!(field.version_count(), 4);
        field.ensure_versions(2);
        assert_eq!(field.version_count(), 4);
    }

    #[test]
    fn test_flattened_resets_versions() {
        let mut field = FieldDef::new("phone", ScalarType::Character);
        field.ensure_versions(3);
        let flat = field.flattened("phone_2".to_string());
        assert_eq!(flat.name, "phone_2");
        assert_eq!(flat.version_count(), 1);
        assert_eq!(flat.scalar_type, ScalarType::Character);
    }
}
