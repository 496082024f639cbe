//! FILENAME: core/dataset/src/scalar_type.rs
//! PURPOSE: The closed set of scalar type codes a field can carry.
//! CONTEXT: Dialect-specific spellings live in `FieldDef::native_type` and
//! belong to the SQL driver layer. This module only answers the category
//! questions the transformation core needs (e.g. large-object exclusion).
//! The remaining predicates are for the driver layer that maps native types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScalarType {
    Integer,
    Decimal,
    #[default]
    Character,
    Date,
    Time,
    Timestamp,
    Binary,
    LargeObject,
    Boolean,
    Other,
}

impl ScalarType {
    pub fn is_character(self) -> bool {
        matches!(self, ScalarType::Character)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ScalarType::Integer | ScalarType::Decimal)
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, ScalarType::Date | ScalarType::Time | ScalarType::Timestamp)
    }

    /// Large objects are never merged into multi-valued cells.
    pub fn is_large_object(self) -> bool {
        matches!(self, ScalarType::LargeObject)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, ScalarType::Boolean)
    }
}
