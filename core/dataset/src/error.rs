//! FILENAME: core/dataset/src/error.rs

use thiserror::Error;

/// Errors that abort a whole operator call. Per-row anomalies are never
/// reported through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Column count mismatch: {left} columns vs {right} columns")]
    ColumnCountMismatch { left: usize, right: usize },

    #[error("Column name mismatch at position {position}: '{left}' vs '{right}'")]
    ColumnNameMismatch {
        position: usize,
        left: String,
        right: String,
    },

    #[error("Key '{0}' does not resolve against the driving dataset")]
    UnresolvedDrivingKey(String),

    #[error("Key '{0}' does not resolve against the other dataset")]
    UnresolvedOtherKey(String),

    #[error("Key '{0}' does not resolve to any field")]
    UnresolvedKey(String),

    #[error("Include/exclude projection leaves no output columns")]
    EmptyProjection,

    #[error("Unknown reducer: {0}")]
    UnknownReducer(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid calculated field: {0}")]
    InvalidCalculatedField(String),

    #[error("Row {index} out of bounds for dataset with {len} rows")]
    RowOutOfBounds { index: usize, len: usize },
}

pub type TransformResult<T> = Result<T, TransformError>;
