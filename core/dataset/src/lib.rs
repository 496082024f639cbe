//! FILENAME: core/dataset/src/lib.rs
//! PURPOSE: Library root for the in-memory tabular data model.
//! CONTEXT: Everything the relational operators and the consolidation
//! engine share lives here: values, multi-valued cells, rows, schemas,
//! datasets, row keys and the common error type.
//!
//! LAYERS:
//! - `value` / `cell` / `row`: storage, positional and version-aware
//! - `field` / `schema` / `scalar_type`: column metadata
//! - `dataset`: schema + rows + optional key index
//! - `key`: key computation and key lookups

pub mod cell;
pub mod dataset;
pub mod error;
pub mod field;
pub mod key;
pub mod row;
pub mod scalar_type;
pub mod schema;
pub mod value;

pub use cell::{Cell, Versions};
pub use dataset::DataSet;
pub use error::{TransformError, TransformResult};
pub use field::FieldDef;
pub use key::{compute_key, find_by_key, normalize_key_spec, KeyFields, LazyIndex, RowIndex};
pub use row::Row;
pub use scalar_type::ScalarType;
pub use schema::Schema;
pub use value::{values_equal, Value};
