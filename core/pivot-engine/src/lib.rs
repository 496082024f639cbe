//! FILENAME: core/pivot-engine/src/lib.rs
//! Group-by / pivot consolidation for in-memory datasets.
//!
//! This crate folds rows that share a group key into a single row whose
//! cells hold several versions, then flattens those versions into columns
//! with the `relational` crate's denormalize operator.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the consolidation IS)
//! - `reducer`: Aggregate reducers for calculated fields (SUM, COUNT, ...)
//! - `engine`: The row scan and merge (HOW we consolidate)

pub mod definition;
pub mod engine;
pub mod reducer;

pub use definition::{parse_calculated_fields, CalculatedField, PivotDefinition};
pub use engine::{consolidate, merge_into, LeadingSlots, MergeOptions};
pub use reducer::{Reducer, ReducerRegistry};
