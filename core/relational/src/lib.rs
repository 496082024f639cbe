//! FILENAME: core/relational/src/lib.rs
//! Relational operators over in-memory datasets.
//!
//! Every operator either hands back its driving input untouched (fast path)
//! or builds a new dataset that owns freshly built fields and rows. Row
//! lookups go through the key utilities of the `dataset` crate, so each
//! operator is linear in the driving rows.
//!
//! Layers:
//! - `definition`: Serializable configuration (what a pipeline step IS)
//! - `projection`: include/exclude column filtering
//! - `join` / `minus` / `union` / `split` / `denormalize`: the operators

pub mod definition;
pub mod denormalize;
pub mod join;
mod matcher;
pub mod minus;
pub mod projection;
pub mod split;
pub mod union;


pub use definition::*;
pub use denormalize::{denormalize, denormalize_into};
pub use join::join;
pub use minus::minus;
pub use projection::Projection;
pub use split::split;
pub use union::union;
