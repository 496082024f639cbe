//! FILENAME: core/dataset/src/cell.rs
//! PURPOSE: The multi-valued ("versioned") cell stored at one (row, column).
//! CONTEXT: Version 0 is the primary value returned by ordinary reads.
//! Versions 1..N are secondary values appended while consolidating rows.
//! Reads past the last version return None and writes to absent versions
//! are no-ops; the pivot engine grows versions speculatively and relies on
//! this.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use crate::value::{values_equal, Value};

/// Secondary versions of a cell. Most pivoted cells hold only a few.
pub type Versions = SmallVec<[Value; 2]>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// A plain cell that was never given extra versions.
    Single(Value),
    /// Primary value plus secondary versions 1..N, contiguous.
    Versioned(Value, Versions),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Single(Value::Null)
    }
}

impl Cell {
    pub fn new(value: impl Into<Value>) -> Self {
        Cell::Single(value.into())
    }

    pub fn null() -> Self {
        Cell::Single(Value::Null)
    }

    /// The primary value (version 0).
    pub fn value(&self) -> &Value {
        match self {
            Cell::Single(v) | Cell::Versioned(v, _) => v,
        }
    }

    pub fn set_value(&mut self, value: Value) {
        match self {
            Cell::Single(v) | Cell::Versioned(v, _) => *v = value,
        }
    }

    /// Total number of versions, including the primary.
    pub fn version_count(&self) -> usize {
        match self {
            Cell::Single(_) => 1,
            Cell::Versioned(_, rest) => 1 + rest.len(),
        }
    }

    /// Appends a new highest version, promoting a plain cell on first use.
    pub fn add_version(&mut self, value: Value) {
        match self {
            Cell::Single(primary) => {
                let primary = std::mem::take(primary);
                let mut rest = Versions::new();
                rest.push(value);
                *self = Cell::Versioned(primary, rest);
            }
            Cell::Versioned(_, rest) => rest.push(value),
        }
    }

    pub fn get_version(&self, n: usize) -> Option<&Value> {
        match (self, n) {
            (_, 0) => Some(self.value()),
            (Cell::Single(_), _) => None,
            (Cell::Versioned(_, rest), n) => rest.get(n - 1),
        }
    }

    /// Overwrites version `n`. Returns false, leaving the cell untouched,
    /// when that version does not exist.
    pub fn set_version(&mut self, n: usize, value: Value) -> bool {
        if n == 0 {
            self.set_value(value);
            return true;
        }
        match self {
            Cell::Single(_) => false,
            Cell::Versioned(_, rest) => match rest.get_mut(n - 1) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
        }
    }

    /// Removes version `n` and returns it.
    /// Version 0 always exists, so removing it resets the primary to Null.
    pub fn remove_version(&mut self, n: usize) -> Option<Value> {
        if n == 0 {
            return Some(std::mem::take(match self {
                Cell::Single(v) | Cell::Versioned(v, _) => v,
            }));
        }
        match self {
            Cell::Single(_) => None,
            Cell::Versioned(_, rest) if n <= rest.len() => Some(rest.remove(n - 1)),
            Cell::Versioned(..) => None,
        }
    }

    /// All versions, primary first.
    pub fn versions(&self) -> impl Iterator<Item = &Value> {
        let rest: &[Value] = match self {
            Cell::Single(_) => &[],
            Cell::Versioned(_, rest) => rest.as_slice(),
        };
        std::iter::once(self.value()).chain(rest.iter())
    }

    /// Position of the first version equal to `value`, primary first.
    pub fn index_of_version(&self, value: &Value, ignore_case: bool, trim: bool) -> Option<usize> {
        self.versions()
            .position(|v| values_equal(v, value, ignore_case, trim))
    }

    pub fn contains_value(&self, value: &Value, ignore_case: bool, trim: bool) -> bool {
        self.index_of_version(value, ignore_case, trim).is_some()
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Cell::Single(value)
    }
}
