//! FILENAME: core/dataset/src/row.rs
//! PURPOSE: A positional sequence of cells, one per schema column.
//! CONTEXT: Rows know nothing about column names. Every column argument
//! here is a position already resolved against the owning schema.
//! Out-of-range columns behave like absent versions: reads return None,
//! writes are ignored.

use serde::{Deserialize, Serialize};
use crate::cell::Cell;
use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(columns: usize) -> Self {
        Row {
            cells: Vec::with_capacity(columns),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    pub fn cell_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Primary value of a column.
    pub fn get(&self, col: usize) -> Option<&Value> {
        self.cells.get(col).map(Cell::value)
    }

    /// Replaces the primary value of a column, keeping any secondary versions.
    pub fn set(&mut self, col: usize, value: Value) -> bool {
        match self.cells.get_mut(col) {
            Some(cell) => {
                cell.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn add_version(&mut self, col: usize, value: Value) -> bool {
        match self.cells.get_mut(col) {
            Some(cell) => {
                cell.add_version(value);
                true
            }
            None => false,
        }
    }

    pub fn get_version(&self, col: usize, n: usize) -> Option<&Value> {
        self.cells.get(col).and_then(|c| c.get_version(n))
    }

    pub fn set_version(&mut self, col: usize, n: usize, value: Value) -> bool {
        self.cells
            .get_mut(col)
            .is_some_and(|c| c.set_version(n, value))
    }

    pub fn remove_version(&mut self, col: usize, n: usize) -> Option<Value> {
        self.cells.get_mut(col).and_then(|c| c.remove_version(n))
    }

    /// Version count of a column's cell; 0 when the column is absent.
    pub fn version_count(&self, col: usize) -> usize {
        self.cells.get(col).map_or(0, Cell::version_count)
    }

    pub fn contains_value(&self, col: usize, value: &Value, ignore_case: bool, trim: bool) -> bool {
        self.cells
            .get(col)
            .is_some_and(|c| c.contains_value(value, ignore_case, trim))
    }

    pub fn index_of_version(
        &self,
        col: usize,
        value: &Value,
        ignore_case: bool,
        trim: bool,
    ) -> Option<usize> {
        self.cells
            .get(col)
            .and_then(|c| c.index_of_version(value, ignore_case, trim))
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Row { cells }
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row {
            cells: values.into_iter().map(Cell::Single).collect(),
        }
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Row {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_column_is_permissive() {
        let mut row = Row::from(vec![Value::text("1"), Value::text("A")]);
        assert_eq!(row.get(5), None);
        assert!(!row.set(5, Value::text("x")));
        assert!(!row.add_version(5, Value::text("x")));
        assert_eq!(row.version_count(5), 0);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_version_ops_by_column() {
        let mut row = Row::from(vec![Value::text("1"), Value::text("555-1")]);
        row.add_version(1, Value::text("555-2"));
        assert_eq!(row.version_count(1), 2);
        assert_eq!(row.get_version(1, 1), Some(&Value::text("555-2")));
        assert!(row.contains_value(1, &Value::text("555-2"), false, false));
        assert_eq!(row.index_of_version(1, &Value::text("555-1"), false, false), Some(0));
        assert!(row.set_version(1, 1, Value::text("555-9")));
        assert_eq!(row.remove_version(1, 1), Some(Value::text("555-9")));
    }
}
