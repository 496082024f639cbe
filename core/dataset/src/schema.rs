//! FILENAME: core/dataset/src/schema.rs
//! PURPOSE: Ordered, name-keyed collection of field definitions.
//! CONTEXT: Insertion order is column order. Rows are positional, so all
//! name -> column resolution goes through the schema.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use crate::field::FieldDef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FieldDef>", into = "Vec<FieldDef>")]
pub struct Schema {
    fields: Vec<FieldDef>,
    positions: FxHashMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field at the end of the schema.
    /// A field with an existing name replaces the old definition in place
    /// and keeps its column position. Returns the column position.
    pub fn add(&mut self, field: FieldDef) -> usize {
        if let Some(&col) = self.positions.get(&field.name) {
            self.fields[col] = field;
            return col;
        }
        let col = self.fields.len();
        self.positions.insert(field.name.clone(), col);
        self.fields.push(field);
        col
    }

    /// Column position of `name`, or None if the schema has no such field.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn field(&self, col: usize) -> Option<&FieldDef> {
        self.fields.get(col)
    }

    pub fn field_mut(&mut self, col: usize) -> Option<&mut FieldDef> {
        self.fields.get_mut(col)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.index_of(name).and_then(|col| self.fields.get(col))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDef> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.positions.clear();
    }
}

impl From<Vec<FieldDef>> for Schema {
    fn from(fields: Vec<FieldDef>) -> Self {
        let mut schema = Schema::new();
        for field in fields {
            schema.add(field);
        }
        schema
    }
}

impl From<Schema> for Vec<FieldDef> {
    fn from(schema: Schema) -> Self {
        schema.fields
    }
}

impl FromIterator<FieldDef> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDef>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for field in iter {
            schema.add(field);
        }
        schema
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDef;
    type IntoIter = std::slice::Iter<'a, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar_type::ScalarType;

    #[test]
    fn test_insertion_order_is_column_order() {
        let schema: Schema = ["id", "name", "phone"]
            .into_iter()
            .map(|n| FieldDef::new(n, ScalarType::Character))
            .collect();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["id", "name", "phone"]);
        assert_eq!(schema.index_of("phone"), Some(2));
        assert_eq!(schema.index_of("Phone"), None);
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut schema = Schema::new();
        schema.add(FieldDef::new("id", ScalarType::Character));
        schema.add(FieldDef::new("amount", ScalarType::Character));
        let col = schema.add(FieldDef::new("id", ScalarType::Integer));
        assert_eq!(col, 0);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field(0).map(|f| f.scalar_type), Some(ScalarType::Integer));
    }
}
