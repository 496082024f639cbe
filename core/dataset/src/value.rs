//! FILENAME: core/dataset/src/value.rs
//! PURPOSE: Defines the scalar values stored inside dataset cells.
//! CONTEXT: Values are compared and keyed through their string form, so
//! `display_value` is the single canonical rendering used by key
//! computation and version lookups.

use serde::{Deserialize, Serialize};

/// A single scalar held in one version slot of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Decimal(f64),
    Text(String),
    Boolean(bool),
    Binary(Vec<u8>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the canonical string form of the value.
    /// Null renders as the empty string.
    pub fn display_value(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Decimal(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            Value::Text(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Binary(bytes) => bytes.iter().map(|b| format!("{:02x}", b)).collect(),
        }
    }

    /// Coerces the value to a number, if it has a numeric reading.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Null | Value::Binary(_) => None,
            Value::Integer(i) => Some(*i as f64),
            Value::Decimal(n) => Some(*n),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Builds a numeric value, preferring `Integer` when there is no fraction.
    pub fn from_number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
            Value::Integer(n as i64)
        } else {
            Value::Decimal(n)
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Decimal(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Value equality used by version scans.
///
/// Both null is equal, exactly one null is unequal, otherwise the string
/// forms are compared, optionally trimmed and case-folded.
pub fn values_equal(a: &Value, b: &Value, ignore_case: bool, trim: bool) -> bool {
    match (a.is_null(), b.is_null()) {
        (true, true) => return true,
        (true, false) | (false, true) => return false,
        _ => {}
    }
    let left = a.display_value();
    let right = b.display_value();
    let (left, right) = if trim {
        (left.trim(), right.trim())
    } else {
        (left.as_str(), right.as_str())
    };
    if ignore_case {
        left.to_lowercase() == right.to_lowercase()
    } else {
        left == right
    }
}
