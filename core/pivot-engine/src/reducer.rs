//! FILENAME: core/pivot-engine/src/reducer.rs
//! Aggregate reducers for calculated fields.
//!
//! A reducer folds one incoming value into the running value of a group:
//! `(current, incoming, group_count) -> new value`. Reducers are looked up
//! by name in an explicit `ReducerRegistry` handed to the engine; there is
//! no global registry.

use std::fmt;
use std::sync::Arc;
use rustc_hash::FxHashMap;
use dataset::{TransformError, TransformResult, Value};

pub trait Reducer: Send + Sync {
    fn reduce(&self, current: &Value, incoming: &Value, group_count: usize) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(&Value, &Value, usize) -> Value + Send + Sync,
{
    fn reduce(&self, current: &Value, incoming: &Value, group_count: usize) -> Value {
        self(current, incoming, group_count)
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Name -> reducer lookup. Names are case-insensitive.
#[derive(Clone, Default)]
pub struct ReducerRegistry {
    reducers: FxHashMap<String, Arc<dyn Reducer>>,
}

impl ReducerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding SUM, COUNT, MIN, MAX and AVG.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("SUM", sum);
        registry.register("COUNT", count);
        registry.register("MIN", min);
        registry.register("MAX", max);
        registry.register("AVG", avg);
        registry
    }

    /// Registers `reducer` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &str, reducer: impl Reducer + 'static) {
        self.reducers
            .insert(name.trim().to_uppercase(), Arc::new(reducer));
    }

    pub fn get(&self, name: &str) -> TransformResult<Arc<dyn Reducer>> {
        self.reducers
            .get(&name.trim().to_uppercase())
            .cloned()
            .ok_or_else(|| TransformError::UnknownReducer(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.reducers.contains_key(&name.trim().to_uppercase())
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.reducers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ReducerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerRegistry")
            .field("reducers", &self.names())
            .finish()
    }
}

// ============================================================================
// STANDARD REDUCERS
// ============================================================================

/// Non-numeric operands count as zero.
fn number(value: &Value) -> f64 {
    value.as_number().unwrap_or(0.0)
}

pub fn sum(current: &Value, incoming: &Value, _group_count: usize) -> Value {
    Value::from_number(number(current) + number(incoming))
}

/// Ignores both values and reports the group size.
pub fn count(_current: &Value, _incoming: &Value, group_count: usize) -> Value {
    Value::Integer(group_count as i64)
}

pub fn min(current: &Value, incoming: &Value, _group_count: usize) -> Value {
    if current.is_null() {
        return Value::from_number(number(incoming));
    }
    Value::from_number(number(current).min(number(incoming)))
}

pub fn max(current: &Value, incoming: &Value, _group_count: usize) -> Value {
    if current.is_null() {
        return Value::from_number(number(incoming));
    }
    Value::from_number(number(current).max(number(incoming)))
}

/// Running mean: `current` is the mean of the first `group_count - 1` values.
pub fn avg(current: &Value, incoming: &Value, group_count: usize) -> Value {
    let n = group_count.max(1) as f64;
    Value::from_number((number(current) * (n - 1.0) + number(incoming)) / n)
}
