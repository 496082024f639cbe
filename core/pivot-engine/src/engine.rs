//! FILENAME: core/pivot-engine/src/engine.rs
//! Consolidation Engine - folds rows sharing a group key into one row.
//!
//! Algorithm:
//! 1. Resolve the group key, the leading field and the calculated fields
//! 2. Scan rows in order. A row with a new key becomes the representative
//!    of its group; a row with a known key is merged into the
//!    representative (multi-valued cells grow) and then dropped
//! 3. Calculated fields are reduced on every row before merging
//! 4. Denormalize the result so grown cells become real columns

use std::sync::Arc;
use rustc_hash::{FxHashMap, FxHashSet};
use dataset::{
    compute_key, values_equal, DataSet, FieldDef, KeyFields, Row, ScalarType, Schema,
    TransformError, TransformResult, Value,
};
use relational::{denormalize_into, Projection};
use crate::definition::{parse_calculated_fields, PivotDefinition};
use crate::reducer::{Reducer, ReducerRegistry};

// ============================================================================
// MERGE OPTIONS
// ============================================================================

/// Everything `merge_into` needs to know besides the rows themselves.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Group key fields; never merged.
    pub key_fields: KeyFields,
    pub ignore_case: bool,
    pub trim: bool,
    /// Include/exclude filter on merged fields.
    pub projection: Projection,
    /// Version cap per field, None for unbounded.
    pub max_versions: Option<usize>,
    /// Column of the leading field, if any.
    pub leading_field: Option<usize>,
    /// Columns owned by calculated fields; never merged.
    pub skip: FxHashSet<usize>,
}

impl MergeOptions {
    pub fn new(key_fields: KeyFields) -> Self {
        MergeOptions {
            key_fields,
            ignore_case: false,
            trim: false,
            projection: Projection::all(),
            max_versions: None,
            leading_field: None,
            skip: FxHashSet::default(),
        }
    }

    fn at_limit(&self, versions: usize) -> bool {
        self.max_versions.is_some_and(|max| versions >= max)
    }

    fn merges(&self, col: usize, field: &FieldDef) -> bool {
        field.visible
            && !field.scalar_type.is_large_object()
            && !self.key_fields.contains_column(col)
            && !self.skip.contains(&col)
            && self.projection.keeps(&field.name)
    }
}

// ============================================================================
// LEADING SLOTS
// ============================================================================

/// Distinct leading-field values a group has seen, in version-slot order.
///
/// Tracked apart from the leading field's own cell, which only grows when
/// that field is itself merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadingSlots {
    values: Vec<Value>,
}

impl LeadingSlots {
    /// Slots seeded with the leading value of a group's first row.
    /// Empty when no leading field is configured.
    pub fn for_group(representative: &Row, options: &MergeOptions) -> Self {
        let values = options
            .leading_field
            .map(|lead| vec![representative.get(lead).cloned().unwrap_or_default()])
            .unwrap_or_default();
        LeadingSlots { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Slot of `value`. A value not seen before takes the next slot and is
    /// remembered unless the group is already at `max_versions`.
    fn slot_for(&mut self, value: &Value, options: &MergeOptions) -> usize {
        if let Some(slot) = self
            .values
            .iter()
            .position(|v| values_equal(v, value, options.ignore_case, options.trim))
        {
            return slot;
        }
        let slot = self.values.len();
        if !options.at_limit(slot) {
            self.values.push(value.clone());
        }
        slot
    }
}

// ============================================================================
// MERGE
// ============================================================================

/// Merges `incoming` into `representative`.
///
/// Without a leading field, a value the representative's cell does not
/// already hold is appended as a new version. With a leading field, every
/// other field writes its value at the slot the incoming leading-field
/// value holds in `slots`, and a leading value the group has not seen
/// opens a new highest slot. Field version counts follow the cells, and no
/// field grows past `max_versions`.
pub fn merge_into(
    schema: &mut Schema,
    representative: &mut Row,
    incoming: &Row,
    slots: &mut LeadingSlots,
    options: &MergeOptions,
) {
    // Slot for this row, fixed before any field is touched.
    let alignment = options.leading_field.map(|lead| {
        let value = incoming.get(lead).cloned().unwrap_or_default();
        slots.slot_for(&value, options)
    });

    for col in 0..schema.len() {
        let Some(field) = schema.field_mut(col) else {
            continue;
        };
        if !options.merges(col, field) {
            continue;
        }
        let value = incoming.get(col).cloned().unwrap_or_default();
        match (alignment, options.leading_field) {
            (Some(slot), Some(lead)) if lead != col => {
                place_at(field, representative, col, slot, value, options);
            }
            _ => append_distinct(field, representative, col, value, options),
        }
    }
}

fn append_distinct(
    field: &mut FieldDef,
    representative: &mut Row,
    col: usize,
    value: Value,
    options: &MergeOptions,
) {
    let Some(cell) = representative.cell_mut(col) else {
        return;
    };
    if cell.contains_value(&value, options.ignore_case, options.trim) {
        return;
    }
    if options.at_limit(cell.version_count()) {
        log::trace!("field '{}' is full, dropping value", field.name);
        return;
    }
    cell.add_version(value);
    field.ensure_versions(cell.version_count());
}

fn place_at(
    field: &mut FieldDef,
    representative: &mut Row,
    col: usize,
    slot: usize,
    value: Value,
    options: &MergeOptions,
) {
    let Some(cell) = representative.cell_mut(col) else {
        return;
    };
    while cell.version_count() <= slot {
        if options.at_limit(cell.version_count()) {
            log::trace!("field '{}' is full, dropping value", field.name);
            return;
        }
        cell.add_version(Value::Null);
    }
    cell.set_version(slot, value);
    field.ensure_versions(cell.version_count());
}

// ============================================================================
// CALCULATED FIELDS
// ============================================================================

struct BoundCalculation {
    target: usize,
    source: usize,
    reducer: Arc<dyn Reducer>,
}

impl BoundCalculation {
    /// Folds the source value of `incoming` into `current`.
    fn reduce(&self, current: &Value, incoming: &Row, group_count: usize) -> Value {
        let value = incoming.get(self.source).cloned().unwrap_or_default();
        self.reducer.reduce(current, &value, group_count)
    }
}

/// Resolves the calculated-field spec against the dataset, appending
/// target columns that do not exist yet.
fn bind_calculations(
    dataset: &mut DataSet,
    spec: &str,
    registry: &ReducerRegistry,
) -> TransformResult<Vec<BoundCalculation>> {
    let mut bound = Vec::new();
    for calc in parse_calculated_fields(spec)? {
        let reducer = registry.get(&calc.reducer)?;
        let source = match &calc.source {
            Some(name) => Some(
                dataset
                    .index_of(name)
                    .ok_or_else(|| TransformError::UnknownField(name.clone()))?,
            ),
            None => None,
        };
        let target = match dataset.index_of(&calc.name) {
            Some(col) => col,
            None => dataset.append_column(FieldDef::new(calc.name.clone(), ScalarType::Decimal)),
        };
        bound.push(BoundCalculation {
            target,
            source: source.unwrap_or(target),
            reducer,
        });
    }
    Ok(bound)
}

// ============================================================================
// CONSOLIDATION
// ============================================================================

/// Position of a group's representative among the kept rows.
#[derive(Debug, Clone)]
struct GroupSlot {
    position: usize,
    count: usize,
    leading: LeadingSlots,
}

/// Consolidates `dataset` per `definition` and returns it denormalized.
///
/// Rows with an empty group key are kept as they are (calculated fields
/// still run on them). The output keeps first-occurrence order of keys.
pub fn consolidate(
    mut dataset: DataSet,
    definition: &PivotDefinition,
    registry: &ReducerRegistry,
) -> TransformResult<DataSet> {
    let key_fields = KeyFields::resolve(&definition.key_fields, dataset.schema());
    if key_fields.is_empty() && !definition.key_fields.trim().is_empty() {
        return Err(TransformError::UnresolvedKey(definition.key_fields.clone()));
    }

    let leading_field = match definition.leading_field.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Some(
            dataset
                .index_of(name)
                .ok_or_else(|| TransformError::UnknownField(name.to_string()))?,
        ),
        _ => None,
    };

    let calculations = bind_calculations(&mut dataset, &definition.calculated_fields, registry)?;

    let options = MergeOptions {
        key_fields,
        ignore_case: definition.ignore_case,
        trim: definition.trim,
        projection: Projection::new(&definition.include, &definition.exclude),
        max_versions: definition.version_limit(),
        leading_field,
        skip: calculations.iter().map(|c| c.target).collect(),
    };

    let rows_in = dataset.row_count();
    let (schema, rows) = dataset.parts_mut();
    let source = std::mem::take(rows);
    rows.reserve(source.len());
    let mut groups: FxHashMap<String, GroupSlot> = FxHashMap::default();

    for mut row in source {
        let key = compute_key(&row, &options.key_fields, options.ignore_case, options.trim);
        if key.is_empty() {
            reduce_first(&calculations, &mut row);
            rows.push(row);
            continue;
        }

        match groups.get_mut(&key) {
            None => {
                reduce_first(&calculations, &mut row);
                groups.insert(
                    key,
                    GroupSlot {
                        position: rows.len(),
                        count: 1,
                        leading: LeadingSlots::for_group(&row, &options),
                    },
                );
                rows.push(row);
            }
            Some(slot) => {
                slot.count += 1;
                let representative = &mut rows[slot.position];
                for calc in &calculations {
                    let current = representative.get(calc.target).cloned().unwrap_or_default();
                    let reduced = calc.reduce(&current, &row, slot.count);
                    representative.set(calc.target, reduced);
                }
                merge_into(schema, representative, &row, &mut slot.leading, &options);
            }
        }
    }

    log::debug!(
        "consolidate '{}': {} rows -> {} rows in {} groups",
        dataset.name,
        rows_in,
        dataset.row_count(),
        groups.len()
    );

    Ok(denormalize_into(dataset))
}

/// Reduces a row that starts a group (or has no group) against nothing.
fn reduce_first(calculations: &[BoundCalculation], row: &mut Row) {
    for calc in calculations {
        let reduced = calc.reduce(&Value::Null, row, 1);
        row.set(calc.target, reduced);
    }
}
