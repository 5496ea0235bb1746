//! Single-key left lookup from a reference table into a primary table
//!
//! Keys on both sides are stringified so type-heterogeneous keys stay
//! comparable. The primary row count is always preserved; unmatched keys
//! yield null, never an error.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::table::{Column, Table, Value};

/// Prefix applied to every looked-up result column
pub const LOOKUP_PREFIX: &str = "XLOOKUP_";

/// Augment `primary` with one new column per requested reference value
/// column, matched by stringified key; later reference rows overwrite
/// earlier ones on duplicate keys
pub fn lookup(
    primary: &Table,
    primary_key: &str,
    reference: &Table,
    reference_key: &str,
    value_cols: &[String],
) -> Result<Table> {
    if value_cols.is_empty() {
        return Err(Error::Config(
            "at least one reference value column must be selected".to_string(),
        ));
    }

    let primary_idx = primary
        .column_index(primary_key)
        .ok_or_else(|| Error::ColumnNotFound(primary_key.to_string()))?;
    let ref_key_idx = reference
        .column_index(reference_key)
        .ok_or_else(|| Error::ColumnNotFound(reference_key.to_string()))?;
    let mut value_indices = Vec::with_capacity(value_cols.len());
    for name in value_cols {
        let idx = reference
            .column_index(name)
            .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
        value_indices.push((name, idx));
    }

    let ref_keys: Vec<String> = reference.columns[ref_key_idx]
        .cells
        .iter()
        .map(Value::to_display_string)
        .collect();
    let primary_keys: Vec<String> = primary.columns[primary_idx]
        .cells
        .iter()
        .map(Value::to_display_string)
        .collect();

    let mut result = primary.clone();
    for (name, idx) in value_indices {
        // Last-write-wins on duplicate reference keys
        let mut mapping: HashMap<&str, &Value> = HashMap::with_capacity(ref_keys.len());
        for (row, key) in ref_keys.iter().enumerate() {
            mapping.insert(key.as_str(), &reference.columns[idx].cells[row]);
        }

        let cells: Vec<Value> = primary_keys
            .iter()
            .map(|key| {
                mapping
                    .get(key.as_str())
                    .map_or(Value::Null, |&v| v.clone())
            })
            .collect();
        result.push_column(Column::new(format!("{}{}", LOOKUP_PREFIX, name), cells))?;
    }

    Ok(result)
}
