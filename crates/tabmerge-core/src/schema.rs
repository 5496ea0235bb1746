//! Schema reconciliation across heterogeneous tables
//!
//! Computes the union schema of a set of tables and pads each table to
//! conform, so they can be row-concatenated without column misalignment.
//! No type coercion happens across tables: a column merged from conflicting
//! types keeps each cell's own dynamic type.

use std::collections::HashSet;

use crate::table::{Column, Table};

/// Union of column names in first-seen order across all tables
pub fn union_schema(tables: &[Table]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for table in tables {
        for column in &table.columns {
            if seen.insert(column.name.clone()) {
                names.push(column.name.clone());
            }
        }
    }
    names
}

/// Pad and reorder every table to exactly the union schema; columns a table
/// lacks are synthesized as full-null columns of its row count
pub fn reconcile(tables: Vec<Table>) -> Vec<Table> {
    let union = union_schema(&tables);

    tables
        .into_iter()
        .map(|mut table| {
            let rows = table.row_count();
            let columns = union
                .iter()
                .map(|name| match table.column_index(name) {
                    Some(idx) => std::mem::replace(
                        &mut table.columns[idx],
                        Column::new(name.clone(), Vec::new()),
                    ),
                    None => Column::nulls(name.clone(), rows),
                })
                .collect();
            Table { columns }
        })
        .collect()
}
