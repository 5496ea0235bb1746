//! Column splitting: replace one column with positional token columns
//!
//! Each cell is tokenized by semicolon; when the cell text carries a
//! bracketed sub-expression, only the bracket's interior is split. The
//! output gets one column per token position up to the widest row, named
//! `<column>_1`, `<column>_2`, ..., with nulls past the end of short rows.

use crate::error::{Error, Result};
use crate::table::{Column, Table, Value};

/// Take the interior of the first `[...]` group, if any
fn bracket_interior(s: &str) -> Option<&str> {
    let start = s.find('[')?;
    let rest = &s[start + 1..];
    let end = rest.find(']')?;
    Some(&rest[..end])
}

fn tokenize(cell: &Value) -> Vec<String> {
    if cell.is_null() {
        return Vec::new();
    }
    let text = cell.to_display_string();
    let target = bracket_interior(&text).unwrap_or(&text);
    target.split(';').map(|t| t.to_string()).collect()
}

/// Split `column` into positional sub-columns; the original column is
/// dropped and the new columns are appended
pub fn split_column(table: &Table, column: &str) -> Result<Table> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| Error::ColumnNotFound(column.to_string()))?;

    let tokens: Vec<Vec<String>> = table.columns[idx].cells.iter().map(tokenize).collect();
    let width = tokens.iter().map(Vec::len).max().unwrap_or(0);

    let mut result = Table {
        columns: table
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c.clone())
            .collect(),
    };

    for pos in 0..width {
        let cells: Vec<Value> = tokens
            .iter()
            .map(|row| {
                row.get(pos)
                    .map_or(Value::Null, |t| Value::Text(t.clone()))
            })
            .collect();
        result.push_column(Column::new(format!("{}_{}", column, pos + 1), cells))?;
    }

    Ok(result)
}
