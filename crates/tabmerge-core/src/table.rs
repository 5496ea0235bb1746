//! Core table types: tagged scalar cells and column-oriented tables

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Error, Result};

/// A single cell value with dynamic type
///
/// Columns hold a homogeneous container of this variant, so a merged column
/// may carry mixed text/number cells without coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (all numbers are kept as f64)
    Number(f64),
    /// Text value
    Text(String),
}

impl Value {
    /// Parse a raw text cell, detecting Null and Number
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Value::Null;
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            return Value::Number(n);
        }

        Value::Text(trimmed.to_string())
    }

    /// Check whether the cell is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell, if it holds a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the cell as display text (null renders as empty string)
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    /// Total ordering across cells: nulls first, then booleans, numbers and
    /// text, each compared within its own type
    pub fn compare(&self, other: &Value) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Number(_) => 2,
                Value::Text(_) => 3,
            }
        }

        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A named column of cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name (unique within one table, case-sensitive)
    pub name: String,
    /// Cell values, one per row
    pub cells: Vec<Value>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, cells: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Create a column of the given length filled with nulls
    pub fn nulls(name: impl Into<String>, len: usize) -> Self {
        Self::new(name, vec![Value::Null; len])
    }
}

/// An in-memory table: ordered named columns of equal length
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Columns in order
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a new table with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table row-wise; short rows are padded with nulls and long
    /// rows are truncated to the header width
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = names.len();
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for mut row in rows {
            row.resize(width, Value::Null);
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
        }

        Self { columns }
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Find a column position by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Append a column; its length must match the current row count unless
    /// the table has no columns yet
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if !self.columns.is_empty() && column.cells.len() != self.row_count() {
            return Err(Error::Config(format!(
                "column '{}' has {} cells but the table has {} rows",
                column.name,
                column.cells.len(),
                self.row_count()
            )));
        }
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == column.name) {
            existing.cells = column.cells;
        } else {
            self.columns.push(column);
        }
        Ok(())
    }

    /// Materialize one row as a list of cells
    pub fn row(&self, idx: usize) -> Option<Vec<Value>> {
        if idx >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.cells[idx].clone()).collect())
    }

    /// Project the table onto the named columns, in the requested order
    pub fn select(&self, names: &[String]) -> Result<Table> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let col = self
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            columns.push(col.clone());
        }
        Ok(Table { columns })
    }

    /// Keep only the rows whose stringified cell equals the given value for
    /// every (column, value) pair
    pub fn filter_equals(&self, criteria: &[(String, String)]) -> Result<Table> {
        let mut indices = Vec::with_capacity(criteria.len());
        for (name, value) in criteria {
            let idx = self
                .column_index(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            indices.push((idx, value));
        }

        let keep: Vec<usize> = (0..self.row_count())
            .filter(|&row| {
                indices
                    .iter()
                    .all(|(col, value)| self.columns[*col].cells[row].to_display_string() == **value)
            })
            .collect();

        Ok(self.take_rows(&keep))
    }

    /// Build a new table from the given row indices, in order
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                Column::new(
                    c.name.clone(),
                    indices.iter().map(|&i| c.cells[i].clone()).collect(),
                )
            })
            .collect();
        Table { columns }
    }
}
