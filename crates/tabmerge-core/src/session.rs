//! Explicit session state for interactive callers
//!
//! A session owns the active table, a pristine copy for reset, an optional
//! lookup reference table and the last pivot result. Every transformation
//! returns a new session and leaves the receiver untouched, so a failed
//! operation never corrupts the caller's current state.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::lookup::lookup;
use crate::merge::{merge_files, MergeOptions, ProgressFn};
use crate::pivot::{pivot, sort_descending, AggFn};
use crate::split::split_column;
use crate::table::{Table, Value};

/// One interactive working context
#[derive(Debug, Clone, Default)]
pub struct Session {
    active: Option<Table>,
    pristine: Option<Table>,
    reference: Option<Table>,
    pivot: Option<Table>,
    last_values_col: Option<String>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session holding the given table
    pub fn with_table(table: Table) -> Self {
        Self {
            active: Some(table.clone()),
            pristine: Some(table),
            ..Self::default()
        }
    }

    /// The current active table, if any
    pub fn active(&self) -> Option<&Table> {
        self.active.as_ref()
    }

    /// The last pivot result, if any
    pub fn pivot_result(&self) -> Option<&Table> {
        self.pivot.as_ref()
    }

    /// The lookup reference table, if any
    pub fn reference(&self) -> Option<&Table> {
        self.reference.as_ref()
    }

    /// Column names of the active table (empty when nothing is loaded)
    pub fn column_names(&self) -> Vec<String> {
        self.active
            .as_ref()
            .map(|t| t.column_names().iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Row data of the active table, up to `limit` rows when given
    pub fn rows(&self, limit: Option<usize>) -> Vec<Vec<Value>> {
        let Some(table) = self.active.as_ref() else {
            return Vec::new();
        };
        let count = limit.unwrap_or(table.row_count()).min(table.row_count());
        (0..count).filter_map(|i| table.row(i)).collect()
    }

    /// Render the first `limit` rows of the active table as delimited text
    /// (used as the read-only sample for external assistants)
    pub fn sample_csv(&self, limit: usize) -> Result<String> {
        let table = self.require_active()?;
        let mut out = String::new();

        let header: Vec<String> = table
            .column_names()
            .iter()
            .map(|n| escape_csv(n))
            .collect();
        out.push_str(&header.join(","));
        out.push('\n');

        for row in 0..table.row_count().min(limit) {
            let cells: Vec<String> = table
                .columns
                .iter()
                .map(|c| escape_csv(&c.cells[row].to_display_string()))
                .collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        Ok(out)
    }

    fn require_active(&self) -> Result<&Table> {
        self.active
            .as_ref()
            .ok_or_else(|| Error::Config("no table loaded".to_string()))
    }

    fn require_pivot(&self) -> Result<&Table> {
        self.pivot
            .as_ref()
            .ok_or_else(|| Error::Config("no pivot result to sort".to_string()))
    }

    /// Merge the given files into a new active table; the previous pivot
    /// result is discarded and the reference table is kept
    pub fn merge(
        &self,
        paths: &[PathBuf],
        options: &MergeOptions,
        progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<Session> {
        let merged = merge_files(paths, options, progress)?;
        Ok(Session {
            active: Some(merged.clone()),
            pristine: Some(merged),
            reference: self.reference.clone(),
            pivot: None,
            last_values_col: None,
        })
    }

    /// Attach a lookup reference table
    pub fn with_reference(&self, table: Table) -> Session {
        Session {
            reference: Some(table),
            ..self.clone()
        }
    }

    /// Pivot the active table, storing the result and the values-column
    /// selection for a later descending sort
    pub fn pivot(
        &self,
        rows_col: &str,
        cols_col: &str,
        values_col: &str,
        agg: AggFn,
    ) -> Result<Session> {
        let result = pivot(self.require_active()?, rows_col, cols_col, values_col, agg)?;
        Ok(Session {
            pivot: Some(result),
            last_values_col: Some(values_col.to_string()),
            ..self.clone()
        })
    }

    /// Re-sort the last pivot result descending by its numeric column
    pub fn sort_descending(&self) -> Result<Session> {
        let sorted = sort_descending(self.require_pivot()?, self.last_values_col.as_deref())?;
        Ok(Session {
            pivot: Some(sorted),
            ..self.clone()
        })
    }

    /// Augment the active table from the reference table
    pub fn lookup(
        &self,
        primary_key: &str,
        reference_key: &str,
        value_cols: &[String],
    ) -> Result<Session> {
        let reference = self
            .reference
            .as_ref()
            .ok_or_else(|| Error::Config("no reference table loaded".to_string()))?;
        let augmented = lookup(
            self.require_active()?,
            primary_key,
            reference,
            reference_key,
            value_cols,
        )?;
        Ok(Session {
            active: Some(augmented),
            ..self.clone()
        })
    }

    /// Split a column of the active table into positional sub-columns
    pub fn split(&self, column: &str) -> Result<Session> {
        let split = split_column(self.require_active()?, column)?;
        Ok(Session {
            active: Some(split),
            ..self.clone()
        })
    }

    /// Keep only rows matching every (column, value) pair
    pub fn filter(&self, criteria: &[(String, String)]) -> Result<Session> {
        if criteria.is_empty() {
            return Err(Error::Config(
                "at least one filter column must be selected".to_string(),
            ));
        }
        let filtered = self.require_active()?.filter_equals(criteria)?;
        Ok(Session {
            active: Some(filtered),
            ..self.clone()
        })
    }

    /// Project the active table onto the named columns
    pub fn select_columns(&self, names: &[String]) -> Result<Session> {
        let selected = self.require_active()?.select(names)?;
        Ok(Session {
            active: Some(selected),
            ..self.clone()
        })
    }

    /// Restore the active table to the pristine copy from the last merge
    pub fn reset(&self) -> Session {
        Session {
            active: self.pristine.clone(),
            ..self.clone()
        }
    }
}

/// Escape a value for delimited-text rendering
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
