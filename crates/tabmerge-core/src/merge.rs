//! Merge engine: decode every source, attach provenance, reconcile schemas
//! and concatenate into one table
//!
//! Sources are processed in the order supplied, sheets in container order
//! (or explicit selection order). Any decode failure aborts the whole merge;
//! partial results are never returned.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::reader::{decode, enumerate_sheets, SourceDescriptor};
use crate::schema::reconcile;
use crate::table::{Column, Table, Value};

/// Name of the synthetic column recording the originating file
pub const SOURCE_FILE_COLUMN: &str = "source file";
/// Name of the synthetic column recording the originating sheet
pub const SOURCE_SHEET_COLUMN: &str = "source sheet";

/// Per-file sheet selection; a missing entry (or empty list) means all sheets
pub type SheetSelection = HashMap<PathBuf, Vec<String>>;

/// Progress callback invoked after each decoded unit of work with
/// (completed_units, total_units)
pub type ProgressFn<'a> = dyn FnMut(usize, usize) + 'a;

/// Options controlling a merge invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOptions {
    /// 1-based header row index applied to delimited and spreadsheet sources
    pub header_row: usize,
    /// Append the "source file" provenance column
    pub include_source: bool,
    /// Append the "source sheet" provenance column
    pub include_sheet: bool,
    /// Sheets to read per spreadsheet file
    pub sheet_selection: SheetSelection,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            header_row: 1,
            include_source: true,
            include_sheet: true,
            sheet_selection: SheetSelection::new(),
        }
    }
}

/// Merge the given files into one table
///
/// Returns an explicitly empty table (zero columns, zero rows) when the
/// source list is empty or yields no tables.
pub fn merge_files(
    paths: &[PathBuf],
    options: &MergeOptions,
    mut progress: Option<&mut ProgressFn<'_>>,
) -> Result<Table> {
    // Resolve every descriptor up front so unsupported formats fail before
    // any decoding starts
    let mut descriptors = Vec::with_capacity(paths.len());
    for path in paths {
        let mut desc = SourceDescriptor::new(path, options.header_row)?;
        if let Some(sheets) = options.sheet_selection.get(path) {
            desc = desc.with_sheets(sheets.clone());
        }
        descriptors.push(desc);
    }

    // Total units are known before decoding begins, so progress reporting is
    // monotonic and deterministic
    let total_units: usize = descriptors.iter().map(unit_count).sum();

    let mut queued: Vec<Table> = Vec::new();
    let mut completed = 0;
    for desc in &descriptors {
        for (label, mut table) in decode(desc)? {
            attach_provenance(&mut table, &desc.path, &label, options);
            queued.push(table);
            completed += 1;
            if let Some(report) = progress.as_deref_mut() {
                report(completed, total_units);
            }
        }
    }

    if queued.is_empty() {
        return Ok(Table::new());
    }

    Ok(concat(reconcile(queued)))
}

/// Units of work a source contributes: one per sheet to read for spreadsheet
/// containers (at least 1 when enumeration fails), 1 for everything else
fn unit_count(desc: &SourceDescriptor) -> usize {
    if !desc.format.is_spreadsheet() {
        return 1;
    }
    match &desc.sheets {
        Some(selection) => selection.len(),
        None => enumerate_sheets(&desc.path, desc.format)
            .map_or(1, |names| names.len().max(1)),
    }
}

fn attach_provenance(table: &mut Table, path: &Path, sheet_label: &str, options: &MergeOptions) {
    let rows = table.row_count();
    if options.include_source {
        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let cells = vec![Value::Text(base); rows];
        // length always matches the row count
        let _ = table.push_column(Column::new(SOURCE_FILE_COLUMN, cells));
    }
    if options.include_sheet {
        let cells = vec![Value::Text(sheet_label.to_string()); rows];
        let _ = table.push_column(Column::new(SOURCE_SHEET_COLUMN, cells));
    }
}

/// Row-concatenate tables that already share one schema, in queue order
fn concat(mut tables: Vec<Table>) -> Table {
    let mut merged = tables.remove(0);
    for table in tables {
        for (target, source) in merged.columns.iter_mut().zip(table.columns) {
            target.cells.extend(source.cells);
        }
    }
    merged
}
