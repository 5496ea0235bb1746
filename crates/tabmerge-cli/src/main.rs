//! tabmerge CLI
//!
//! Batch front-end: merge the given tabular files and write the result in
//! the requested output format. Exits 0 on success, 1 when the merge
//! produced no rows, 2 on any error.

use clap::{ArgAction, Parser};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tabmerge_core::{merge_files, MergeOptions, OutputFormat, SheetSelection, Table};

#[derive(Parser)]
#[command(name = "tabmerge")]
#[command(about = "Merge tabular files into one output table", long_about = None)]
#[command(version)]
struct Cli {
    /// Input files (txt, csv, xls, xlsx, json, ndjson, feather, parquet)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// 1-based header row for delimited and spreadsheet inputs
    #[arg(short = 'H', long, default_value_t = 1)]
    header: usize,

    /// Omit the "source file" provenance column
    #[arg(long = "no-source", action = ArgAction::SetFalse)]
    include_source: bool,

    /// Omit the "source sheet" provenance column
    #[arg(long = "no-sheet", action = ArgAction::SetFalse)]
    include_sheet: bool,

    /// Output file path (extension is normalized to match the format)
    #[arg(short, long, default_value = "merged.json")]
    output: PathBuf,

    /// Output format: json, ndjson, parquet-snappy, parquet-gzip, feather, csv-gzip
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Restrict a workbook to specific sheets, e.g. "data.xlsx:Sheet1,Sheet3"
    /// (repeatable; workbooks without a selection contribute every sheet)
    #[arg(short, long = "sheets")]
    sheets: Vec<String>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(table) if table.row_count() == 0 => {
            eprintln!("Merge produced no rows; nothing written.");
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> tabmerge_core::Result<Table> {
    let options = MergeOptions {
        header_row: cli.header,
        include_source: cli.include_source,
        include_sheet: cli.include_sheet,
        sheet_selection: parse_sheet_selections(&cli.sheets)?,
    };

    let mut report = |done: usize, total: usize| {
        if !cli.quiet {
            eprintln!("[{}/{}] decoded", done, total);
        }
    };
    let merged = merge_files(&cli.files, &options, Some(&mut report))?;

    if merged.row_count() == 0 {
        return Ok(merged);
    }

    let path = cli.format.normalize_extension(&cli.output);
    tabmerge_core::encode(&merged, &path, cli.format)?;
    println!(
        "Saved {} rows to {} ({})",
        merged.row_count(),
        path.display(),
        cli.format.name()
    );

    Ok(merged)
}

/// Parse repeated "path:SheetA,SheetB" selections into a per-file sheet map
fn parse_sheet_selections(specs: &[String]) -> tabmerge_core::Result<SheetSelection> {
    let mut selection: SheetSelection = HashMap::new();
    for entry in specs {
        let (path, names) = entry.split_once(':').ok_or_else(|| {
            tabmerge_core::Error::Config(format!(
                "invalid sheet selection '{}', expected 'path:SheetA,SheetB'",
                entry
            ))
        })?;
        let sheets: Vec<String> = names
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if sheets.is_empty() {
            return Err(tabmerge_core::Error::Config(format!(
                "sheet selection '{}' names no sheets",
                entry
            )));
        }
        selection.insert(PathBuf::from(path), sheets);
    }
    Ok(selection)
}
