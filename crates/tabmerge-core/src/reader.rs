//! Format adapter, decode side
//!
//! Resolves a file extension to a format tag, then decodes the file into one
//! or more labeled tables (one per sheet for spreadsheet containers, a single
//! table with an empty label for everything else). Formats are never guessed
//! from content, with one exception: the delimiter of delimited-text files is
//! sniffed from the first 4096 bytes.

use calamine::{open_workbook, Data, Range, Reader as SheetReader, Xls, Xlsx};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::columnar::from_record_batches;
use crate::error::{Error, Result};
use crate::table::{Table, Value};

/// Number of bytes sampled for delimiter detection
const SNIFF_LEN: usize = 4096;

/// Resolved input format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Delimited text (.txt, .csv) with sniffed delimiter
    Delimited,
    /// Modern spreadsheet container (.xlsx)
    Xlsx,
    /// Legacy spreadsheet container (.xls)
    Xls,
    /// JSON array of row objects, or object of column arrays (.json)
    Json,
    /// Newline-delimited JSON (.ndjson, .jsonl)
    Ndjson,
    /// Arrow IPC file (.feather)
    Feather,
    /// Parquet file (.parquet)
    Parquet,
}

impl Format {
    /// Resolve the format from the file extension; never guesses
    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "csv" => Ok(Format::Delimited),
            "xlsx" => Ok(Format::Xlsx),
            "xls" => Ok(Format::Xls),
            "json" => Ok(Format::Json),
            "ndjson" | "jsonl" => Ok(Format::Ndjson),
            "feather" => Ok(Format::Feather),
            "parquet" => Ok(Format::Parquet),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Whether this format is a multi-sheet container
    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, Format::Xlsx | Format::Xls)
    }
}

/// A single source file to decode
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    /// File path
    pub path: PathBuf,
    /// Format resolved from the extension
    pub format: Format,
    /// 1-based row index holding the column names; rows above are discarded
    pub header_row: usize,
    /// Sheets to read from a spreadsheet container, in the given order;
    /// None means all sheets
    pub sheets: Option<Vec<String>>,
}

impl SourceDescriptor {
    /// Create a descriptor, resolving the format from the extension
    pub fn new(path: impl Into<PathBuf>, header_row: usize) -> Result<Self> {
        let path = path.into();
        let format = Format::from_path(&path)?;
        Ok(Self {
            path,
            format,
            header_row: header_row.max(1),
            sheets: None,
        })
    }

    /// Restrict a spreadsheet source to an explicit sheet subset
    pub fn with_sheets(mut self, sheets: Vec<String>) -> Self {
        if !sheets.is_empty() {
            self.sheets = Some(sheets);
        }
        self
    }
}

/// Decode a source into (label, table) pairs; the label is the sheet name
/// for spreadsheet containers and the empty string otherwise
pub fn decode(desc: &SourceDescriptor) -> Result<Vec<(String, Table)>> {
    match desc.format {
        Format::Delimited => Ok(vec![(String::new(), decode_delimited(desc)?)]),
        Format::Xlsx | Format::Xls => decode_spreadsheet(desc),
        Format::Json => Ok(vec![(String::new(), decode_json(&desc.path)?)]),
        Format::Ndjson => Ok(vec![(String::new(), decode_ndjson(&desc.path)?)]),
        Format::Feather => Ok(vec![(String::new(), decode_feather(&desc.path)?)]),
        Format::Parquet => Ok(vec![(String::new(), decode_parquet(&desc.path)?)]),
    }
}

/// Enumerate the sheet names of a spreadsheet container, trying each engine
/// candidate; None when no engine can open the file
pub fn enumerate_sheets(path: &Path, format: Format) -> Option<Vec<String>> {
    open_with_fallback(path, format)
        .ok()
        .map(|sheets| sheets.into_iter().map(|(name, _)| name).collect())
}

// --- delimited text ---

fn sniff_delimiter(sample: &[u8]) -> u8 {
    // First match wins: tab > semicolon > comma
    if sample.contains(&b'\t') {
        b'\t'
    } else if sample.contains(&b';') {
        b';'
    } else {
        b','
    }
}

fn decode_delimited(desc: &SourceDescriptor) -> Result<Table> {
    let bytes = fs::read(&desc.path).map_err(|e| Error::FileRead {
        path: desc.path.clone(),
        source: e,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    parse_delimited_str(&text, &desc.path, desc.header_row)
}

/// Parse delimited text into a table (also the test seam for this adapter)
pub fn parse_delimited_str(content: &str, source: &Path, header_row: usize) -> Result<Table> {
    let sample_len = content.len().min(SNIFF_LEN);
    let delimiter = sniff_delimiter(&content.as_bytes()[..sample_len]);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut names: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<Value>> = Vec::new();

    for (idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: source.to_path_buf(),
            source: e,
        })?;

        // Rows above the header index are skipped entirely
        if idx + 1 < header_row {
            continue;
        }
        if names.is_none() {
            names = Some(unique_names(
                record.iter().map(|s| s.trim().to_string()).collect(),
            ));
            continue;
        }
        rows.push(record.iter().map(Value::parse).collect());
    }

    let names = names.ok_or_else(|| Error::Decode {
        path: source.to_path_buf(),
        message: format!("no header row at index {}", header_row),
    })?;

    Ok(Table::from_rows(names, rows))
}

/// Make column names unique and non-empty, preserving first-seen order
fn unique_names(raw: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for (i, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("column {}", i + 1)
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut n = 2;
        while names.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        names.push(candidate);
    }
    names
}

// --- spreadsheet containers ---

type SheetRanges = Vec<(String, Range<Data>)>;

fn read_workbook<R>(path: &Path) -> std::result::Result<SheetRanges, calamine::Error>
where
    R: SheetReader<BufReader<File>>,
    calamine::Error: From<R::Error>,
{
    let mut workbook: R = open_workbook(path)?;
    let names = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        sheets.push((name, range));
    }
    Ok(sheets)
}

type EngineFn = fn(&Path) -> std::result::Result<SheetRanges, calamine::Error>;

/// Try each engine candidate in order; the first success wins and all
/// failures are aggregated into one decode error
fn open_with_fallback(path: &Path, format: Format) -> Result<SheetRanges> {
    let candidates: &[(&str, EngineFn)] = match format {
        Format::Xls => &[
            ("xls", read_workbook::<Xls<BufReader<File>>>),
            ("xlsx", read_workbook::<Xlsx<BufReader<File>>>),
        ],
        _ => &[
            ("xlsx", read_workbook::<Xlsx<BufReader<File>>>),
            ("xls", read_workbook::<Xls<BufReader<File>>>),
        ],
    };

    let mut failures = Vec::with_capacity(candidates.len());
    for (engine, open) in candidates {
        match open(path) {
            Ok(sheets) => return Ok(sheets),
            Err(e) => failures.push(format!("{} engine: {}", engine, e)),
        }
    }

    Err(Error::Decode {
        path: path.to_path_buf(),
        message: failures.join("; "),
    })
}

fn decode_spreadsheet(desc: &SourceDescriptor) -> Result<Vec<(String, Table)>> {
    let mut sheets = open_with_fallback(&desc.path, desc.format)?;

    // An explicit selection fixes both the subset and the order
    if let Some(selection) = &desc.sheets {
        let mut selected = Vec::with_capacity(selection.len());
        for wanted in selection {
            let pos = sheets
                .iter()
                .position(|(name, _)| name == wanted)
                .ok_or_else(|| Error::Decode {
                    path: desc.path.clone(),
                    message: format!("sheet '{}' not found", wanted),
                })?;
            selected.push(sheets.remove(pos));
        }
        sheets = selected;
    }

    sheets
        .into_iter()
        .map(|(name, range)| {
            let table = range_to_table(&range, desc.header_row).ok_or_else(|| Error::Decode {
                path: desc.path.clone(),
                message: format!("sheet '{}': no header row at index {}", name, desc.header_row),
            })?;
            Ok((name, table))
        })
        .collect()
}

/// None when the sheet has fewer rows than the header index
fn range_to_table(range: &Range<Data>, header_row: usize) -> Option<Table> {
    let mut rows_iter = range.rows().skip(header_row - 1);

    let names = unique_names(
        rows_iter
            .next()?
            .iter()
            .map(|d| data_to_value(d).to_display_string())
            .collect(),
    );

    let rows: Vec<Vec<Value>> = rows_iter
        .map(|row| row.iter().map(data_to_value).collect())
        .collect();

    Some(Table::from_rows(names, rows))
}

fn data_to_value(data: &Data) -> Value {
    match data {
        Data::Empty => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::Float(f) => Value::Number(*f),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::Bool(*b),
        Data::Error(e) => Value::Text(format!("{:?}", e)),
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Value::Text(s.clone()),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

// --- JSON ---

fn decode_json(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: JsonValue = serde_json::from_str(&text).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        JsonValue::Array(records) => records_to_table(&records, path),
        JsonValue::Object(map) => {
            // Columnar orientation: object of equal-length column arrays
            columns_to_table(map, path)
        }
        _ => Err(Error::Decode {
            path: path.to_path_buf(),
            message: "JSON root must be an array of objects or an object of arrays".to_string(),
        }),
    }
}

fn decode_ndjson(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut records = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<JsonValue>(line) {
            Ok(value) => records.push(value),
            // Not line-delimited after all: retry as a whole-file JSON read
            Err(line_err) => {
                return decode_json(path).map_err(|json_err| Error::Decode {
                    path: path.to_path_buf(),
                    message: format!(
                        "not valid NDJSON ({}) and not valid JSON ({})",
                        line_err, json_err
                    ),
                });
            }
        }
    }

    records_to_table(&records, path)
}

fn records_to_table(records: &[JsonValue], path: &Path) -> Result<Table> {
    // Union of object keys in first-seen order
    let mut names: Vec<String> = Vec::new();
    for record in records {
        let object = record.as_object().ok_or_else(|| Error::Decode {
            path: path.to_path_buf(),
            message: "expected an array of JSON objects".to_string(),
        })?;
        for key in object.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<Value>> = records
        .iter()
        .map(|record| {
            let object = record.as_object().expect("validated above");
            names
                .iter()
                .map(|name| object.get(name).map_or(Value::Null, json_to_value))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(names, rows))
}

fn columns_to_table(map: serde_json::Map<String, JsonValue>, path: &Path) -> Result<Table> {
    let mut names = Vec::with_capacity(map.len());
    let mut columns = Vec::with_capacity(map.len());
    let mut len: Option<usize> = None;

    for (name, value) in map {
        let array = value.as_array().ok_or_else(|| Error::Decode {
            path: path.to_path_buf(),
            message: format!("column '{}' is not a JSON array", name),
        })?;
        match len {
            None => len = Some(array.len()),
            Some(expected) if expected != array.len() => {
                return Err(Error::Decode {
                    path: path.to_path_buf(),
                    message: format!(
                        "column '{}' has {} values, expected {}",
                        name,
                        array.len(),
                        expected
                    ),
                })
            }
            _ => {}
        }
        names.push(name);
        columns.push(array.iter().map(json_to_value).collect::<Vec<_>>());
    }

    let rows: Vec<Vec<Value>> = (0..len.unwrap_or(0))
        .map(|row| columns.iter().map(|col| col[row].clone()).collect())
        .collect();

    Ok(Table::from_rows(names, rows))
}

fn json_to_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        JsonValue::String(s) => Value::Text(s.clone()),
        // Nested structures are kept as their compact JSON text
        other => Value::Text(other.to_string()),
    }
}

// --- columnar binary formats ---

fn decode_feather(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader =
        arrow::ipc::reader::FileReader::try_new(file, None).map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let schema = reader.schema();
    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    from_record_batches(schema, batches, path)
}

fn decode_parquet(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let schema = builder.schema().clone();
    let reader = builder.build().map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    from_record_batches(schema, batches, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            Format::from_path(Path::new("a.CSV")).unwrap(),
            Format::Delimited
        );
        assert_eq!(Format::from_path(Path::new("a.xlsx")).unwrap(), Format::Xlsx);
        assert_eq!(
            Format::from_path(Path::new("a.jsonl")).unwrap(),
            Format::Ndjson
        );
        assert!(matches!(
            Format::from_path(Path::new("a.docx")),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_sniff_delimiter_priority() {
        assert_eq!(sniff_delimiter(b"a\tb;c,d"), b'\t');
        assert_eq!(sniff_delimiter(b"a;b,c"), b';');
        assert_eq!(sniff_delimiter(b"a,b"), b',');
        assert_eq!(sniff_delimiter(b"single"), b',');
    }

    #[test]
    fn test_parse_delimited_semicolon() {
        let table =
            parse_delimited_str("a;b\n1;foo\n2;bar\n", Path::new("test.txt"), 1).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[0].cells[0], Value::Number(1.0));
        assert_eq!(table.columns[1].cells[1], Value::Text("bar".into()));
    }

    #[test]
    fn test_parse_delimited_header_row_skips_preamble() {
        let content = "report title\ngenerated yesterday\na,b\n1,2\n";
        let table = parse_delimited_str(content, Path::new("test.csv"), 3).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_parse_delimited_header_beyond_file() {
        let err = parse_delimited_str("a,b\n1,2\n", Path::new("test.csv"), 9);
        assert!(matches!(err, Err(Error::Decode { .. })));
    }

    #[test]
    fn test_unique_names_dedupes_and_fills_blanks() {
        let names = unique_names(vec!["a".into(), "".into(), "a".into()]);
        assert_eq!(names, vec!["a", "column 2", "a_2"]);
    }

    #[test]
    fn test_decode_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"[{"a": 1, "b": "x"}, {"b": null, "c": true}]"#).unwrap();

        let table = decode_json(&path).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b", "c"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[0].cells[1], Value::Null);
        assert_eq!(table.columns[1].cells[1], Value::Null);
        assert_eq!(table.columns[2].cells[1], Value::Bool(true));
    }

    #[test]
    fn test_decode_json_columnar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"a": [1, 2], "b": ["x", "y"]}"#).unwrap();

        let table = decode_json(&path).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[0].cells[1], Value::Number(2.0));
    }

    #[test]
    fn test_decode_ndjson_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.ndjson");
        fs::write(&path, "{\"a\": 1}\n{\"a\": 2, \"b\": \"x\"}\n").unwrap();

        let desc = SourceDescriptor::new(&path, 1).unwrap();
        let decoded = decode(&desc).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].0, "");
        assert_eq!(decoded[0].1.row_count(), 2);
        assert_eq!(decoded[0].1.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_decode_ndjson_falls_back_to_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        // A pretty-printed array is not line-delimited, but is valid JSON
        fs::write(&path, "[\n  {\"a\": 1},\n  {\"a\": 2}\n]\n").unwrap();

        let table = decode_ndjson(&path).unwrap();
        assert_eq!(table.row_count(), 2);
    }

    fn write_two_sheet_workbook(path: &Path) {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Alpha").unwrap();
        sheet.write_string(0, 0, "A").unwrap();
        sheet.write_string(0, 1, "B").unwrap();
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_string(1, 1, "x").unwrap();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Beta").unwrap();
        sheet.write_string(0, 0, "A").unwrap();
        sheet.write_number(1, 0, 2.0).unwrap();
        sheet.write_number(2, 0, 3.0).unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_decode_workbook_all_sheets_in_container_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.xlsx");
        write_two_sheet_workbook(&path);

        let desc = SourceDescriptor::new(&path, 1).unwrap();
        let decoded = decode(&desc).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].0, "Alpha");
        assert_eq!(decoded[1].0, "Beta");
        assert_eq!(decoded[0].1.column_names(), vec!["A", "B"]);
        assert_eq!(decoded[0].1.row_count(), 1);
        assert_eq!(decoded[0].1.columns[0].cells[0], Value::Number(1.0));
        assert_eq!(decoded[0].1.columns[1].cells[0], Value::Text("x".into()));
        assert_eq!(decoded[1].1.column_names(), vec!["A"]);
        assert_eq!(decoded[1].1.row_count(), 2);
    }

    #[test]
    fn test_decode_workbook_explicit_selection_fixes_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.xlsx");
        write_two_sheet_workbook(&path);

        let desc = SourceDescriptor::new(&path, 1)
            .unwrap()
            .with_sheets(vec!["Beta".into(), "Alpha".into()]);
        let decoded = decode(&desc).unwrap();
        assert_eq!(decoded[0].0, "Beta");
        assert_eq!(decoded[1].0, "Alpha");

        let desc = SourceDescriptor::new(&path, 1)
            .unwrap()
            .with_sheets(vec!["Gamma".into()]);
        match decode(&desc) {
            Err(Error::Decode { message, .. }) => {
                assert!(message.contains("sheet 'Gamma' not found"))
            }
            other => panic!("expected decode error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decode_workbook_header_row_skips_preamble() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "exported report").unwrap();
        sheet.write_string(1, 0, "A").unwrap();
        sheet.write_number(2, 0, 7.0).unwrap();
        workbook.save(&path).unwrap();

        let desc = SourceDescriptor::new(&path, 2).unwrap();
        let decoded = decode(&desc).unwrap();
        assert_eq!(decoded[0].1.column_names(), vec!["A"]);
        assert_eq!(decoded[0].1.columns[0].cells[0], Value::Number(7.0));
    }

    #[test]
    fn test_decode_workbook_header_beyond_sheet_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.xlsx");
        write_two_sheet_workbook(&path);

        let desc = SourceDescriptor::new(&path, 9).unwrap();
        match decode(&desc) {
            Err(Error::Decode { message, .. }) => {
                assert!(message.contains("no header row at index 9"))
            }
            other => panic!("expected decode error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_enumerate_sheets_lists_names_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.xlsx");
        write_two_sheet_workbook(&path);

        let names = enumerate_sheets(&path, Format::Xlsx).unwrap();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_spreadsheet_fallback_reports_both_engines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.xlsx");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"this is not a workbook").unwrap();

        let desc = SourceDescriptor::new(&path, 1).unwrap();
        match decode(&desc) {
            Err(Error::Decode { message, .. }) => {
                assert!(message.contains("xlsx engine:"));
                assert!(message.contains("xls engine:"));
            }
            other => panic!("expected decode error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_enumerate_sheets_unreadable_is_none() {
        assert!(enumerate_sheets(Path::new("does-not-exist.xlsx"), Format::Xlsx).is_none());
    }
}
