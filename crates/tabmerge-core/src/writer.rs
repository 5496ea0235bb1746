//! Format adapter, encode side
//!
//! Writes a table to one of the produced formats. Encode failures are always
//! surfaced as errors naming the target path; a failed format is never
//! silently downgraded to a different one.

use flate2::write::GzEncoder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::columnar::to_record_batch;
use crate::error::{Error, Result};
use crate::table::{Table, Value};

/// Target serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of row objects (the default)
    Json,
    /// One compact JSON object per line, no enclosing array
    Ndjson,
    /// Parquet with snappy compression
    ParquetSnappy,
    /// Parquet with gzip compression
    ParquetGzip,
    /// Arrow IPC file
    Feather,
    /// Gzip-compressed delimited text
    CsvGzip,
}

impl OutputFormat {
    /// The selector name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Ndjson => "ndjson",
            OutputFormat::ParquetSnappy => "parquet-snappy",
            OutputFormat::ParquetGzip => "parquet-gzip",
            OutputFormat::Feather => "feather",
            OutputFormat::CsvGzip => "csv-gzip",
        }
    }

    /// Force the output path extension to match the chosen format
    pub fn normalize_extension(&self, path: &Path) -> PathBuf {
        let lower = path.to_string_lossy().to_lowercase();
        match self {
            OutputFormat::Json => path.to_path_buf(),
            OutputFormat::Ndjson if !lower.ends_with(".ndjson") => path.with_extension("ndjson"),
            OutputFormat::ParquetSnappy | OutputFormat::ParquetGzip
                if !lower.ends_with(".parquet") =>
            {
                path.with_extension("parquet")
            }
            OutputFormat::Feather if !lower.ends_with(".feather") => {
                path.with_extension("feather")
            }
            OutputFormat::CsvGzip
                if !lower.ends_with(".csv.gz") && !lower.ends_with(".csv") =>
            {
                path.with_extension("csv.gz")
            }
            _ => path.to_path_buf(),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "ndjson" => Ok(OutputFormat::Ndjson),
            "parquet-snappy" => Ok(OutputFormat::ParquetSnappy),
            "parquet-gzip" => Ok(OutputFormat::ParquetGzip),
            "feather" => Ok(OutputFormat::Feather),
            "csv-gzip" => Ok(OutputFormat::CsvGzip),
            other => Err(Error::Config(format!("unknown output format '{}'", other))),
        }
    }
}

/// Write a table to the target path in the given format
pub fn encode(table: &Table, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => encode_json(table, path),
        OutputFormat::Ndjson => encode_ndjson(table, path),
        OutputFormat::ParquetSnappy => encode_parquet(table, path, Compression::SNAPPY),
        OutputFormat::ParquetGzip => {
            encode_parquet(table, path, Compression::GZIP(GzipLevel::default()))
        }
        OutputFormat::Feather => encode_feather(table, path),
        OutputFormat::CsvGzip => encode_csv_gzip(table, path),
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(BufWriter::new(file))
}

/// Render one row as a JSON object; key order equals column order, and
/// null/NaN cells become JSON null
fn row_to_json(table: &Table, row: usize) -> JsonValue {
    let mut object = serde_json::Map::with_capacity(table.column_count());
    for column in &table.columns {
        let cell = match &column.cells[row] {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(JsonValue::Null, JsonValue::Number),
            Value::Text(s) => JsonValue::String(s.clone()),
        };
        object.insert(column.name.clone(), cell);
    }
    JsonValue::Object(object)
}

fn encode_json(table: &Table, path: &Path) -> Result<()> {
    let records: Vec<JsonValue> = (0..table.row_count())
        .map(|row| row_to_json(table, row))
        .collect();
    let mut writer = create(path)?;
    let json = serde_json::to_string_pretty(&records).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    writeln!(writer, "{}", json).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(())
}

fn encode_ndjson(table: &Table, path: &Path) -> Result<()> {
    let mut writer = create(path)?;
    for row in 0..table.row_count() {
        let line = serde_json::to_string(&row_to_json(table, row)).map_err(|e| Error::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        writeln!(writer, "{}", line).map_err(|e| Error::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}

fn encode_parquet(table: &Table, path: &Path, compression: Compression) -> Result<()> {
    let batch = to_record_batch(table, path)?;
    let writer = create(path)?;

    let props = WriterProperties::builder()
        .set_compression(compression)
        .build();

    let mut parquet_writer =
        ArrowWriter::try_new(writer, batch.schema(), Some(props)).map_err(|e| Error::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    parquet_writer.write(&batch).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parquet_writer.close().map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(())
}

fn encode_feather(table: &Table, path: &Path) -> Result<()> {
    let batch = to_record_batch(table, path)?;
    let writer = create(path)?;
    let schema = batch.schema();

    let mut ipc_writer =
        arrow::ipc::writer::FileWriter::try_new(writer, &schema).map_err(|e| Error::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    ipc_writer.write(&batch).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    ipc_writer.finish().map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(())
}

fn encode_csv_gzip(table: &Table, path: &Path) -> Result<()> {
    let writer = create(path)?;
    let encoder = GzEncoder::new(writer, flate2::Compression::default());
    let mut csv_writer = csv::Writer::from_writer(encoder);

    csv_writer
        .write_record(table.column_names())
        .map_err(|e| Error::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|c| c.cells[row].to_display_string())
            .collect();
        csv_writer.write_record(&record).map_err(|e| Error::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    let encoder = csv_writer.into_inner().map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    encoder.finish().map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(())
}
