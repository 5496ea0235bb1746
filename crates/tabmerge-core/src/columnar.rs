//! Table <-> Arrow RecordBatch conversion shared by the feather and parquet
//! adapters

use arrow::array::{
    Array, ArrayRef, BooleanArray, BooleanBuilder, Float32Array, Float64Array, Float64Builder,
    Int32Array, Int64Array, LargeStringArray, StringArray, StringBuilder, UInt32Array, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::table::{Column, Table, Value};

/// Per-column storage type chosen for encoding
enum ColumnKind {
    Number,
    Bool,
    Text,
}

/// Pick the narrowest Arrow type that can hold every non-null cell of the
/// column; mixed-type columns are widened to text
fn classify(column: &Column) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for cell in &column.cells {
        let next = match cell {
            Value::Null => continue,
            Value::Number(_) => ColumnKind::Number,
            Value::Bool(_) => ColumnKind::Bool,
            Value::Text(_) => return ColumnKind::Text,
        };
        match (&kind, &next) {
            (None, _) => kind = Some(next),
            (Some(ColumnKind::Number), ColumnKind::Number) => {}
            (Some(ColumnKind::Bool), ColumnKind::Bool) => {}
            _ => return ColumnKind::Text,
        }
    }
    kind.unwrap_or(ColumnKind::Text)
}

/// Convert a table into a single RecordBatch
pub fn to_record_batch(table: &Table, path: &Path) -> Result<RecordBatch> {
    let rows = table.row_count();
    let mut fields = Vec::with_capacity(table.column_count());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.column_count());

    for column in &table.columns {
        let (data_type, array): (DataType, ArrayRef) = match classify(column) {
            ColumnKind::Number => {
                let mut builder = Float64Builder::with_capacity(rows);
                for cell in &column.cells {
                    builder.append_option(cell.as_number());
                }
                (DataType::Float64, Arc::new(builder.finish()))
            }
            ColumnKind::Bool => {
                let mut builder = BooleanBuilder::with_capacity(rows);
                for cell in &column.cells {
                    match cell {
                        Value::Bool(b) => builder.append_value(*b),
                        _ => builder.append_null(),
                    }
                }
                (DataType::Boolean, Arc::new(builder.finish()))
            }
            ColumnKind::Text => {
                let mut builder = StringBuilder::new();
                for cell in &column.cells {
                    match cell {
                        Value::Null => builder.append_null(),
                        other => builder.append_value(other.to_display_string()),
                    }
                }
                (DataType::Utf8, Arc::new(builder.finish()))
            }
        };
        fields.push(Field::new(&column.name, data_type, true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    RecordBatch::try_new_with_options(schema, arrays, &options).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: format!("failed to build record batch: {}", e),
    })
}

/// Convert a sequence of RecordBatches sharing one schema back into a table
pub fn from_record_batches(
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    path: &Path,
) -> Result<Table> {
    let mut columns: Vec<Column> = schema
        .fields()
        .iter()
        .map(|f| Column::new(f.name().clone(), Vec::new()))
        .collect();

    for batch in &batches {
        for (idx, column) in columns.iter_mut().enumerate() {
            append_array(column, batch.column(idx).as_ref(), path)?;
        }
    }

    Ok(Table { columns })
}

fn append_array(column: &mut Column, array: &dyn Array, path: &Path) -> Result<()> {
    macro_rules! extend_numeric {
        ($ty:ty) => {{
            let values = array.as_any().downcast_ref::<$ty>().unwrap();
            for i in 0..values.len() {
                column.cells.push(if values.is_null(i) {
                    Value::Null
                } else {
                    Value::Number(values.value(i) as f64)
                });
            }
        }};
    }
    macro_rules! extend_text {
        ($ty:ty) => {{
            let values = array.as_any().downcast_ref::<$ty>().unwrap();
            for i in 0..values.len() {
                column.cells.push(if values.is_null(i) {
                    Value::Null
                } else {
                    Value::Text(values.value(i).to_string())
                });
            }
        }};
    }

    match array.data_type() {
        DataType::Float64 => extend_numeric!(Float64Array),
        DataType::Float32 => extend_numeric!(Float32Array),
        DataType::Int64 => extend_numeric!(Int64Array),
        DataType::Int32 => extend_numeric!(Int32Array),
        DataType::UInt64 => extend_numeric!(UInt64Array),
        DataType::UInt32 => extend_numeric!(UInt32Array),
        DataType::Utf8 => extend_text!(StringArray),
        DataType::LargeUtf8 => extend_text!(LargeStringArray),
        DataType::Boolean => {
            let values = array.as_any().downcast_ref::<BooleanArray>().unwrap();
            for i in 0..values.len() {
                column.cells.push(if values.is_null(i) {
                    Value::Null
                } else {
                    Value::Bool(values.value(i))
                });
            }
        }
        DataType::Null => {
            column
                .cells
                .extend(std::iter::repeat(Value::Null).take(array.len()));
        }
        other => {
            return Err(Error::Decode {
                path: path.to_path_buf(),
                message: format!(
                    "column '{}' has unsupported type {:?}",
                    column.name, other
                ),
            })
        }
    }
    Ok(())
}
