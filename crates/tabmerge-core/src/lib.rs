//! tabmerge-core: Core library for merging and reshaping tabular files
//!
//! This library provides functionality to:
//! - Decode delimited text, Excel workbooks, JSON, NDJSON, Feather and Parquet
//! - Merge heterogeneous sources into one table with provenance tracking
//! - Pivot with sum/mean/count/min/max aggregation and sort the result
//! - Augment a table from a reference table by key lookup
//! - Split delimited columns into positional sub-columns
//! - Encode results to JSON, NDJSON, Parquet, Feather and gzipped CSV

pub mod columnar;
pub mod error;
pub mod lookup;
pub mod merge;
pub mod pivot;
pub mod reader;
pub mod schema;
pub mod session;
pub mod split;
pub mod table;
pub mod writer;

pub use error::{Error, Result};
pub use lookup::{lookup, LOOKUP_PREFIX};
pub use merge::{merge_files, MergeOptions, ProgressFn, SheetSelection, SOURCE_FILE_COLUMN, SOURCE_SHEET_COLUMN};
pub use pivot::{pivot, sort_descending, AggFn};
pub use reader::{decode, enumerate_sheets, Format, SourceDescriptor};
pub use session::Session;
pub use split::split_column;
pub use table::{Column, Table, Value};
pub use writer::{encode, OutputFormat};
