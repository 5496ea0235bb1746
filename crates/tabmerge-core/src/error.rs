//! Error types for tabmerge-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabmerge-core
#[derive(Debug, Error)]
pub enum Error {
    /// File extension not recognized by the format adapter
    #[error("unsupported format: '{path}'")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be decoded into a table
    #[error("failed to decode '{path}': {message}")]
    Decode { path: PathBuf, message: String },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A table could not be written to the target path
    #[error("failed to encode '{path}': {message}")]
    Encode { path: PathBuf, message: String },

    /// Invalid field selection or operation parameter
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A named column is missing from the table
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
