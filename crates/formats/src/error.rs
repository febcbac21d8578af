//! Error types for dataset loading

use thiserror::Error;

/// Dataset load errors
///
/// Any variant here is fatal for the session: the caller must stop and
/// surface the message instead of rendering a partial dashboard.
/// Per-field parse problems are not errors; they normalize to null/default
/// values inside the reader.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for load operations
pub type Result<T> = std::result::Result<T, Error>;
