//! Error types for ingestion and graph queries.

use thiserror::Error;

/// Result type alias for degrees-core operations.
pub type Result<T> = std::result::Result<T, DegreesError>;

/// Errors that can occur while loading sources or querying the index.
///
/// Only infrastructure failures live here. Expected user-level outcomes
/// (unknown or ambiguous name, no connection between two valid people)
/// are ordinary return values, never errors.
#[derive(Error, Debug)]
pub enum DegreesError {
    /// I/O failure opening or reading a source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input (beyond a skippable row).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parquet file could not be read.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow record batch could not be decoded.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A required column is missing from a source's schema.
    #[error("Schema error: {message}")]
    Schema {
        /// Description of the missing or mistyped column.
        message: String,
    },

    /// The file extension maps to no supported ingestion format.
    #[error("Unsupported data format: {path}")]
    UnknownFormat {
        /// Path whose extension was not recognized.
        path: String,
    },

    /// A query referenced a person id absent from the index.
    #[error("Unknown person id: {id}")]
    UnknownPerson {
        /// The id that was not found.
        id: String,
    },
}
