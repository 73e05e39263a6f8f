//! Dataset loading errors

use std::path::PathBuf;

use thiserror::Error;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors raised while building the in-memory dataset.
///
/// Query processing never produces these; once a dataset exists it is
/// read-only and cannot fail.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Dataset file could not be read
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset content is not valid JSON
    #[error("Invalid dataset JSON at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// JSON is valid but not shaped like a list of transaction objects
    #[error("Invalid dataset document: {0}")]
    InvalidDocument(String),
}
