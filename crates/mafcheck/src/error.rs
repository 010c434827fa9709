//! Error types for the mafcheck library.
//!
//! Only run-level failures are errors. Problems with individual records are
//! reported as [`Finding`](crate::validation::Finding)s in the report.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mafcheck operations.
#[derive(Debug, Error)]
pub enum MafCheckError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid run configuration (missing reference table, bad config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The gene reference table could not be loaded.
    #[error("Reference error: {0}")]
    Reference(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MafCheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MafCheckError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for mafcheck operations.
pub type Result<T> = std::result::Result<T, MafCheckError>;
