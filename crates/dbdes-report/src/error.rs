//! Error types for report output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// The destination could not be created.
    #[error("failed to create report {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the destination failed.
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("failed to serialize report {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
