//! Error types for the ingestion pipeline

use std::path::Path;
use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ingestion pipeline errors
///
/// Only `Config` is fatal for a run; everything else is scoped to a single
/// file and recorded in the run [`Report`](crate::types::Report).
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (aborts the run before any file is read)
    #[error("Configuration error: {0}")]
    Config(String),

    /// No reader registered for the file's extension
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Reader failed to load or parse a file
    #[error("Failed to read '{path}': {message}")]
    ReadFailure { path: String, message: String },

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector index error
    #[error("Vector index error: {0}")]
    Index(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a read failure for a file path
    pub fn read_failure(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::ReadFailure {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }
}
