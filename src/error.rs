//! Error types for the expression tracking library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Frame was empty or lacked a landmark the extractor needs
    #[error("No face detected")]
    NoFaceDetected,

    /// A measurement came out non-finite (degenerate landmark geometry)
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Detection record could not be decoded or encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
