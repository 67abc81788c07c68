//! Error types for smog-radar

use thiserror::Error;

/// Main error type for smog-radar operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("No result for: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for smog-radar operations
pub type Result<T> = std::result::Result<T, Error>;
