//! Error types for genbench.

use thiserror::Error;

/// Result type alias for genbench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for genbench.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid sampling or harness argument (bad temperature, top-k, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Tokenization error.
    #[error("tokenization error: {0}")]
    Tokenization(String),

    /// Model forward pass failed.
    #[error("model inference error: {0}")]
    ModelInference(String),

    /// A parallel generation task failed.
    #[error("task failure: {0}")]
    TaskFailure(String),

    /// Tensor operation error.
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
