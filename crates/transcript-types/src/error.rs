//! Error types for the transcript graph.

use thiserror::Error;

/// Unified error type for shared transcript operations.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A begin/end offset could not be parsed
    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
