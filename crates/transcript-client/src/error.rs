//! Error types for transcript fetching.

use thiserror::Error;

/// Error type for transcript source operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Transcript service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Timeout waiting for transcript")]
    Timeout,

    #[error("Failed to parse transcript: {0}")]
    Parse(String),

    #[error("Transcript for {0} is empty")]
    EmptyTranscript(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Couldn't parse url: {0}")]
    InvalidVideoUrl(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http(err.to_string())
        }
    }
}
