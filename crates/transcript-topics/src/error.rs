//! Topic analysis error types.

use thiserror::Error;

/// Errors that can occur while turning a transcript into a graph.
#[derive(Debug, Error)]
pub enum TopicsError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Graph failed its own consistency check
    #[error("Inconsistent graph: {0}")]
    InconsistentGraph(#[from] transcript_types::TranscriptError),
}
