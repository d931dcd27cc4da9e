//! Layout error types.

use thiserror::Error;

/// Errors that can occur while configuring the layout simulator.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
