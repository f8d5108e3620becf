//! Error types for cell resolution, host mutation and delivery.
use thiserror::Error;

/// Top-level error type returned by every command.
///
/// An empty cell is deliberately absent: it is handled by sending a
/// placeholder instead of failing.
#[derive(Error, Debug)]
pub enum CellError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Host operation failed: {0}")]
    HostOperationFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<regex::Error> for CellError {
    fn from(value: regex::Error) -> Self {
        Self::InvalidConfiguration(format!("invalid tag pattern: {}", value))
    }
}
