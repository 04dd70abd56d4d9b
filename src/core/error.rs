//! Error types for saplanting

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Event error: {0}")]
    Event(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),
}
