//! Error types for study-overlay.
//!
//! Only setup and CLI paths produce errors. Runtime failures inside the
//! overlay (bad chat input, dropped connections, storage hiccups) are logged
//! and absorbed so the overlay keeps running unattended.

use thiserror::Error;

/// Errors surfaced by the CLI, configuration, storage and terminal setup.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The task database could not be opened or queried.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem or stream I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// User input could not be parsed (durations, indices, shells).
    #[error("Parse error: {0}")]
    Parse(String),

    /// The terminal could not be prepared or drawn.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for OverlayError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
