//! Error types for the speedrun orchestrator.
//!
//! Library crates use [`SpeedrunError`] via `thiserror`.
//! The CLI wraps this with `color-eyre`; the server maps it to HTTP responses.

use std::path::PathBuf;

use crate::validate::ValidationErrors;

/// Top-level error type for all speedrun operations.
#[derive(Debug, thiserror::Error)]
pub enum SpeedrunError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level failure talking to a speedrun server.
    #[error("network error: {0}")]
    Network(String),

    /// The HTTP server could not bind or stopped serving.
    #[error("server error: {0}")]
    Server(String),

    /// Request fields failed validation; never reaches generation logic.
    #[error("Invalid input")]
    InvalidInput(ValidationErrors),

    /// A speedrun server answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Unexpected failure inside a generation stage.
    #[error("{0}")]
    Internal(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SpeedrunError>;

impl SpeedrunError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an internal error from any displayable message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the server reported the requested endpoint as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}

impl From<ValidationErrors> for SpeedrunError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidInput(errors)
    }
}
