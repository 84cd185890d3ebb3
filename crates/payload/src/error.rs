//! Error types for the payload crate.

use engine::EngineError;
use thiserror::Error;

/// Errors raised while turning a request body into engine inputs.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Request file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Body is not JSON, or not the expected shape
    #[error("Malformed request body: {0}")]
    Json(#[from] serde_json::Error),

    /// Body parsed, but the values are unusable
    #[error(transparent)]
    Validation(#[from] EngineError),
}

impl PayloadError {
    /// Whether the caller sent something wrong (as opposed to an I/O failure).
    pub fn is_validation(&self) -> bool {
        matches!(self, PayloadError::Json(_) | PayloadError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, PayloadError>;
