//! Error types for the scoring engine.
//!
//! "No results" is never an error: an empty catalog, a fully excluded
//! catalog and a zero limit all produce an empty list. Errors are reserved
//! for structurally invalid input and are raised before any scoring starts.

use thiserror::Error;

/// Input-validation failures surfaced at the engine boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The profile is missing its identifier or has a malformed weight map.
    #[error("Invalid user profile: {reason}")]
    InvalidProfile { reason: String },

    /// A catalog entry is missing its identifier (strict item policy only).
    #[error("Invalid media item at position {position}: {reason}")]
    InvalidMediaItem { position: usize, reason: String },

    /// Blend weights rejected at construction time.
    #[error("Invalid blend weights: {reason}")]
    InvalidWeights { reason: String },
}

impl EngineError {
    pub fn invalid_profile(reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            reason: reason.into(),
        }
    }

    pub fn invalid_media_item(position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidMediaItem {
            position,
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
