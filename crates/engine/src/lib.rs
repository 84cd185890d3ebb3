//! Genre-affinity recommendation scoring.
//!
//! This crate provides:
//! - Strict domain types for profiles, catalog items and ranked output
//! - Filter trait and implementations for the eligibility stage
//! - ContentScorer for genre-affinity scores
//! - Ranker for the content/popularity blend
//! - ScoringEngine tying the stages together
//!
//! ## Architecture
//! Each request runs the stages in a fixed order:
//! 1. Filters remove malformed and already-interacted items
//! 2. ContentScorer scores what's left against the user's genre weights
//! 3. Ranker blends in popularity, sorts (stable) and truncates
//!
//! The engine is pure: no I/O, no globals, no state kept between calls.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{MediaItem, ScoringEngine, UserProfile};
//!
//! let profile = UserProfile::new("user-1")
//!     .with_genre("ACTION", 5.0)
//!     .with_genre("HORROR", 2.0);
//! let catalog = vec![
//!     MediaItem::new("m1", ["ACTION"], 0.9),
//!     MediaItem::new("m2", ["HORROR"], 0.6),
//! ];
//!
//! let recommendations = ScoringEngine::new()
//!     .calculate_recommendations(&profile, &catalog, Some(10))?;
//! ```

pub mod content;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod ranker;
pub mod scoring;
pub mod traits;
pub mod types;

// Re-export main types
pub use content::ContentScorer;
pub use error::{EngineError, Result};
pub use filter_pipeline::FilterPipeline;
pub use ranker::{BlendWeights, DEFAULT_LIMIT, Ranker};
pub use scoring::{EngineConfig, ItemPolicy, ScoringEngine, validate_items, validate_profile};
pub use traits::Filter;
pub use types::{
    Genre, MediaDetails, MediaId, MediaItem, RankedRecommendation, UserId, UserProfile,
};

/// Rank `available_media` for `user_profile` with the default engine.
///
/// Shorthand for `ScoringEngine::new().calculate_recommendations(..)`.
pub fn calculate_recommendations(
    user_profile: &UserProfile,
    available_media: &[MediaItem],
    limit: i64,
) -> Result<Vec<RankedRecommendation>> {
    ScoringEngine::new().calculate_recommendations(user_profile, available_media, Some(limit))
}
