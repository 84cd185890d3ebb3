//! Core domain types for the scoring engine.
//!
//! Everything here is constructed fresh per request from caller-supplied
//! data and dropped when the call returns. The engine keeps no identity or
//! cache beyond a single `calculate_recommendations` invocation.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque user identifier. Echoed back, never looked up.
pub type UserId = String;

/// Opaque media identifier.
pub type MediaId = String;

/// Genre label, e.g. `"ACTION"`.
///
/// Labels are compared verbatim inside the engine; case folding happens at
/// the request boundary.
pub type Genre = String;

// =============================================================================
// User Profile
// =============================================================================

/// A user's genre preferences and interaction history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    /// Preference weight per genre. Absent genres weigh 0.
    ///
    /// Weights are arbitrary non-negative magnitudes; they do not have to sum
    /// to 1.
    pub genre_scores: HashMap<Genre, f64>,
    /// Media the user already consumed. Used only as an exclusion set.
    pub interacted_media_ids: HashSet<MediaId>,
    /// Aggregate engagement signal. Weights are read relative to it when present.
    pub total_engagement_score: Option<f64>,
}

impl UserProfile {
    /// Create an empty profile for a user.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Set a genre weight (builder style).
    pub fn with_genre(mut self, genre: impl Into<Genre>, weight: f64) -> Self {
        self.genre_scores.insert(genre.into(), weight);
        self
    }

    /// Mark a media item as already interacted with (builder style).
    pub fn with_interaction(mut self, media_id: impl Into<MediaId>) -> Self {
        self.interacted_media_ids.insert(media_id.into());
        self
    }

    /// Engagement score usable as a divisor.
    ///
    /// Falls back to 1 when the engagement score is missing, zero, negative
    /// or not finite. Content scores are ratios of weights, so this divisor
    /// cancels out of them; it only matters for reporting per-engagement
    /// weights.
    pub fn engagement_norm(&self) -> f64 {
        match self.total_engagement_score {
            Some(total) if total.is_finite() && total > 0.0 => total,
            _ => 1.0,
        }
    }

    /// Weight for a genre with negative values clamped to 0.
    pub fn clamped_weight(&self, genre: &str) -> f64 {
        self.genre_scores
            .get(genre)
            .map(|&w| w.max(0.0))
            .unwrap_or(0.0)
    }

    /// Largest clamped weight, or 0 for a profile without positive weights.
    pub fn max_weight(&self) -> f64 {
        self.genre_scores
            .values()
            .map(|&w| w.max(0.0))
            .fold(0.0, f64::max)
    }

    /// Genres sorted by weight, strongest first. Ties break on the label so
    /// the ordering is stable across calls.
    pub fn ranked_genres(&self) -> Vec<(&Genre, f64)> {
        let mut genres: Vec<(&Genre, f64)> = self
            .genre_scores
            .iter()
            .map(|(genre, &weight)| (genre, weight))
            .collect();
        genres.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        genres
    }
}

// =============================================================================
// Media
// =============================================================================

/// Display-only payload carried through scoring untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub media_type: Option<String>,
    pub cover_url: Option<String>,
}

/// A candidate item from the catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Blank means the upstream record had no identifier.
    pub media_id: MediaId,
    /// May contain duplicates; scoring treats it as a set.
    pub genres: Vec<Genre>,
    /// Conventionally in [0, 1]. Out-of-range values are clamped.
    pub popularity_score: f64,
    #[serde(flatten)]
    pub details: MediaDetails,
}

impl MediaItem {
    /// Create an item with no display payload.
    pub fn new<G>(media_id: impl Into<MediaId>, genres: G, popularity_score: f64) -> Self
    where
        G: IntoIterator,
        G::Item: Into<Genre>,
    {
        Self {
            media_id: media_id.into(),
            genres: genres.into_iter().map(Into::into).collect(),
            popularity_score,
            details: MediaDetails::default(),
        }
    }

    /// Attach a title (builder style).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.details.title = Some(title.into());
        self
    }

    /// Whether the record carries a usable identifier.
    pub fn has_identifier(&self) -> bool {
        !self.media_id.trim().is_empty()
    }

    /// Distinct genres in first-seen order.
    pub fn distinct_genres(&self) -> Vec<&Genre> {
        let mut seen = HashSet::with_capacity(self.genres.len());
        self.genres
            .iter()
            .filter(|genre| seen.insert(genre.as_str()))
            .collect()
    }

    /// Popularity clamped into [0, 1]. Non-finite values count as 0.
    pub fn clamped_popularity(&self) -> f64 {
        if self.popularity_score.is_finite() {
            self.popularity_score.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// One entry of the ranked output.
///
/// Carries the three numeric signals so callers can see why an item ranked
/// where it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecommendation {
    pub media_id: MediaId,
    pub genres: Vec<Genre>,
    #[serde(flatten)]
    pub details: MediaDetails,
    pub content_score: f64,
    /// The clamped popularity actually used in the blend.
    pub popularity_score: f64,
    pub recommendation_score: f64,
}
