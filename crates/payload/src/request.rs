//! Request parsing.

use std::fs;
use std::path::Path;

use engine::{MediaItem, ScoringEngine, UserProfile};

use crate::error::{PayloadError, Result};
use crate::raw::{RawRequest, media_item};
use crate::response::RecommendationResponse;

/// One scoring request in the engine's strict types.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRequest {
    pub profile: UserProfile,
    pub media: Vec<MediaItem>,
    /// `None` means "use the engine's default".
    pub limit: Option<i64>,
}

impl ScoringRequest {
    /// Run the request through `engine` and wrap the result for the wire.
    pub fn evaluate(&self, engine: &ScoringEngine) -> Result<RecommendationResponse> {
        let recommendations =
            engine.calculate_recommendations(&self.profile, &self.media, self.limit)?;
        Ok(RecommendationResponse::new(
            self.profile.user_id.clone(),
            recommendations,
        ))
    }
}

/// Parse a JSON request body.
///
/// ## Accepted shape
/// ```text
/// {
///   "user_profile": {
///     "user_id", "genre_scores", "interacted_media_ids", "total_engagement_score"
///   },
///   "available_media": [ { "media_id", "genres", "popularity_score", "title", ... } ],
///   "limit": 10
/// }
/// ```
/// camelCase spellings and the book-flavoured id fields are accepted too.
pub fn parse_request(body: &str) -> Result<ScoringRequest> {
    let raw: RawRequest = serde_json::from_str(body)?;

    let profile = raw.user_profile.into_profile()?;
    let media: Vec<MediaItem> = raw
        .available_media
        .iter()
        .enumerate()
        .map(|(position, value)| media_item(position, value))
        .collect();

    tracing::debug!(
        "Parsed request for user {} ({} genres, {} excluded, {} candidates)",
        profile.user_id,
        profile.genre_scores.len(),
        profile.interacted_media_ids.len(),
        media.len()
    );

    Ok(ScoringRequest {
        profile,
        media,
        limit: raw.limit,
    })
}

/// Read and parse a request file.
pub fn load_request(path: &Path) -> Result<ScoringRequest> {
    let body = fs::read_to_string(path).map_err(|source| PayloadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_request(&body)
}
