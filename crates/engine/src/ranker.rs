//! Blending, sorting and truncation.
//!
//! `recommendation_score = content_weight * content_score
//!                       + popularity_weight * popularity_score`
//!
//! The sort is stable: items with equal scores keep their catalog order.

use crate::error::{EngineError, Result};
use crate::types::{MediaItem, RankedRecommendation};

/// Default number of recommendations when the caller doesn't ask for a size.
pub const DEFAULT_LIMIT: i64 = 10;

/// Weights of the linear blend. Always sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    content: f64,
    popularity: f64,
}

impl BlendWeights {
    /// Build a blend from raw weights.
    ///
    /// Weights must be finite and non-negative, content must be at least as
    /// heavy as popularity, and they are rescaled to sum to 1.
    pub fn new(content: f64, popularity: f64) -> Result<Self> {
        if !content.is_finite() || !popularity.is_finite() {
            return Err(EngineError::InvalidWeights {
                reason: "weights must be finite".to_string(),
            });
        }
        if content < 0.0 || popularity < 0.0 {
            return Err(EngineError::InvalidWeights {
                reason: "weights must be non-negative".to_string(),
            });
        }
        if content < popularity {
            return Err(EngineError::InvalidWeights {
                reason: format!(
                    "content weight ({content}) must not be below popularity weight ({popularity})"
                ),
            });
        }
        let total = content + popularity;
        if total <= 0.0 {
            return Err(EngineError::InvalidWeights {
                reason: "weights must not both be zero".to_string(),
            });
        }
        Ok(Self {
            content: content / total,
            popularity: popularity / total,
        })
    }

    pub fn content(&self) -> f64 {
        self.content
    }

    pub fn popularity(&self) -> f64 {
        self.popularity
    }

    /// Blend the two signals.
    pub fn blend(&self, content_score: f64, popularity_score: f64) -> f64 {
        self.content * content_score + self.popularity * popularity_score
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            content: 0.7,
            popularity: 0.3,
        }
    }
}

/// Turns scored items into the final ordered, truncated output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    weights: BlendWeights,
}

impl Ranker {
    pub fn new(weights: BlendWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> BlendWeights {
        self.weights
    }

    /// Blend, sort descending and keep at most `limit` entries.
    ///
    /// `items` and `content_scores` are parallel slices in catalog order.
    /// `limit <= 0` yields an empty list.
    pub fn rank(
        &self,
        items: &[&MediaItem],
        content_scores: &[f64],
        limit: i64,
    ) -> Vec<RankedRecommendation> {
        if limit <= 0 {
            return Vec::new();
        }

        let mut ranked: Vec<RankedRecommendation> = items
            .iter()
            .zip(content_scores)
            .map(|(item, &content_score)| {
                let popularity_score = item.clamped_popularity();
                RankedRecommendation {
                    media_id: item.media_id.clone(),
                    genres: item.genres.clone(),
                    details: item.details.clone(),
                    content_score,
                    popularity_score,
                    recommendation_score: self.weights.blend(content_score, popularity_score),
                }
            })
            .collect();

        // sort_by is stable, so ties keep catalog order
        ranked.sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score));

        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        ranked.truncate(limit);
        ranked
    }
}
