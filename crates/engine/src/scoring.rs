//! # Scoring Engine
//!
//! Coordinates the three stages for one request:
//! 1. Validate the profile (and, under the strict policy, every item)
//! 2. Eligibility: drop malformed and already-interacted items
//! 3. Content scoring
//! 4. Blend, rank and truncate
//!
//! The engine owns configuration only. Every call works on borrowed,
//! caller-owned inputs and allocates its own output, so one engine can be
//! shared across threads without locking.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::content::ContentScorer;
use crate::error::{EngineError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlreadyInteractedFilter, WellFormedFilter};
use crate::ranker::{BlendWeights, DEFAULT_LIMIT, Ranker};
use crate::types::{MediaItem, RankedRecommendation, UserProfile};

/// How to treat catalog records that are missing their identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemPolicy {
    /// Skip the record, log it, and keep going.
    #[default]
    Lenient,
    /// Reject the whole request with `EngineError::InvalidMediaItem`.
    Strict,
}

/// Tunables for a `ScoringEngine`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub weights: BlendWeights,
    /// Used when the caller passes no limit.
    pub default_limit: i64,
    pub item_policy: ItemPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: BlendWeights::default(),
            default_limit: DEFAULT_LIMIT,
            item_policy: ItemPolicy::default(),
        }
    }
}

/// Stateless, reentrant recommendation scorer.
pub struct ScoringEngine {
    config: EngineConfig,
    filter_pipeline: FilterPipeline,
    ranker: Ranker,
}

impl ScoringEngine {
    /// Create an engine with default weights, limit and lenient item policy.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine from an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        let filter_pipeline = FilterPipeline::new()
            .add_filter(WellFormedFilter)
            .add_filter(AlreadyInteractedFilter);
        Self {
            filter_pipeline,
            ranker: Ranker::new(config.weights),
            config,
        }
    }

    /// Replace the blend weights (builder pattern).
    pub fn with_weights(self, weights: BlendWeights) -> Self {
        Self::with_config(EngineConfig {
            weights,
            ..self.config
        })
    }

    /// Replace the default limit (builder pattern).
    pub fn with_default_limit(self, default_limit: i64) -> Self {
        Self::with_config(EngineConfig {
            default_limit,
            ..self.config
        })
    }

    /// Replace the item policy (builder pattern).
    pub fn with_item_policy(self, item_policy: ItemPolicy) -> Self {
        Self::with_config(EngineConfig {
            item_policy,
            ..self.config
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rank `available_media` for `user_profile`.
    ///
    /// `limit` of `None` means the configured default. Empty catalogs, fully
    /// excluded catalogs and non-positive limits all return `Ok(vec![])`.
    ///
    /// # Errors
    /// * `InvalidProfile` - blank user id, blank genre label, or a
    ///   non-finite weight
    /// * `InvalidMediaItem` - a record without an id, under `ItemPolicy::Strict`
    #[instrument(
        skip_all,
        fields(user_id = %user_profile.user_id, catalog = available_media.len())
    )]
    pub fn calculate_recommendations(
        &self,
        user_profile: &UserProfile,
        available_media: &[MediaItem],
        limit: Option<i64>,
    ) -> Result<Vec<RankedRecommendation>> {
        let start_time = Instant::now();
        let limit = limit.unwrap_or(self.config.default_limit);

        // Validate everything before computing anything
        validate_profile(user_profile)?;
        if self.config.item_policy == ItemPolicy::Strict {
            validate_items(available_media)?;
        }

        if limit <= 0 || available_media.is_empty() {
            debug!("Nothing to rank (limit: {}, catalog: {})", limit, available_media.len());
            return Ok(Vec::new());
        }

        // Eligibility
        let eligible = self
            .filter_pipeline
            .apply(available_media.iter().collect(), user_profile)?;
        debug!(
            "Eligible items: {} of {}",
            eligible.len(),
            available_media.len()
        );

        // Content scoring
        let scorer = ContentScorer::new(user_profile);
        if !scorer.has_signal() {
            debug!("Profile has no genre signal, ranking by popularity only");
        }
        let content_scores = scorer.score_items(&eligible);

        // Blend, sort, truncate
        let recommendations = self.ranker.rank(&eligible, &content_scores, limit);

        debug!(
            "Ranked {} recommendations in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Score many profiles against one shared catalog snapshot in parallel.
    ///
    /// Each profile is an independent call; results come back in the same
    /// order as `profiles`.
    pub fn calculate_batch(
        &self,
        profiles: &[UserProfile],
        available_media: &[MediaItem],
        limit: Option<i64>,
    ) -> Vec<Result<Vec<RankedRecommendation>>> {
        profiles
            .par_iter()
            .map(|profile| self.calculate_recommendations(profile, available_media, limit))
            .collect()
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the profile for structural problems.
pub fn validate_profile(profile: &UserProfile) -> Result<()> {
    if profile.user_id.trim().is_empty() {
        return Err(EngineError::invalid_profile("missing user_id"));
    }
    for (genre, weight) in &profile.genre_scores {
        if genre.trim().is_empty() {
            return Err(EngineError::invalid_profile("blank genre label in genre_scores"));
        }
        if !weight.is_finite() {
            return Err(EngineError::invalid_profile(format!(
                "weight for genre {genre} is not a finite number"
            )));
        }
    }
    Ok(())
}

/// Reject the first catalog record without an identifier.
pub fn validate_items(items: &[MediaItem]) -> Result<()> {
    match items.iter().position(|item| !item.has_identifier()) {
        Some(position) => Err(EngineError::invalid_media_item(position, "no usable media_id")),
        None => Ok(()),
    }
}
