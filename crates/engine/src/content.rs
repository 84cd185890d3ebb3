//! Genre-affinity content scoring.
//!
//! ## Algorithm
//! For an item with distinct genre set G (K = |G|):
//! - numerator: sum of the user's weights for the genres in G
//! - denominator: sum of the user's K strongest weights (or all of them
//!   when the user has fewer than K genres)
//! - score = numerator / denominator, or 0 when the denominator is 0
//!
//! The denominator is the best any K-genre item could do for this user, so
//! the score lands in [0, 1]. An item tagged only with the user's top genre
//! scores 1.0, and so does an item tagged with N genres that all tie for the
//! top weight: fewer tags are never penalized, only weaker matches.
//!
//! Raising the weight of a genre the item carries grows the numerator by
//! exactly that amount and the top-K denominator by at most that amount, so
//! the score never decreases.
//!
//! Weights are divided by the profile's largest weight before anything is
//! summed. Every term is then in [0, 1] and no sum can overflow, whatever
//! magnitudes the caller uses. The score is a ratio, so neither this
//! rescaling nor the engagement score changes it.

use crate::types::{MediaItem, UserProfile};

/// Scores items against one user's genre preferences.
///
/// Built once per request; the top-K prefix sums are computed up front so
/// scoring a catalog is a single linear pass.
#[derive(Debug, Clone)]
pub struct ContentScorer<'p> {
    profile: &'p UserProfile,
    /// Largest clamped weight of the profile.
    scale: f64,
    /// `top_k_sums[k - 1]` holds the sum of the k strongest rescaled weights.
    top_k_sums: Vec<f64>,
}

impl<'p> ContentScorer<'p> {
    /// Prepare a scorer for `profile`.
    pub fn new(profile: &'p UserProfile) -> Self {
        let scale = profile.max_weight();

        let mut weights: Vec<f64> = if scale > 0.0 {
            profile
                .genre_scores
                .values()
                .map(|&weight| weight.max(0.0) / scale)
                .collect()
        } else {
            Vec::new()
        };
        weights.sort_by(|a, b| b.total_cmp(a));

        let top_k_sums = weights
            .iter()
            .scan(0.0_f64, |acc, &weight| {
                *acc += weight;
                Some(*acc)
            })
            .collect();

        Self {
            profile,
            scale,
            top_k_sums,
        }
    }

    /// Whether the profile carries any genre signal at all.
    pub fn has_signal(&self) -> bool {
        self.top_k_sums.last().is_some_and(|&total| total > 0.0)
    }

    /// Content score for a single item, in [0, 1].
    pub fn score(&self, item: &MediaItem) -> f64 {
        let genres = item.distinct_genres();
        if genres.is_empty() || !self.has_signal() {
            return 0.0;
        }

        let numerator: f64 = genres
            .iter()
            .map(|genre| self.profile.clamped_weight(genre) / self.scale)
            .sum();

        let k = genres.len().min(self.top_k_sums.len());
        let denominator = self.top_k_sums[k - 1];

        if denominator <= 0.0 || numerator <= 0.0 {
            return 0.0;
        }
        let ratio = numerator / denominator;
        if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Score every item, returning scores in input order.
    pub fn score_items(&self, items: &[&MediaItem]) -> Vec<f64> {
        items.iter().map(|item| self.score(item)).collect()
    }
}
