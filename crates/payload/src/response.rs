//! Response envelope.

use engine::{RankedRecommendation, UserId};
use serde::{Deserialize, Serialize};

/// What the service sends back for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub user_id: UserId,
    pub count: usize,
    pub recommendations: Vec<RankedRecommendation>,
}

impl RecommendationResponse {
    pub fn new(user_id: UserId, recommendations: Vec<RankedRecommendation>) -> Self {
        Self {
            user_id,
            count: recommendations.len(),
            recommendations,
        }
    }
}
