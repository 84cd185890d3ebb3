//! # Recommendation Service
//!
//! Bridges the async HTTP layer and the synchronous scoring engine:
//! 1. Receive a parsed `ScoringRequest`
//! 2. Run the engine on the blocking pool (scoring is CPU-bound)
//! 3. Wrap the result in a `RecommendationResponse`
//!
//! The engine is shared behind an `Arc`; it holds configuration only, so
//! concurrent requests never contend.

use std::sync::Arc;
use std::time::Instant;

use engine::{EngineConfig, ScoringEngine};
use payload::{RecommendationResponse, ScoringRequest};
use tracing::info;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct RecommendationService {
    engine: Arc<ScoringEngine>,
}

impl RecommendationService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: Arc::new(ScoringEngine::with_config(config)),
        }
    }

    pub fn engine_config(&self) -> &EngineConfig {
        self.engine.config()
    }

    /// Score one request.
    ///
    /// # Errors
    /// * `AppError::BadRequest` - the profile or catalog failed validation
    /// * `AppError::Internal` - the scoring task panicked or was cancelled
    pub async fn recommend(&self, request: ScoringRequest) -> AppResult<RecommendationResponse> {
        let start_time = Instant::now();
        let user_id = request.profile.user_id.clone();
        let candidates = request.media.len();

        let engine = Arc::clone(&self.engine);
        let response = tokio::task::spawn_blocking(move || request.evaluate(&engine))
            .await
            .map_err(|e| AppError::Internal(format!("scoring task failed: {e}")))??;

        info!(
            "Scored {} candidates for user {}, returning {} in {:.2?}",
            candidates,
            user_id,
            response.count,
            start_time.elapsed()
        );
        Ok(response)
    }
}

impl Default for RecommendationService {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
