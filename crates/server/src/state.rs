use crate::config::ServerConfig;
use crate::service::RecommendationService;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub service: RecommendationService,
}

impl AppState {
    pub fn new(service: RecommendationService) -> Self {
        Self { service }
    }

    /// Build state from server configuration.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let engine_config = config
            .engine_config()
            .map_err(|e| anyhow::anyhow!("Invalid engine configuration: {}", e))?;
        Ok(Self::new(RecommendationService::new(engine_config)))
    }
}
