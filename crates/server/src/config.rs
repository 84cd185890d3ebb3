use engine::{BlendWeights, DEFAULT_LIMIT, EngineConfig, ItemPolicy};
use serde::Deserialize;

/// Prefix for every environment variable the server reads.
pub const ENV_PREFIX: &str = "RECS_";

/// Server configuration loaded from `RECS_*` environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations when a request omits `limit`
    #[serde(default = "default_limit")]
    pub default_limit: i64,

    /// `lenient` skips catalog records without an id, `strict` rejects the request
    #[serde(default)]
    pub item_policy: ItemPolicy,

    #[serde(default = "default_content_weight")]
    pub content_weight: f64,

    #[serde(default = "default_popularity_weight")]
    pub popularity_weight: f64,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_content_weight() -> f64 {
    0.7
}

fn default_popularity_weight() -> f64 {
    0.3
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_limit: default_limit(),
            item_policy: ItemPolicy::default(),
            content_weight: default_content_weight(),
            popularity_weight: default_popularity_weight(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<ServerConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, ServerConfig>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine settings derived from this configuration.
    ///
    /// Fails if the blend weights are rejected.
    pub fn engine_config(&self) -> engine::Result<EngineConfig> {
        Ok(EngineConfig {
            weights: BlendWeights::new(self.content_weight, self.popularity_weight)?,
            default_limit: self.default_limit,
            item_policy: self.item_policy,
        })
    }
}
