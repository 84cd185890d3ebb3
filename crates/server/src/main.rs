//! Recommendation scoring HTTP server.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState::from_config(&config)?;
    let engine_config = state.service.engine_config();
    info!(
        "Engine ready (content weight: {:.2}, popularity weight: {:.2}, \
         default limit: {}, item policy: {:?})",
        engine_config.weights.content(),
        engine_config.weights.popularity(),
        engine_config.default_limit,
        engine_config.item_policy
    );

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
