use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::load().context("Failed to load config")?;
    info!(environment = %config.server.environment, "Starting admin server");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config).context("Failed to build data service client")?;
    if state.directory.is_none() {
        warn!("Data service is not configured: roles fall back to defaults, staff endpoints will fail");
    }

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
