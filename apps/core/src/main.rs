// Heartline Backend Entry Point
// Chat companion with a rule-based fallback brain

use heartline_core::actors::companion::CompanionHandle;
use heartline_core::auth::TokenVerifier;
use heartline_core::config::AppConfig;
use heartline_core::rate_limiter::RateLimiter;
use heartline_core::server::{self, AppState};
use heartline_core::{database, logging};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::init(config.log_format)?;

    let pool = database::init_db(&config.database_url).await?;

    let companion = CompanionHandle::new(pool, config.llm.clone());
    let state = AppState {
        companion: companion.clone(),
        verifier: TokenVerifier::new(&config.jwt_secret),
        limiter: Arc::new(RateLimiter::per_minute(config.chat_rate_limit)),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Heartline listening");

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    companion.shutdown().await;
    info!("Heartline stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
