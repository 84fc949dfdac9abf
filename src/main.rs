mod config;
mod elevenlabs;
mod errors;
mod fallback;
mod gemini;
mod image;
mod models;
mod narration;
mod pdf;
mod plan;
mod policy;
mod prompt;
mod replicate;
mod routes;
mod sanitize;
mod speech;
mod stub;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{ConfigSource, Domain, EnvConfigSource};
use crate::elevenlabs::ElevenLabsClient;
use crate::gemini::GeminiClient;
use crate::policy::select_path;
use crate::replicate::ReplicateClient;
use crate::routes::AppState;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let timeout_secs = std::env::var("PROVIDER_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("building HTTP client")?;

    let startup = EnvConfigSource.snapshot();
    for domain in [Domain::Plan, Domain::Image, Domain::Speech] {
        tracing::info!("⚙️ {} domain starts on the {:?} path", domain, select_path(domain, &startup));
    }

    let state = AppState {
        config: Arc::new(EnvConfigSource),
        plan: Arc::new(GeminiClient::new(http.clone())),
        image: Arc::new(ReplicateClient::new(http.clone())),
        speech: Arc::new(ElevenLabsClient::new(http)),
    };

    let app = routes::build_router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("👋 Shutting down");
}
