//! Digital-first news broker API server
//!
//! HTTP API that aggregates curated trend feeds from an article-search
//! provider into classified item lists and newsletter digests.

mod app;
mod auth;
mod config;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use broker_news::{FeedCatalog, NewsApiClient};
use broker_services::{BrokerService, ServiceConfig};

pub use app::{build_router, AppState};
use config::BrokerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables; missing files are fine
    for file in [".env.local", ".env"] {
        if let Err(e) = dotenvy::from_filename(file) {
            if !matches!(e, dotenvy::Error::Io(_)) {
                eprintln!("Warning: Failed to load {}: {}", file, e);
            }
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,broker_api=debug,broker_services=debug")
            }),
        )
        .init();

    info!("Starting digital-first news broker");

    let config = BrokerConfig::from_env()?;

    if config.newsapi_key.is_none() {
        warn!("NEWSAPI_KEY not set - feed and digest requests will fail until it is configured");
    }
    if config.shared_secret.is_none() {
        warn!("BROKER_API_KEY not set - all /v1 requests will be rejected");
    }

    let search = Arc::new(NewsApiClient::with_base_url(
        config.newsapi_key.clone(),
        config.newsapi_base_url.clone(),
    ));
    let broker = BrokerService::new(
        FeedCatalog::curated(),
        search,
        ServiceConfig {
            max_concurrent_fetches: config.max_concurrent_fetches,
            upstream_timeout: Some(config.upstream_timeout),
        },
    )?;

    let state = AppState {
        broker: Arc::new(broker),
        shared_secret: config.shared_secret.as_deref().map(Arc::from),
        search_configured: config.newsapi_key.is_some(),
    };
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
