// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::clock::SystemClock;
use crate::application::session_controller::SessionController;
use crate::application::snapshot_source::SnapshotSource;
use crate::application::trend_session::TrendSession;
use crate::infrastructure::config::{load_trend_config, SourceSettings};
use crate::infrastructure::file_source::FileSnapshotSource;
use crate::infrastructure::http_source::HttpSnapshotSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_annotations, get_trend, health_check, reload};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_trend_config()?;
    let zone = config.display.calendar_zone()?;

    // Create snapshot source (infrastructure layer)
    let source: Arc<dyn SnapshotSource> = match config.source {
        SourceSettings::Http { url } => Arc::new(HttpSnapshotSource::new(url, zone)),
        SourceSettings::File { path } => Arc::new(FileSnapshotSource::new(path, zone)),
    };

    // Create session (application layer) and kick off the single load for this session
    let tracked = config.entities.iter().map(|e| e.id.clone()).collect();
    let session = TrendSession::new(Arc::new(SystemClock), zone, config.window.default_days)
        .tracking(tracked);
    let controller = SessionController::new(session, source);
    if controller.start_load().await.is_none() {
        tracing::warn!("Initial snapshot load was not started");
    }

    let state = Arc::new(AppState {
        controller: controller.clone(),
        entities: config.entities.iter().map(|e| e.to_entity()).collect(),
        zone,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/trend", get(get_trend))
        .route("/api/reload", post(reload))
        .route("/api/annotations", get(get_annotations))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting win-trend service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Any fetch still in flight is discarded from here on
    controller.teardown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown requested");
}
