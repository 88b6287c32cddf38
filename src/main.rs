//! Mr. Sarcastic chat service - Entry Point

use anyhow::Context;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sarcastic_chat::catalog::SongCatalog;
use sarcastic_chat::chat::spawn_health_probe;
use sarcastic_chat::config::AppConfig;
use sarcastic_chat::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging();

    info!("Starting Mr. Sarcastic chat service");

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config from environment: {e}, using defaults");
        AppConfig::default()
    });

    info!(
        primary = %config.sources.primary.model,
        secondary = %config.sources.secondary.model,
        local_ml = %config.local_ml.base_url,
        "Configuration loaded"
    );

    // Load the song catalog once; an empty catalog is a valid degenerate state
    let catalog = SongCatalog::load(&config.catalog.path);

    // Create app state
    let health_interval = Duration::from_secs(config.local_ml.health_interval_s);
    let state = server::AppState::new(config.clone(), catalog);

    // Re-probe unavailable sources in the background
    let probe = spawn_health_probe(
        state.orchestrator.sources(),
        state.orchestrator.registry(),
        health_interval,
    );

    // Create router
    let app = server::create_router(state);

    // Bind to socket
    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(%addr, "Server listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    probe.shutdown();
    info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sarcastic_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
