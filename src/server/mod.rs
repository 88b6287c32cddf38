//! HTTP server setup and routing.

mod chat;
mod moods;
mod routes;
mod songs;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::catalog::SongCatalog;
use crate::chat::Orchestrator;
use crate::config::AppConfig;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<SongCatalog>,
    pub orchestrator: Arc<Orchestrator>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: SongCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let orchestrator = Arc::new(Orchestrator::from_config(&config, catalog.clone(), None));
        Self {
            config: Arc::new(config),
            catalog,
            orchestrator,
            started_at: Instant::now(),
        }
    }

    /// State with deterministic template/song selection, for tests
    pub fn with_rng_seed(config: AppConfig, catalog: SongCatalog, seed: u64) -> Self {
        let catalog = Arc::new(catalog);
        let orchestrator = Arc::new(Orchestrator::from_config(
            &config,
            catalog.clone(),
            Some(seed),
        ));
        Self {
            config: Arc::new(config),
            catalog,
            orchestrator,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/config", get(routes::config))
        // Chat endpoints
        .route("/chat/send", post(chat::send))
        .route("/chat/status", get(chat::status))
        // Mood metadata
        .route("/moods", get(moods::list))
        // Song catalog endpoints
        .route("/songs", get(songs::list))
        .route("/songs/mood/:mood", get(songs::by_mood));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
