//! Health and configuration route handlers.

use axum::{extract::State, Json};

use crate::types::{
    CatalogInfo, ChatInfo, ConfigResponse, HealthResponse, HealthStatus, LocalMlInfo, ServerInfo,
    SourceInfo,
};

use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check endpoint
///
/// GET /api/v1/health
///
/// Degraded means the pattern tier is the only thing answering; the service
/// still responds to every request either way.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = state.orchestrator.service_mode();
    let status = if mode == "pattern_fallback" {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    Json(HealthResponse {
        status,
        version: VERSION.to_string(),
        catalog_loaded: !state.catalog.is_empty(),
        service_mode: mode.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Configuration endpoint
///
/// GET /api/v1/config
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = &state.config;

    let sources = vec![
        SourceInfo {
            id: "groq".to_string(),
            configured: config.sources.primary.api_key.is_some(),
            base_url: config.sources.primary.base_url.clone(),
            model: config.sources.primary.model.clone(),
        },
        SourceInfo {
            id: "grok".to_string(),
            configured: config.sources.secondary.api_key.is_some(),
            base_url: config.sources.secondary.base_url.clone(),
            model: config.sources.secondary.model.clone(),
        },
        SourceInfo {
            id: "analyzer".to_string(),
            configured: config.sources.analyzer.api_key.is_some(),
            base_url: config.sources.analyzer.base_url.clone(),
            model: config.sources.analyzer.model.clone(),
        },
    ];

    Json(ConfigResponse {
        server: ServerInfo {
            host: config.server.host.clone(),
            port: config.server.port,
        },
        sources,
        local_ml: LocalMlInfo {
            base_url: config.local_ml.base_url.clone(),
            health_interval_s: config.local_ml.health_interval_s,
        },
        catalog: CatalogInfo {
            path: config.catalog.path.clone(),
            songs: state.catalog.len(),
        },
        chat: ChatInfo {
            history_window: config.chat.history_window,
        },
    })
}
