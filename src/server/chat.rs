//! Chat API route handlers.

use axum::{extract::State, Json};
use tracing::info;

use crate::chat::ResponseEnvelope;
use crate::error::AppError;
use crate::types::{ApiResponse, ChatRequest, ChatStatusResponse, SourceStatus};

use super::AppState;

/// POST /api/v1/chat/send
///
/// Generate a response for a user message. The pipeline itself is total;
/// the only rejected input is an empty message.
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ResponseEnvelope>>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }

    info!(
        user_id = request.user_id.as_deref().unwrap_or("anonymous"),
        history_len = request.conversation_history.len(),
        "Chat message received"
    );

    let envelope = state.orchestrator.respond(request).await;
    Ok(Json(ApiResponse::ok(envelope)))
}

/// GET /api/v1/chat/status
///
/// Report the current operating mode and per-source availability.
pub async fn status(State(state): State<AppState>) -> Json<ChatStatusResponse> {
    let sources = state
        .orchestrator
        .availability()
        .into_iter()
        .map(|(id, available)| SourceStatus {
            id: id.to_string(),
            available,
        })
        .collect();

    Json(ChatStatusResponse {
        service_mode: state.orchestrator.service_mode().to_string(),
        sources,
    })
}
