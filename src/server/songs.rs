//! Song catalog route handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::catalog::Song;
use crate::types::ApiResponse;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SongsByMoodQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// GET /api/v1/songs
///
/// Return the full catalog.
pub async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<Song>>> {
    let songs = state.catalog.all().to_vec();
    let count = songs.len();
    Json(ApiResponse::ok_with_count(songs, count))
}

/// GET /api/v1/songs/mood/:mood?limit=N
///
/// Return a shuffled selection for a mood category or catalog tag. An
/// unknown mood yields an empty list, not an error.
pub async fn by_mood(
    State(state): State<AppState>,
    Path(mood): Path<String>,
    Query(query): Query<SongsByMoodQuery>,
) -> Json<ApiResponse<Vec<Song>>> {
    let songs = state
        .orchestrator
        .songs_for_mood_str(&mood, query.limit)
        .await;
    let count = songs.len();
    Json(ApiResponse::ok_with_count(songs, count))
}
