//! Mood listing route handler.

use axum::{extract::State, Json};

use crate::mood::{entry_for, FALLBACK_CATEGORY, ALL_CATEGORIES};
use crate::types::{ApiResponse, ListMoodsResponse, MoodInfo};

use super::AppState;

/// GET /api/v1/moods
///
/// List all mood categories with lexicon statistics.
pub async fn list(State(_state): State<AppState>) -> Json<ApiResponse<ListMoodsResponse>> {
    let moods = ALL_CATEGORIES
        .iter()
        .map(|category| {
            let entry = entry_for(*category);
            MoodInfo {
                id: category.id().to_string(),
                name: category.name().to_string(),
                keywords: entry.keywords.len(),
                phrases: entry.phrases.len(),
                emojis: entry.emojis.len(),
                weight: entry.weight,
            }
        })
        .collect();

    Json(ApiResponse::ok(ListMoodsResponse {
        moods,
        default_mood: FALLBACK_CATEGORY.id().to_string(),
    }))
}
