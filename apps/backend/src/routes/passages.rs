//! Passage endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/passages
pub async fn list(State(state): State<AppState>) -> Json<PassageListResponse> {
    Json(PassageListResponse {
        passages: state.passages.summaries(),
    })
}

/// GET /api/passages/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Passage>> {
    let passage = state.passages.get(id)?;
    Ok(Json(passage.clone()))
}

/// POST /api/passages/:id/attempt
pub async fn attempt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AttemptRequest>,
) -> Result<Json<ComparisonResult>> {
    let passage = state.passages.get(id)?;

    let request = CompareRequest {
        original_text: passage.text.clone(),
        spoken_text: payload.spoken_text,
        key_words: passage.key_words.clone(),
        overrides: Some(passage.overrides()),
    };
    let result = state.comparison.clone().compare_blocking(request).await?;

    tracing::debug!(
        passage = id,
        accuracy = result.accuracy,
        category = result.feedback_category.as_str(),
        "scored passage attempt"
    );
    Ok(Json(result))
}
