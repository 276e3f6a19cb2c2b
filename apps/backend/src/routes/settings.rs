//! Settings endpoints

use axum::{extract::State, Json};

use crate::models::*;
use crate::AppState;

/// GET /api/settings
pub async fn get(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        comparison: state.comparison.config().clone(),
        passages_loaded: state.passages.len(),
    })
}
