//! Comparison endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/compare
pub async fn compare(
    State(state): State<AppState>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<ComparisonResult>> {
    let result = state.comparison.clone().compare_blocking(payload).await?;
    Ok(Json(result))
}

/// POST /api/compare/batch
pub async fn batch(
    State(state): State<AppState>,
    Json(payload): Json<BatchCompareRequest>,
) -> Result<Json<BatchCompareResponse>> {
    let results = state.comparison.clone().compare_batch(payload.items).await?;
    Ok(Json(BatchCompareResponse { results }))
}
