//! Result export endpoint.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::{spreadsheet, ExportOutcome};
use crate::types::AnalysisResults;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub results: AnalysisResults,
    pub filename: Option<String>,
}

pub fn router<S: Send + Sync + 'static>() -> Router<AppState<S>> {
    Router::new().route("/api/export", post(export::<S>))
}

/// Write a result set to the export directory as CSV.
async fn export<S: Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ApiResponse<ExportOutcome>>> {
    let dir = state.config.export_dir.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        spreadsheet::export_results(&request.results, &dir, request.filename.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Export task failed: {}", e)))?;

    Ok(Json(ApiResponse::new(outcome)))
}
