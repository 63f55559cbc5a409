//! Engine Routes
//!
//! - POST /api/v1/engine/run - Recompute factors and scores from raw data

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;

use crate::api::dto::EngineRunResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/v1/engine/run
///
/// Runs the full normalize-and-score pipeline over whatever raw data the
/// store holds. Safe to call repeatedly; all writes are upserts.
pub async fn run_engine(State(state): State<Arc<AppState>>) -> ApiResult<Json<EngineRunResponse>> {
    let started = Instant::now();
    let summary = state.engine.run()?;
    let duration_ms = started.elapsed().as_millis() as u64;

    tracing::info!(
        metrics = summary.metrics_processed,
        factors = summary.factors_written,
        scores = summary.scores_written,
        duration_ms,
        "Engine run complete"
    );

    Ok(Json(EngineRunResponse {
        status: "ok".to_string(),
        metrics_processed: summary.metrics_processed,
        factors_written: summary.factors_written,
        scores_written: summary.scores_written,
        duration_ms,
    }))
}
