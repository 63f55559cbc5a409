//! Health Routes
//!
//! - GET /health/live - Liveness probe
//! - GET /health/ready - Readiness probe
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Process is up.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Process is up and the store answers queries.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.store.stats() {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
///
/// Full health status with store row counts.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_stats = match state.store.stats() {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!(error = %e, "Store stats unavailable");
            None
        }
    };

    Json(HealthResponse {
        status: if store_stats.is_some() {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        collector_enabled: state.has_collector(),
        store_stats,
    })
}
