//! Sentiment Series Route
//!
//! - GET /api/v1/sentiment - Monthly sentiment records, chronological

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{SeriesMeta, SeriesParams, SeriesResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// Hard cap on the months parameter
const MAX_MONTHS: usize = 120;

/// GET /api/v1/sentiment
///
/// Returns the trailing monthly sentiment series, one flat record per
/// month, each mapping industry label to its score in [-1, 1].
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeriesParams>,
) -> ApiResult<Json<SeriesResponse>> {
    let months = params
        .months
        .unwrap_or(state.config.default_series_months);

    if months == 0 || months > MAX_MONTHS {
        return Err(ApiError::Validation(format!(
            "months must be between 1 and {}",
            MAX_MONTHS
        )));
    }

    let records = state.engine.monthly_series(months)?;

    Ok(Json(SeriesResponse {
        meta: SeriesMeta {
            months: records.len(),
            score_range: [-1.0, 1.0],
        },
        records,
    }))
}
