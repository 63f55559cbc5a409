//! Industry Routes
//!
//! - GET /api/v1/industries - Industry list with display config and latest score
//! - GET /api/v1/industries/:name/factors - Factor breakdown for one industry

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{FactorsResponse, IndustryListResponse, IndustryResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::domain::Industry;

/// GET /api/v1/industries
///
/// All tracked industries in display order, each with its icon, chart
/// color, and latest published score (absent before the first engine run).
pub async fn list_industries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<IndustryListResponse>> {
    let latest = state.store.latest_scores()?;

    let industries: Vec<IndustryResponse> = Industry::ALL
        .iter()
        .map(|&industry| {
            let style = industry.style();
            IndustryResponse {
                name: industry.label().to_string(),
                slug: industry.slug().to_string(),
                icon: style.icon.to_string(),
                color: style.color.to_string(),
                latest_score: latest
                    .iter()
                    .find(|(i, _)| *i == industry)
                    .map(|(_, score)| *score),
            }
        })
        .collect();

    Ok(Json(IndustryListResponse {
        total: industries.len(),
        industries,
    }))
}

/// GET /api/v1/industries/:name/factors
///
/// Factor weights for one industry, in catalog order, each in [0, 1].
/// Accepts the display label or the ASCII slug; unknown names are 404.
pub async fn get_factors(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<FactorsResponse>> {
    let industry = Industry::from_name(&name)
        .ok_or_else(|| ApiError::NotFound(format!("Industry '{}' not found", name)))?;

    let factors = state.engine.factor_weights(industry)?;

    Ok(Json(FactorsResponse {
        industry: industry.label().to_string(),
        factors,
    }))
}
