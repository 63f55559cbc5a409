//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::domain::{FactorWeight, SeriesRecord};
use serde::{Deserialize, Serialize};

// ============================================
// SENTIMENT SERIES DTOs
// ============================================

/// Query parameters for the sentiment series endpoint
#[derive(Debug, Deserialize)]
pub struct SeriesParams {
    /// Number of trailing months to return (default: configured value)
    #[serde(default)]
    pub months: Option<usize>,
}

/// Sentiment series response
///
/// `records` serialize flat, one object per month:
/// `{"date": "2023-06", "白酒": 0.7, "新能源车": 0.4, ...}`
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub records: Vec<SeriesRecord>,
    pub meta: SeriesMeta,
}

/// Series metadata
#[derive(Debug, Serialize)]
pub struct SeriesMeta {
    /// Months returned
    pub months: usize,
    /// Score range published by the engine
    pub score_range: [f64; 2],
}

// ============================================
// INDUSTRY DTOs
// ============================================

/// One industry with display config and latest score
#[derive(Debug, Serialize)]
pub struct IndustryResponse {
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub color: String,
    /// Latest published score in [-1, 1], absent before the first engine run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_score: Option<f64>,
}

/// Industry list response
#[derive(Debug, Serialize)]
pub struct IndustryListResponse {
    pub total: usize,
    pub industries: Vec<IndustryResponse>,
}

/// Factor breakdown for one industry
#[derive(Debug, Serialize)]
pub struct FactorsResponse {
    pub industry: String,
    pub factors: Vec<FactorWeight>,
}

// ============================================
// ENGINE DTOs
// ============================================

/// Engine run response
#[derive(Debug, Serialize)]
pub struct EngineRunResponse {
    pub status: String,
    pub metrics_processed: usize,
    pub factors_written: usize,
    pub scores_written: usize,
    pub duration_ms: u64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub collector_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_stats: Option<crate::store::StoreStats>,
}
