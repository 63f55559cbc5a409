//! HTTP API Client
//!
//! Functions for communicating with the Barometer REST API.

use gloo_net::http::Request;
use std::collections::HashMap;

use crate::data::{FactorWeight, SeriesRecord, INDUSTRIES};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8090/api/v1";

/// Get the API base URL from local storage or use default
///
/// Setting the `barometer_api_url` key in local storage points the
/// dashboard at a non-default API without a rebuild.
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("barometer_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct SeriesResponse {
    records: Vec<SeriesRecord>,
}

#[derive(Debug, serde::Deserialize)]
struct FactorsResponse {
    factors: Vec<FactorWeight>,
}

// ============ API Functions ============

/// Fetch the monthly sentiment series
pub async fn fetch_series() -> Result<Vec<SeriesRecord>, String> {
    let url = format!("{}/sentiment", get_api_base());

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("API returned {}", response.status()));
    }

    let body: SeriesResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse failed: {}", e))?;

    Ok(body.records)
}

/// Fetch the factor breakdown for every tracked industry
///
/// Industries the API cannot answer for are simply absent from the map;
/// lookups then degrade to empty factor lists.
pub async fn fetch_details() -> Result<HashMap<String, Vec<FactorWeight>>, String> {
    let base = get_api_base();
    let mut details = HashMap::new();

    for config in INDUSTRIES {
        let url = format!("{}/industries/{}/factors", base, config.name);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.ok() {
            web_sys::console::warn_1(
                &format!("No factors for {}: {}", config.name, response.status()).into(),
            );
            continue;
        }

        let body: FactorsResponse = response
            .json()
            .await
            .map_err(|e| format!("Parse failed: {}", e))?;

        details.insert(config.name.to_string(), body.factors);
    }

    Ok(details)
}
