//! API layer
//!
//! HTTP client for the Barometer REST API.

mod client;

pub use client::{fetch_details, fetch_series};
