//! # Barometer
//!
//! Industry Sentiment Barometer - A full-stack Rust application for
//! collecting, computing, and serving industry business-cycle ("景气度")
//! sentiment scores.
//!
//! ## Features
//!
//! - **Collection**: incremental daily pulls from a market-data gateway
//! - **Computation**: z-score normalization and per-industry scoring in [-1, 1]
//! - **Persistence**: SQLite-backed upsert-only fact tables
//! - **Serving**: REST API feeding the dashboard's trend and radar views
//!
//! ## Modules
//!
//! - [`domain`]: Industry enumeration and pipeline record types
//! - [`store`]: SQLite persistence for raw data, factors, and scores
//! - [`engine`]: Sentiment computation pipeline
//! - [`collector`]: Quote providers and the collection scheduler
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use barometer::engine::SentimentEngine;
//! use barometer::store::SentimentStore;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open the store and land the built-in sample dataset
//!     let store = Arc::new(SentimentStore::open("barometer.db".as_ref())?);
//!     store.seed_sample()?;
//!
//!     // Normalize and score
//!     let engine = SentimentEngine::new(Arc::clone(&store));
//!     let summary = engine.run()?;
//!     println!("Published {} scores", summary.scores_written);
//!
//!     // Project the dashboard series
//!     for record in engine.monthly_series(6)? {
//!         println!("{}: {:?}", record.date, record.scores);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod collector;
pub mod config;
pub mod domain;
pub mod engine;
pub mod store;

// Re-export top-level types for convenience
pub use domain::{
    FactorKind, FactorWeight, Industry, IndustryStyle, MetricDef, ProcessedFactor,
    RawObservation, SentimentScore, SeriesRecord,
};

pub use store::{SentimentStore, StoreError, StoreResult, StoreStats};

pub use engine::{EngineError, EngineResult, EngineRunSummary, SentimentEngine};

pub use collector::{
    CollectionReport, CollectorError, CollectorScheduler, HttpQuoteSource, Quote,
    QuoteProviderConfig, QuoteSource, RunStatus, SourceStatus,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    Config, ConfigError, ApiConfig as ConfigApiConfig, CollectorConfig as ConfigCollectorConfig,
    LoggingConfig, StoreConfig as ConfigStoreConfig,
};
