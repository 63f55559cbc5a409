//! Domain Model
//!
//! Core types shared by the store, engine, collector, and API:
//! - [`Industry`]: the fixed set of tracked industry categories
//! - [`MetricDef`]: a sub-indicator contributing to one industry's score
//! - [`SentimentScore`]: one computed score for an industry on a date
//! - [`FactorWeight`]: the per-industry radar contract

mod sample;
mod types;

pub use sample::{sample_metric_defs, sample_raw_observations, SampleMetricDef};
pub use types::{
    FactorKind, FactorWeight, Industry, IndustryStyle, MetricDef, ProcessedFactor,
    RawObservation, SentimentScore, SeriesRecord,
};
