//! Sentiment Computation Engine
//!
//! Turns raw metric readings into published industry sentiment:
//!
//! 1. Each metric's raw series is z-score normalized against its own history.
//! 2. Per industry and date, the normalized factors are averaged and squashed
//!    into [-1, 1].
//! 3. Factor weights in [0, 1] are derived from each metric's latest
//!    normalized value for the radar breakdown.
//!
//! All steps are idempotent: re-running the engine upserts the same rows.

mod normalize;
mod sentiment;

pub use normalize::{logistic, mean, squash_score, zscore};
pub use sentiment::{EngineRunSummary, SentimentEngine};

use crate::store::StoreError;

/// Errors produced by the engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
