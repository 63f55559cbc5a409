//! Data Collection
//!
//! Pulls raw readings for every cataloged metric from a remote quote
//! provider and lands them in the store. Collection is incremental (only
//! dates after the last stored reading are requested) and failure-tolerant:
//! one metric failing never aborts the sweep.

mod quotes;
mod scheduler;

pub use quotes::{HttpQuoteSource, Quote, QuoteProviderConfig};
pub use scheduler::{CollectionReport, CollectorScheduler, RunStatus, SourceStatus};

use async_trait::async_trait;
use chrono::NaiveDate;

/// Common trait for quote providers
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Provider name for logs and status reporting
    fn name(&self) -> &str;

    /// Daily closes for a metric code, oldest first
    ///
    /// `since` bounds the request to dates strictly after the given date.
    async fn daily_closes(
        &self,
        code: &str,
        since: Option<NaiveDate>,
    ) -> Result<Vec<Quote>, CollectorError>;
}

/// Errors that can occur during collection
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),
}
