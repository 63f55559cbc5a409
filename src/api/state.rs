//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::collector::CollectorScheduler;
use crate::engine::SentimentEngine;
use crate::store::SentimentStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Store for raw data, factors, and published scores
    pub store: Arc<SentimentStore>,
    /// Sentiment computation engine
    pub engine: Arc<SentimentEngine>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Collection scheduler (present when the collector is enabled)
    pub scheduler: Option<Arc<CollectorScheduler>>,
}

impl AppState {
    /// Create a new AppState without a collector
    pub fn new(store: Arc<SentimentStore>, engine: Arc<SentimentEngine>, config: ApiConfig) -> Self {
        Self {
            store,
            engine,
            config: Arc::new(config),
            start_time: Instant::now(),
            scheduler: None,
        }
    }

    /// Create AppState with a running collector
    pub fn with_collector(
        store: Arc<SentimentStore>,
        engine: Arc<SentimentEngine>,
        config: ApiConfig,
        scheduler: Arc<CollectorScheduler>,
    ) -> Self {
        Self {
            store,
            engine,
            config: Arc::new(config),
            start_time: Instant::now(),
            scheduler: Some(scheduler),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if the collector is running
    pub fn has_collector(&self) -> bool {
        self.scheduler.is_some()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Default number of months returned by the sentiment series endpoint
    pub default_series_months: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
            request_timeout_ms: 30_000,
            default_series_months: 6,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
