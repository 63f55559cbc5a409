//! Barometer API Server
//!
//! Run with: cargo run --bin barometer-api
//!
//! # Configuration
//!
//! Loaded from config.toml with environment overrides:
//! - `BAROMETER_DB_PATH`: SQLite database path
//! - `BAROMETER_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `BAROMETER_API_PORT`: Port to listen on (default: 8090)
//! - `BAROMETER_SEED_DEMO`: Seed sample data when the store is empty (default: true)
//! - `BAROMETER_QUOTES_URL`: Market-data gateway URL
//! - `BAROMETER_COLLECTOR_ENABLED`: Enable the background collection sweep
//! - `RUST_LOG`: Log level (default: info)

use barometer::api::{serve, ApiConfig, AppState};
use barometer::collector::{CollectorScheduler, HttpQuoteSource, QuoteProviderConfig};
use barometer::engine::SentimentEngine;
use barometer::store::SentimentStore;
use barometer::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();

    init_tracing(&config);

    tracing::info!("Starting Barometer API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.store.db_path);

    let store = Arc::new(SentimentStore::open(config.store.db_path.as_ref())?);
    let engine = Arc::new(SentimentEngine::new(Arc::clone(&store)));

    // Fresh checkout convenience: land the sample dataset and score it so
    // the dashboard has something to render before any real collection.
    if config.api.seed_demo && store.is_empty()? {
        let written = store.seed_sample()?;
        let summary = engine.run()?;
        tracing::info!(
            observations = written,
            scores = summary.scores_written,
            "Seeded sample dataset into empty store"
        );
    }

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        request_timeout_ms: config.api.request_timeout_secs * 1000,
        ..Default::default()
    };

    let state = if config.collector.enabled {
        tracing::info!("Collector enabled: {}", config.collector.quotes_url);

        let source = Arc::new(HttpQuoteSource::new(QuoteProviderConfig {
            base_url: config.collector.quotes_url.clone(),
            ..Default::default()
        })?);

        let scheduler = Arc::new(CollectorScheduler::new(
            Arc::clone(&store),
            source,
            config.collector.interval_hours,
        ));
        Arc::clone(&scheduler).start_background();

        AppState::with_collector(Arc::clone(&store), engine, api_config.clone(), scheduler)
    } else {
        tracing::info!("Collector disabled (set BAROMETER_COLLECTOR_ENABLED to enable)");
        AppState::new(Arc::clone(&store), engine, api_config.clone())
    };

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Barometer API server stopped");
    Ok(())
}

/// Initialize tracing from the logging config
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("barometer={},tower_http=debug", config.logging.level).into()
    });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
