//! Barometer demo run
//!
//! Seeds the built-in sample dataset, runs the engine, and prints the
//! published series. A quick way to see the full pipeline end to end.

use barometer::engine::SentimentEngine;
use barometer::store::SentimentStore;
use barometer::Industry;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "barometer=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Barometer Sentiment Engine v{}", env!("CARGO_PKG_VERSION"));

    let config = barometer::Config::load_default();
    tracing::info!("Database: {}", config.store.db_path);

    let store = Arc::new(SentimentStore::open(config.store.db_path.as_ref())?);

    // Land the sample catalog and readings
    let written = store.seed_sample()?;
    tracing::info!("Seeded {} sample observations", written);

    // Normalize and score
    let engine = SentimentEngine::new(Arc::clone(&store));
    let summary = engine.run()?;
    tracing::info!(
        "Engine run: {} metrics, {} factors, {} scores",
        summary.metrics_processed,
        summary.factors_written,
        summary.scores_written
    );

    // Show the published series the dashboard consumes
    for record in engine.monthly_series(6)? {
        let line: Vec<String> = Industry::ALL
            .iter()
            .filter_map(|i| {
                record
                    .get(i.label())
                    .map(|score| format!("{} {:+.2}", i.label(), score))
            })
            .collect();
        tracing::info!("{}  {}", record.date, line.join("  "));
    }

    // Factor breakdown for each industry
    for industry in Industry::ALL {
        let weights = engine.factor_weights(industry)?;
        let parts: Vec<String> = weights
            .iter()
            .map(|w| format!("{} {:.0}%", w.name, w.value * 100.0))
            .collect();
        tracing::info!("{}: {}", industry.label(), parts.join(", "));
    }

    let stats = store.stats()?;
    tracing::info!("Store: {}", stats);

    Ok(())
}
