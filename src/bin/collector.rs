//! Barometer Collector
//!
//! One-shot or looping collection runs against the market-data gateway,
//! optionally followed by an engine run so freshly landed data is scored
//! immediately.
//!
//! Run with: cargo run --bin barometer-collector -- --once --score

use anyhow::Result;
use barometer::collector::{CollectorScheduler, HttpQuoteSource, QuoteProviderConfig};
use barometer::engine::SentimentEngine;
use barometer::store::SentimentStore;
use barometer::Config;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "barometer-collector")]
#[command(about = "Collect raw metric readings into the barometer store")]
struct Args {
    /// Run one sweep and exit instead of looping on the configured interval
    #[arg(long)]
    once: bool,

    /// Run the sentiment engine after each sweep
    #[arg(long)]
    score: bool,

    /// Config file path (defaults to the standard search locations)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "barometer=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    tracing::info!("Starting daily sentiment data collection");
    tracing::info!("Gateway: {}", config.collector.quotes_url);

    let store = Arc::new(SentimentStore::open(config.store.db_path.as_ref())?);

    // Make sure the catalog exists before the first sweep
    if store.metric_defs()?.is_empty() {
        store.seed_sample()?;
        tracing::info!("Registered the standard metric catalog");
    }

    let source = Arc::new(HttpQuoteSource::new(QuoteProviderConfig {
        base_url: config.collector.quotes_url.clone(),
        ..Default::default()
    })?);

    let scheduler = Arc::new(CollectorScheduler::new(
        Arc::clone(&store),
        source,
        config.collector.interval_hours,
    ));

    let engine = SentimentEngine::new(Arc::clone(&store));

    if args.once {
        let report = scheduler.run_once().await?;
        tracing::info!(
            metrics = report.metrics_swept,
            points = report.points_collected,
            failures = report.failures,
            "Collection finished"
        );

        if args.score {
            let summary = engine.run()?;
            tracing::info!(scores = summary.scores_written, "Scoring finished");
        }
        return Ok(());
    }

    let interval = std::time::Duration::from_secs(config.collector.interval_hours * 3600);
    loop {
        match scheduler.run_once().await {
            Ok(report) => {
                tracing::info!(
                    metrics = report.metrics_swept,
                    points = report.points_collected,
                    failures = report.failures,
                    "Collection sweep finished"
                );
                if args.score {
                    match engine.run() {
                        Ok(summary) => {
                            tracing::info!(scores = summary.scores_written, "Scoring finished")
                        }
                        Err(e) => tracing::error!(error = %e, "Scoring failed"),
                    }
                }
            }
            Err(e) => tracing::error!(error = %e, "Collection sweep aborted"),
        }

        tracing::info!("Next sweep in {} hours", config.collector.interval_hours);
        tokio::time::sleep(interval).await;
    }
}
