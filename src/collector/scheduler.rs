//! Collection scheduler
//!
//! Sweeps the metric catalog against a quote source on a fixed interval and
//! tracks per-metric status. A failing metric is logged and counted; the
//! sweep continues.

use super::{CollectorError, QuoteSource};
use crate::domain::RawObservation;
use crate::store::SentimentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Outcome of the last collection attempt for one metric
#[derive(Debug, Clone, Serialize)]
pub enum RunStatus {
    Success { points: usize },
    Failed { error: String },
    RateLimited { retry_after: u64 },
}

/// Per-metric collection status
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub code: String,
    pub metric: String,
    pub last_run: Option<DateTime<Utc>>,
    pub last_status: Option<RunStatus>,
    pub error_count: u32,
}

/// Summary of one full sweep
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectionReport {
    pub metrics_swept: usize,
    pub points_collected: usize,
    pub failures: usize,
}

/// Runs periodic collection sweeps
pub struct CollectorScheduler {
    store: Arc<SentimentStore>,
    source: Arc<dyn QuoteSource>,
    interval_hours: u64,
    status: RwLock<HashMap<String, SourceStatus>>,
}

impl CollectorScheduler {
    pub fn new(
        store: Arc<SentimentStore>,
        source: Arc<dyn QuoteSource>,
        interval_hours: u64,
    ) -> Self {
        Self {
            store,
            source,
            interval_hours,
            status: RwLock::new(HashMap::new()),
        }
    }

    /// Sweep every cataloged metric once
    ///
    /// Each metric is fetched incrementally from its latest stored date.
    pub async fn run_once(&self) -> Result<CollectionReport, CollectorError> {
        let defs = self.store.metric_defs()?;
        let mut report = CollectionReport {
            metrics_swept: defs.len(),
            points_collected: 0,
            failures: 0,
        };

        for def in defs {
            let since = self.store.latest_raw_date(def.id)?;

            let outcome = match self.source.daily_closes(&def.code, since).await {
                Ok(quotes) => {
                    let mut points = 0;
                    let mut store_failure = None;
                    for quote in &quotes {
                        match self
                            .store
                            .upsert_raw(&RawObservation::new(def.id, quote.date, quote.close))
                        {
                            Ok(()) => points += 1,
                            Err(e) => {
                                store_failure = Some(e.to_string());
                                break;
                            }
                        }
                    }

                    match store_failure {
                        None => {
                            tracing::info!(metric = %def.name, points, "Collected");
                            report.points_collected += points;
                            RunStatus::Success { points }
                        }
                        Some(error) => {
                            tracing::error!(metric = %def.name, %error, "Store write failed");
                            report.failures += 1;
                            RunStatus::Failed { error }
                        }
                    }
                }
                Err(CollectorError::RateLimited(retry_after)) => {
                    tracing::warn!(metric = %def.name, retry_after, "Rate limited");
                    report.failures += 1;
                    RunStatus::RateLimited { retry_after }
                }
                Err(e) => {
                    tracing::error!(metric = %def.name, error = %e, "Collection failed");
                    report.failures += 1;
                    RunStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };

            let mut status = self.status.write().await;
            let entry = status.entry(def.code.clone()).or_insert_with(|| SourceStatus {
                code: def.code.clone(),
                metric: def.name.clone(),
                last_run: None,
                last_status: None,
                error_count: 0,
            });
            entry.last_run = Some(Utc::now());
            match &outcome {
                RunStatus::Success { .. } => entry.error_count = 0,
                _ => entry.error_count += 1,
            }
            entry.last_status = Some(outcome);
        }

        Ok(report)
    }

    /// Status of every swept metric
    pub async fn status(&self) -> Vec<SourceStatus> {
        let status = self.status.read().await;
        let mut all: Vec<_> = status.values().cloned().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        all
    }

    /// Spawn the periodic sweep loop
    pub fn start_background(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let interval = std::time::Duration::from_secs(self.interval_hours * 3600);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match self.run_once().await {
                    Ok(report) => {
                        tracing::info!(
                            metrics = report.metrics_swept,
                            points = report.points_collected,
                            failures = report.failures,
                            "Collection sweep finished"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Collection sweep aborted");
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::Quote;
    use crate::domain::{Industry, MetricDef};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FixedSource {
        quotes: Vec<Quote>,
        fail_codes: Vec<&'static str>,
    }

    #[async_trait]
    impl QuoteSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn daily_closes(
            &self,
            code: &str,
            since: Option<NaiveDate>,
        ) -> Result<Vec<Quote>, CollectorError> {
            if self.fail_codes.contains(&code) {
                return Err(CollectorError::Provider("gateway down".into()));
            }
            Ok(self
                .quotes
                .iter()
                .filter(|q| since.map(|s| q.date > s).unwrap_or(true))
                .cloned()
                .collect())
        }
    }

    fn quote(month: u32, day: u32, close: f64) -> Quote {
        Quote {
            date: NaiveDate::from_ymd_opt(2023, month, day).unwrap(),
            close,
        }
    }

    #[tokio::test]
    async fn test_run_once_lands_quotes_in_store() {
        let store = Arc::new(SentimentStore::open_in_memory().unwrap());
        let id = store
            .register_metric(&MetricDef::new(Industry::Liquor, "中证白酒指数", "sz399997"))
            .unwrap();

        let source = Arc::new(FixedSource {
            quotes: vec![quote(1, 31, 14650.0), quote(2, 28, 14980.0)],
            fail_codes: vec![],
        });
        let scheduler = CollectorScheduler::new(Arc::clone(&store), source, 24);

        let report = scheduler.run_once().await.unwrap();
        assert_eq!(report.points_collected, 2);
        assert_eq!(report.failures, 0);
        assert_eq!(store.raw_series(id).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_run_once_is_incremental() {
        let store = Arc::new(SentimentStore::open_in_memory().unwrap());
        store
            .register_metric(&MetricDef::new(Industry::Liquor, "中证白酒指数", "sz399997"))
            .unwrap();

        let source = Arc::new(FixedSource {
            quotes: vec![quote(1, 31, 14650.0), quote(2, 28, 14980.0)],
            fail_codes: vec![],
        });
        let scheduler = CollectorScheduler::new(store, source, 24);

        scheduler.run_once().await.unwrap();
        // Second sweep finds nothing newer than 2023-02-28
        let report = scheduler.run_once().await.unwrap();
        assert_eq!(report.points_collected, 0);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_sweep() {
        let store = Arc::new(SentimentStore::open_in_memory().unwrap());
        store
            .register_metric(&MetricDef::new(Industry::Liquor, "中证白酒指数", "bad_code"))
            .unwrap();
        let good = store
            .register_metric(&MetricDef::new(Industry::Robotics, "制造业PMI", "pmi"))
            .unwrap();

        let source = Arc::new(FixedSource {
            quotes: vec![quote(1, 31, 49.2)],
            fail_codes: vec!["bad_code"],
        });
        let scheduler = CollectorScheduler::new(Arc::clone(&store), source, 24);

        let report = scheduler.run_once().await.unwrap();
        assert_eq!(report.failures, 1);
        assert_eq!(report.points_collected, 1);
        assert_eq!(store.raw_series(good).unwrap().len(), 1);

        let status = scheduler.status().await;
        let failed = status.iter().find(|s| s.code == "bad_code").unwrap();
        assert_eq!(failed.error_count, 1);
        assert!(matches!(failed.last_status, Some(RunStatus::Failed { .. })));
    }
}
