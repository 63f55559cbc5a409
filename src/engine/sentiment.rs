//! Sentiment scoring
//!
//! Orchestrates the normalize → aggregate → publish pipeline over the store.

use super::normalize::{logistic, mean, squash_score, zscore};
use super::EngineResult;
use crate::domain::{FactorKind, FactorWeight, Industry, ProcessedFactor, SentimentScore, SeriesRecord};
use crate::store::SentimentStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The sentiment computation engine
///
/// Stateless apart from its store handle; safe to share behind an `Arc`.
pub struct SentimentEngine {
    store: Arc<SentimentStore>,
}

/// Summary of one engine run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EngineRunSummary {
    /// Metrics that had raw data to process
    pub metrics_processed: usize,
    /// Normalized factor rows upserted
    pub factors_written: usize,
    /// Sentiment score rows upserted
    pub scores_written: usize,
}

impl SentimentEngine {
    pub fn new(store: Arc<SentimentStore>) -> Self {
        Self { store }
    }

    /// Run the full pipeline: normalize every metric, then score every industry
    ///
    /// Idempotent - all writes are keyed upserts, so re-running over the same
    /// raw data produces the same rows.
    pub fn run(&self) -> EngineResult<EngineRunSummary> {
        let defs = self.store.metric_defs()?;
        let mut metrics_processed = 0;
        let mut factors_written = 0;

        for def in &defs {
            let series = self.store.raw_series(def.id)?;
            if series.is_empty() {
                tracing::debug!(metric = %def.name, "No raw data, skipping");
                continue;
            }

            tracing::info!(industry = %def.industry, metric = %def.name, points = series.len(), "Normalizing");

            let values: Vec<f64> = series.iter().map(|o| o.value).collect();
            let normalized = zscore(&values);

            for (obs, z) in series.iter().zip(normalized) {
                self.store.upsert_factor(&ProcessedFactor {
                    metric_id: def.id,
                    date: obs.date,
                    value: z,
                    kind: FactorKind::Normalized,
                })?;
                factors_written += 1;
            }

            metrics_processed += 1;
        }

        let mut scores_written = 0;
        for industry in Industry::ALL {
            tracing::info!(industry = %industry, "Scoring");

            let by_date = self
                .store
                .factors_by_date(industry, FactorKind::Normalized)?;

            for (date, factors) in by_date {
                let values: Vec<f64> = factors.iter().map(|(_, v)| *v).collect();
                let score = squash_score(mean(&values));
                let details: BTreeMap<String, f64> = factors.into_iter().collect();

                self.store.upsert_score(&SentimentScore {
                    industry,
                    date,
                    score,
                    details,
                })?;
                scores_written += 1;
            }
        }

        Ok(EngineRunSummary {
            metrics_processed,
            factors_written,
            scores_written,
        })
    }

    /// Factor weights for one industry's radar breakdown
    ///
    /// Each metric's latest normalized value is mapped through the logistic
    /// function into (0, 1). Order follows the metric catalog. An industry
    /// with no processed data yields an empty list, not an error.
    pub fn factor_weights(&self, industry: Industry) -> EngineResult<Vec<FactorWeight>> {
        let defs = self.store.metrics_for(industry)?;
        let mut weights = Vec::with_capacity(defs.len());

        for def in defs {
            if let Some(factor) = self.store.latest_factor(def.id, FactorKind::Normalized)? {
                weights.push(FactorWeight::new(def.name, logistic(factor.value)));
            }
        }

        Ok(weights)
    }

    /// Project stored scores into the dashboard's monthly series contract
    ///
    /// Chronological, at most `months` records, each month carrying the last
    /// available score per industry.
    pub fn monthly_series(&self, months: usize) -> EngineResult<Vec<SeriesRecord>> {
        let scores = self.store.sentiment_series()?;

        // Scores arrive date-ordered, so a plain insert leaves each month
        // holding its latest score per industry.
        let mut by_month: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for s in scores {
            by_month
                .entry(s.date.format("%Y-%m").to_string())
                .or_default()
                .insert(s.industry.label().to_string(), s.score);
        }

        let skip = by_month.len().saturating_sub(months);
        Ok(by_month
            .into_iter()
            .skip(skip)
            .map(|(date, scores)| SeriesRecord { date, scores })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_metric_defs, sample_raw_observations, MetricDef, RawObservation};
    use chrono::NaiveDate;

    fn seeded_engine() -> SentimentEngine {
        let store = Arc::new(SentimentStore::open_in_memory().unwrap());
        for sample in sample_metric_defs() {
            let id = store.register_metric(&sample.def).unwrap();
            for obs in sample_raw_observations(id, &sample.readings) {
                store.upsert_raw(&obs).unwrap();
            }
        }
        SentimentEngine::new(store)
    }

    #[test]
    fn test_run_processes_all_metrics() {
        let engine = seeded_engine();
        let summary = engine.run().unwrap();

        assert_eq!(summary.metrics_processed, 12);
        assert_eq!(summary.factors_written, 12 * 6);
        // One score per industry per month
        assert_eq!(summary.scores_written, 4 * 6);
    }

    #[test]
    fn test_run_is_idempotent() {
        let engine = seeded_engine();
        let first = engine.run().unwrap();
        let second = engine.run().unwrap();
        assert_eq!(first, second);

        // No duplicate months in the published series
        let series = engine.monthly_series(12).unwrap();
        assert_eq!(series.len(), 6);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let engine = seeded_engine();
        engine.run().unwrap();

        for record in engine.monthly_series(12).unwrap() {
            for (industry, score) in &record.scores {
                assert!(
                    (-1.0..=1.0).contains(score),
                    "{} {} out of range: {}",
                    record.date,
                    industry,
                    score
                );
            }
        }
    }

    #[test]
    fn test_monthly_series_is_chronological() {
        let engine = seeded_engine();
        engine.run().unwrap();

        let series = engine.monthly_series(6).unwrap();
        assert_eq!(series.first().unwrap().date, "2023-01");
        assert_eq!(series.last().unwrap().date, "2023-06");
        for pair in series.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_monthly_series_truncates_to_requested_months() {
        let engine = seeded_engine();
        engine.run().unwrap();

        let series = engine.monthly_series(2).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2023-05");
        assert_eq!(series[1].date, "2023-06");
    }

    #[test]
    fn test_factor_weights_follow_catalog_order() {
        let engine = seeded_engine();
        engine.run().unwrap();

        let weights = engine.factor_weights(Industry::Liquor).unwrap();
        let names: Vec<_> = weights.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["中证白酒指数", "茅台批发价", "库存周转"]);

        for w in &weights {
            assert!(w.value > 0.0 && w.value < 1.0);
        }
    }

    #[test]
    fn test_factor_weights_empty_without_data() {
        let store = Arc::new(SentimentStore::open_in_memory().unwrap());
        store
            .register_metric(&MetricDef::new(Industry::Liquor, "中证白酒指数", "sz399997"))
            .unwrap();
        let engine = SentimentEngine::new(store);

        // Registered but never collected: no weights, no error
        let weights = engine.factor_weights(Industry::Liquor).unwrap();
        assert!(weights.is_empty());
    }

    #[test]
    fn test_flat_series_scores_zero() {
        let store = Arc::new(SentimentStore::open_in_memory().unwrap());
        let id = store
            .register_metric(&MetricDef::new(Industry::Robotics, "制造业PMI", "pmi"))
            .unwrap();
        for month in 1..=3 {
            let date = NaiveDate::from_ymd_opt(2023, month, 15).unwrap();
            store.upsert_raw(&RawObservation::new(id, date, 50.0)).unwrap();
        }

        let engine = SentimentEngine::new(store);
        engine.run().unwrap();

        let series = engine.monthly_series(3).unwrap();
        for record in series {
            assert_eq!(record.get("机器人"), Some(0.0));
        }
    }
}
