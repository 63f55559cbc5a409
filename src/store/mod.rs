//! Sentiment Store - SQLite persistence for the pipeline
//!
//! Four tables, keyed the way the computation pipeline writes them:
//! - `dim_metrics`: the metric catalog (industry, name, source code)
//! - `fact_raw_data`: raw readings, one per metric per date
//! - `fact_processed_factors`: normalized readings, keyed by processing kind
//! - `fact_industry_sentiment`: published scores with per-factor details
//!
//! All writes are upserts so the collector and engine can re-run safely.
//! The connection sits behind a mutex; handlers hold it only for the
//! duration of one statement batch.

use crate::domain::{
    FactorKind, Industry, MetricDef, ProcessedFactor, RawObservation, SentimentScore,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Errors from the store layer
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("Store lock poisoned")]
    Lock,
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Row counts for health reporting
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoreStats {
    pub metrics: u64,
    pub raw_points: u64,
    pub factor_points: u64,
    pub scores: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} metrics, {} raw points, {} factors, {} scores",
            self.metrics, self.raw_points, self.factor_points, self.scores
        )
    }
}

/// SQLite-backed store shared across the API, engine, and collector
pub struct SentimentStore {
    conn: Mutex<Connection>,
}

impl SentimentStore {
    /// Create or open the store at the given path
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory store (tests, ephemeral runs)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS dim_metrics (
                metric_id   INTEGER PRIMARY KEY AUTOINCREMENT,
                industry    TEXT NOT NULL,
                metric_name TEXT NOT NULL,
                metric_code TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS fact_raw_data (
                metric_id INTEGER NOT NULL REFERENCES dim_metrics(metric_id),
                data_date TEXT NOT NULL,
                value     REAL NOT NULL,
                PRIMARY KEY (metric_id, data_date)
            );

            CREATE TABLE IF NOT EXISTS fact_processed_factors (
                metric_id    INTEGER NOT NULL REFERENCES dim_metrics(metric_id),
                data_date    TEXT NOT NULL,
                factor_value REAL NOT NULL,
                factor_type  TEXT NOT NULL,
                PRIMARY KEY (metric_id, data_date, factor_type)
            );

            CREATE TABLE IF NOT EXISTS fact_industry_sentiment (
                industry        TEXT NOT NULL,
                data_date       TEXT NOT NULL,
                sentiment_score REAL NOT NULL,
                details         TEXT NOT NULL DEFAULT '{}',
                PRIMARY KEY (industry, data_date)
            );

            CREATE INDEX IF NOT EXISTS idx_raw_date ON fact_raw_data(data_date);
            CREATE INDEX IF NOT EXISTS idx_sentiment_date ON fact_industry_sentiment(data_date);
            ",
        )?;
        Ok(())
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Lock)
    }

    // ---- metric catalog ----

    /// Register a metric, returning its id
    ///
    /// Idempotent on `code`: re-registering returns the existing id.
    pub fn register_metric(&self, def: &MetricDef) -> StoreResult<u32> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO dim_metrics (industry, metric_name, metric_code)
             VALUES (?1, ?2, ?3)",
            params![def.industry.label(), def.name, def.code],
        )?;

        let id = conn.query_row(
            "SELECT metric_id FROM dim_metrics WHERE metric_code = ?1",
            params![def.code],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// All metric definitions in catalog order
    pub fn metric_defs(&self) -> StoreResult<Vec<MetricDef>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT metric_id, industry, metric_name, metric_code
             FROM dim_metrics ORDER BY metric_id",
        )?;
        let rows = stmt.query_map([], row_to_metric_def)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .map(validate_metric_def)
            .collect()
    }

    /// Metric definitions for one industry, in catalog order
    pub fn metrics_for(&self, industry: Industry) -> StoreResult<Vec<MetricDef>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT metric_id, industry, metric_name, metric_code
             FROM dim_metrics WHERE industry = ?1 ORDER BY metric_id",
        )?;
        let rows = stmt.query_map(params![industry.label()], row_to_metric_def)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .map(validate_metric_def)
            .collect()
    }

    /// Look up a metric by its source code
    pub fn metric_by_code(&self, code: &str) -> StoreResult<Option<MetricDef>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT metric_id, industry, metric_name, metric_code
             FROM dim_metrics WHERE metric_code = ?1",
        )?;
        let mut rows = stmt.query_map(params![code], row_to_metric_def)?;
        match rows.next() {
            Some(row) => Ok(Some(validate_metric_def(row?)?)),
            None => Ok(None),
        }
    }

    // ---- raw readings ----

    /// Upsert one raw reading
    pub fn upsert_raw(&self, obs: &RawObservation) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO fact_raw_data (metric_id, data_date, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (metric_id, data_date) DO UPDATE SET value = excluded.value",
            params![obs.metric_id, fmt_date(obs.date), obs.value],
        )?;
        Ok(())
    }

    /// Full raw series for a metric, date-ordered
    pub fn raw_series(&self, metric_id: u32) -> StoreResult<Vec<RawObservation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT data_date, value FROM fact_raw_data
             WHERE metric_id = ?1 ORDER BY data_date ASC",
        )?;
        let rows = stmt.query_map(params![metric_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut series = Vec::new();
        for row in rows {
            let (date, value) = row?;
            series.push(RawObservation::new(metric_id, parse_date(&date)?, value));
        }
        Ok(series)
    }

    /// Most recent raw date for a metric, if any
    pub fn latest_raw_date(&self, metric_id: u32) -> StoreResult<Option<NaiveDate>> {
        let conn = self.conn()?;
        let date: Option<String> = conn.query_row(
            "SELECT MAX(data_date) FROM fact_raw_data WHERE metric_id = ?1",
            params![metric_id],
            |row| row.get(0),
        )?;
        date.as_deref().map(parse_date).transpose()
    }

    // ---- processed factors ----

    /// Upsert one normalized factor
    pub fn upsert_factor(&self, factor: &ProcessedFactor) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO fact_processed_factors (metric_id, data_date, factor_value, factor_type)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (metric_id, data_date, factor_type)
             DO UPDATE SET factor_value = excluded.factor_value",
            params![
                factor.metric_id,
                fmt_date(factor.date),
                factor.value,
                factor.kind.as_str()
            ],
        )?;
        Ok(())
    }

    /// Latest processed factor for a metric
    pub fn latest_factor(
        &self,
        metric_id: u32,
        kind: FactorKind,
    ) -> StoreResult<Option<ProcessedFactor>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT data_date, factor_value FROM fact_processed_factors
             WHERE metric_id = ?1 AND factor_type = ?2
             ORDER BY data_date DESC LIMIT 1",
        )?;
        let mut rows = stmt.query_map(params![metric_id, kind.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        match rows.next() {
            Some(row) => {
                let (date, value) = row?;
                Ok(Some(ProcessedFactor {
                    metric_id,
                    date: parse_date(&date)?,
                    value,
                    kind,
                }))
            }
            None => Ok(None),
        }
    }

    /// One industry's factors grouped by date: date → [(metric name, value)]
    ///
    /// Within a date, factors follow catalog order.
    pub fn factors_by_date(
        &self,
        industry: Industry,
        kind: FactorKind,
    ) -> StoreResult<BTreeMap<NaiveDate, Vec<(String, f64)>>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT f.data_date, m.metric_name, f.factor_value
             FROM fact_processed_factors f
             JOIN dim_metrics m ON f.metric_id = m.metric_id
             WHERE m.industry = ?1 AND f.factor_type = ?2
             ORDER BY f.data_date ASC, m.metric_id ASC",
        )?;
        let rows = stmt.query_map(params![industry.label(), kind.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut by_date: BTreeMap<NaiveDate, Vec<(String, f64)>> = BTreeMap::new();
        for row in rows {
            let (date, name, value) = row?;
            by_date
                .entry(parse_date(&date)?)
                .or_default()
                .push((name, value));
        }
        Ok(by_date)
    }

    // ---- sentiment scores ----

    /// Upsert one published score
    pub fn upsert_score(&self, score: &SentimentScore) -> StoreResult<()> {
        let details = serde_json::to_string(&score.details)
            .map_err(|e| StoreError::Corrupt(format!("details serialization: {}", e)))?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO fact_industry_sentiment (industry, data_date, sentiment_score, details)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (industry, data_date)
             DO UPDATE SET sentiment_score = excluded.sentiment_score,
                           details = excluded.details",
            params![
                score.industry.label(),
                fmt_date(score.date),
                score.score,
                details
            ],
        )?;
        Ok(())
    }

    /// All published scores, date-ordered
    pub fn sentiment_series(&self) -> StoreResult<Vec<SentimentScore>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT industry, data_date, sentiment_score, details
             FROM fact_industry_sentiment
             ORDER BY data_date ASC, industry ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut series = Vec::new();
        for row in rows {
            let (industry, date, score, details) = row?;
            let industry = Industry::from_name(&industry)
                .ok_or_else(|| StoreError::Corrupt(format!("unknown industry: {}", industry)))?;
            let details = serde_json::from_str(&details)
                .map_err(|e| StoreError::Corrupt(format!("details parse: {}", e)))?;
            series.push(SentimentScore {
                industry,
                date: parse_date(&date)?,
                score,
                details,
            });
        }
        Ok(series)
    }

    /// Latest published score per industry, in display order
    pub fn latest_scores(&self) -> StoreResult<Vec<(Industry, f64)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT sentiment_score FROM fact_industry_sentiment
             WHERE industry = ?1 ORDER BY data_date DESC LIMIT 1",
        )?;

        let mut latest = Vec::new();
        for industry in Industry::ALL {
            let mut rows = stmt.query_map(params![industry.label()], |row| row.get::<_, f64>(0))?;
            if let Some(score) = rows.next() {
                latest.push((industry, score?));
            }
        }
        Ok(latest)
    }

    // ---- seeding ----

    /// Register the built-in sample catalog and land its readings
    ///
    /// Returns the number of raw observations written. Idempotent.
    pub fn seed_sample(&self) -> StoreResult<usize> {
        let mut written = 0;
        for sample in crate::domain::sample_metric_defs() {
            let id = self.register_metric(&sample.def)?;
            for obs in crate::domain::sample_raw_observations(id, &sample.readings) {
                self.upsert_raw(&obs)?;
                written += 1;
            }
        }
        Ok(written)
    }

    // ---- stats ----

    /// Whether any raw data has been collected yet
    pub fn is_empty(&self) -> StoreResult<bool> {
        let conn = self.conn()?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM fact_raw_data", [], |row| row.get(0))?;
        Ok(count == 0)
    }

    /// Row counts for health reporting
    pub fn stats(&self) -> StoreResult<StoreStats> {
        let conn = self.conn()?;
        let count = |table: &str| -> StoreResult<u64> {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?)
        };
        Ok(StoreStats {
            metrics: count("dim_metrics")?,
            raw_points: count("fact_raw_data")?,
            factor_points: count("fact_processed_factors")?,
            scores: count("fact_industry_sentiment")?,
        })
    }
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(s: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| StoreError::Corrupt(format!("bad date {:?}: {}", s, e)))
}

fn row_to_metric_def(row: &rusqlite::Row<'_>) -> rusqlite::Result<(u32, String, String, String)> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
    ))
}

fn validate_metric_def(
    (id, industry, name, code): (u32, String, String, String),
) -> StoreResult<MetricDef> {
    let industry = Industry::from_name(&industry)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown industry: {}", industry)))?;
    Ok(MetricDef {
        id,
        industry,
        name,
        code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetricDef;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, month, day).unwrap()
    }

    #[test]
    fn test_register_metric_is_idempotent() {
        let store = SentimentStore::open_in_memory().unwrap();
        let def = MetricDef::new(Industry::Liquor, "中证白酒指数", "sz399997");

        let first = store.register_metric(&def).unwrap();
        let second = store.register_metric(&def).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.metric_defs().unwrap().len(), 1);
    }

    #[test]
    fn test_raw_upsert_overwrites() {
        let store = SentimentStore::open_in_memory().unwrap();
        let id = store
            .register_metric(&MetricDef::new(Industry::Liquor, "茅台批发价", "maotai"))
            .unwrap();

        store.upsert_raw(&RawObservation::new(id, date(1, 31), 2760.0)).unwrap();
        store.upsert_raw(&RawObservation::new(id, date(1, 31), 2800.0)).unwrap();

        let series = store.raw_series(id).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 2800.0);
    }

    #[test]
    fn test_raw_series_is_date_ordered() {
        let store = SentimentStore::open_in_memory().unwrap();
        let id = store
            .register_metric(&MetricDef::new(Industry::Robotics, "制造业PMI", "pmi"))
            .unwrap();

        store.upsert_raw(&RawObservation::new(id, date(3, 31), 50.4)).unwrap();
        store.upsert_raw(&RawObservation::new(id, date(1, 31), 49.2)).unwrap();
        store.upsert_raw(&RawObservation::new(id, date(2, 28), 49.8)).unwrap();

        let series = store.raw_series(id).unwrap();
        let dates: Vec<_> = series.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(1, 31), date(2, 28), date(3, 31)]);
        assert_eq!(store.latest_raw_date(id).unwrap(), Some(date(3, 31)));
    }

    #[test]
    fn test_factors_group_by_date_in_catalog_order() {
        let store = SentimentStore::open_in_memory().unwrap();
        let a = store
            .register_metric(&MetricDef::new(Industry::Semiconductor, "芯片指数", "chip"))
            .unwrap();
        let b = store
            .register_metric(&MetricDef::new(Industry::Semiconductor, "国产化率", "local"))
            .unwrap();

        for id in [b, a] {
            store
                .upsert_factor(&ProcessedFactor {
                    metric_id: id,
                    date: date(1, 31),
                    value: 0.5,
                    kind: FactorKind::Normalized,
                })
                .unwrap();
        }

        let by_date = store
            .factors_by_date(Industry::Semiconductor, FactorKind::Normalized)
            .unwrap();
        let names: Vec<_> = by_date[&date(1, 31)].iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["芯片指数", "国产化率"]);
    }

    #[test]
    fn test_score_roundtrip_with_details() {
        let store = SentimentStore::open_in_memory().unwrap();
        let mut details = BTreeMap::new();
        details.insert("芯片指数".to_string(), 1.2);
        details.insert("国产化率".to_string(), -0.4);

        store
            .upsert_score(&SentimentScore {
                industry: Industry::Semiconductor,
                date: date(6, 30),
                score: 0.8,
                details: details.clone(),
            })
            .unwrap();

        let series = store.sentiment_series().unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].score, 0.8);
        assert_eq!(series[0].details, details);
    }

    #[test]
    fn test_latest_scores_take_newest_date() {
        let store = SentimentStore::open_in_memory().unwrap();
        for (month, score) in [(5, 0.5), (6, 0.4)] {
            store
                .upsert_score(&SentimentScore {
                    industry: Industry::NewEnergyVehicle,
                    date: date(month, 30),
                    score,
                    details: BTreeMap::new(),
                })
                .unwrap();
        }

        let latest = store.latest_scores().unwrap();
        assert_eq!(latest, vec![(Industry::NewEnergyVehicle, 0.4)]);
    }

    #[test]
    fn test_stats_and_is_empty() {
        let store = SentimentStore::open_in_memory().unwrap();
        assert!(store.is_empty().unwrap());

        let id = store
            .register_metric(&MetricDef::new(Industry::Liquor, "库存周转", "turnover"))
            .unwrap();
        store.upsert_raw(&RawObservation::new(id, date(1, 31), 3.1)).unwrap();

        assert!(!store.is_empty().unwrap());
        let stats = store.stats().unwrap();
        assert_eq!(stats.metrics, 1);
        assert_eq!(stats.raw_points, 1);
        assert_eq!(stats.scores, 0);
    }

    #[test]
    fn test_open_creates_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("barometer.db");
        {
            let store = SentimentStore::open(&path).unwrap();
            store
                .register_metric(&MetricDef::new(Industry::Robotics, "工业机器人产量", "robot"))
                .unwrap();
        }
        // Reopen and verify persistence
        let store = SentimentStore::open(&path).unwrap();
        assert_eq!(store.metric_defs().unwrap().len(), 1);
    }
}
