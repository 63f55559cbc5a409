//! Core domain types for the sentiment pipeline
//!
//! This module defines the types that flow between the layers:
//! - `Industry`: fixed enumeration of tracked industry categories
//! - `MetricDef`: definition of a sub-indicator (what's being measured)
//! - `RawObservation` / `ProcessedFactor`: one reading, before/after normalization
//! - `SentimentScore`: the engine's output for one industry on one date
//! - `SeriesRecord` / `FactorWeight`: the two record shapes the dashboard consumes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Industry categories tracked by the barometer
///
/// The display label (e.g. "白酒") is the canonical key: it is what the
/// store persists, what the API exposes, and what the dashboard selects by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Industry {
    /// 白酒 - premium liquor
    Liquor,
    /// 新能源车 - new-energy vehicles
    NewEnergyVehicle,
    /// 半导体 - semiconductors
    Semiconductor,
    /// 机器人 - robotics
    Robotics,
}

impl Industry {
    /// All industries, in display order
    pub const ALL: [Industry; 4] = [
        Industry::Liquor,
        Industry::NewEnergyVehicle,
        Industry::Semiconductor,
        Industry::Robotics,
    ];

    /// Canonical display label, used as the key across all tables
    pub fn label(&self) -> &'static str {
        match self {
            Industry::Liquor => "白酒",
            Industry::NewEnergyVehicle => "新能源车",
            Industry::Semiconductor => "半导体",
            Industry::Robotics => "机器人",
        }
    }

    /// ASCII identifier for file names and logs
    pub fn slug(&self) -> &'static str {
        match self {
            Industry::Liquor => "liquor",
            Industry::NewEnergyVehicle => "nev",
            Industry::Semiconductor => "semiconductor",
            Industry::Robotics => "robotics",
        }
    }

    /// Display configuration for this industry
    pub fn style(&self) -> IndustryStyle {
        match self {
            Industry::Liquor => IndustryStyle {
                icon: "📦",
                color: "#f87171",
            },
            Industry::NewEnergyVehicle => IndustryStyle {
                icon: "⚡",
                color: "#4ade80",
            },
            Industry::Semiconductor => IndustryStyle {
                icon: "💻",
                color: "#60a5fa",
            },
            Industry::Robotics => IndustryStyle {
                icon: "📈",
                color: "#fbbf24",
            },
        }
    }

    /// Resolve an industry from its label or slug
    ///
    /// Returns `None` for names outside the enumerated set; callers decide
    /// whether that degrades to empty data (view) or a 404 (API).
    pub fn from_name(name: &str) -> Option<Industry> {
        Industry::ALL
            .iter()
            .find(|i| i.label() == name || i.slug() == name)
            .copied()
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Industry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Industry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Industry::from_name(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown industry: {}", s)))
    }
}

/// Display configuration: icon identifier and chart color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndustryStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

/// Definition of a sub-indicator contributing to one industry's sentiment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricDef {
    /// Unique identifier, assigned by the store
    pub id: u32,
    /// Industry this metric contributes to
    pub industry: Industry,
    /// Human-readable name (e.g. "中证白酒指数")
    pub name: String,
    /// Source code used by collectors (e.g. "sz399997")
    pub code: String,
}

impl MetricDef {
    /// Create a metric definition; the id is assigned on registration
    pub fn new(industry: Industry, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: 0,
            industry,
            name: name.into(),
            code: code.into(),
        }
    }
}

/// One raw reading for a metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawObservation {
    pub metric_id: u32,
    pub date: NaiveDate,
    pub value: f64,
}

impl RawObservation {
    pub fn new(metric_id: u32, date: NaiveDate, value: f64) -> Self {
        Self {
            metric_id,
            date,
            value,
        }
    }
}

/// Kind of processing applied to a raw reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FactorKind {
    /// Z-score normalized against the metric's own history
    Normalized,
}

impl FactorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::Normalized => "normalized",
        }
    }

    pub fn parse(s: &str) -> Option<FactorKind> {
        match s {
            "normalized" => Some(FactorKind::Normalized),
            _ => None,
        }
    }
}

/// A normalized reading, ready for aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessedFactor {
    pub metric_id: u32,
    pub date: NaiveDate,
    pub value: f64,
    pub kind: FactorKind,
}

/// One computed sentiment score for an industry on a date
///
/// `score` is always in [-1, 1]. `details` maps metric name to the raw
/// factor value that went into the score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentScore {
    pub industry: Industry,
    pub date: NaiveDate,
    pub score: f64,
    #[serde(default)]
    pub details: BTreeMap<String, f64>,
}

/// A named factor with its weight in [0, 1]
///
/// This is the radar-chart contract: per industry, an ordered list of
/// (name, value) pairs in metric-definition order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorWeight {
    pub name: String,
    pub value: f64,
}

impl FactorWeight {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One monthly record of the sentiment series
///
/// Serializes flat - `{"date": "2023-06", "白酒": 0.7, ...}` - which is the
/// shape the dashboard's trend chart consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesRecord {
    /// Month key, "YYYY-MM"
    pub date: String,
    /// Score per industry label, in [-1, 1]
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
}

impl SeriesRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            scores: BTreeMap::new(),
        }
    }

    /// Builder: set one industry's score
    pub fn score(mut self, industry: Industry, value: f64) -> Self {
        self.scores.insert(industry.label().to_string(), value);
        self
    }

    /// Look up one industry's score by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_from_name() {
        assert_eq!(Industry::from_name("白酒"), Some(Industry::Liquor));
        assert_eq!(Industry::from_name("nev"), Some(Industry::NewEnergyVehicle));
        assert_eq!(Industry::from_name("元宇宙"), None);
    }

    #[test]
    fn test_every_industry_has_style() {
        for industry in Industry::ALL {
            let style = industry.style();
            assert!(!style.icon.is_empty());
            assert!(style.color.starts_with('#'));
        }
    }

    #[test]
    fn test_industry_serde_roundtrip() {
        let json = serde_json::to_string(&Industry::Semiconductor).unwrap();
        assert_eq!(json, "\"半导体\"");
        let back: Industry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Industry::Semiconductor);
    }

    #[test]
    fn test_series_record_flattens() {
        let record = SeriesRecord::new("2023-06")
            .score(Industry::Liquor, 0.7)
            .score(Industry::NewEnergyVehicle, 0.4);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2023-06");
        assert_eq!(json["白酒"], 0.7);
        assert_eq!(json["新能源车"], 0.4);
    }

    #[test]
    fn test_factor_kind_parse() {
        assert_eq!(FactorKind::parse("normalized"), Some(FactorKind::Normalized));
        assert_eq!(FactorKind::parse("bogus"), None);
    }
}
