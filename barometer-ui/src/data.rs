//! Dashboard data model
//!
//! Record types shared with the API, the industry display config, and the
//! built-in sample dataset the dashboard renders until (and unless) a
//! Barometer API answers. Lookups by industry name degrade to empty data
//! for names outside the enumerated set; nothing here faults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The industry the dashboard starts on
pub const DEFAULT_INDUSTRY: &str = "新能源车";

/// Sentiment scores are published in this closed range
pub const SCORE_MIN: f64 = -1.0;
pub const SCORE_MAX: f64 = 1.0;

/// One monthly record of the sentiment series
///
/// Parses the API's flat shape: `{"date": "2023-06", "白酒": 0.7, ...}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub date: String,
    #[serde(flatten)]
    pub scores: HashMap<String, f64>,
}

/// A named factor with its weight in [0, 1]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactorWeight {
    pub name: String,
    pub value: f64,
}

/// Display configuration for one industry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndustryConfig {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// The four tracked industries, in display order
pub const INDUSTRIES: [IndustryConfig; 4] = [
    IndustryConfig {
        name: "白酒",
        icon: "📦",
        color: "#f87171",
    },
    IndustryConfig {
        name: "新能源车",
        icon: "⚡",
        color: "#4ade80",
    },
    IndustryConfig {
        name: "半导体",
        icon: "💻",
        color: "#60a5fa",
    },
    IndustryConfig {
        name: "机器人",
        icon: "📈",
        color: "#fbbf24",
    },
];

/// Look up an industry's display config
pub fn industry_config(name: &str) -> Option<&'static IndustryConfig> {
    INDUSTRIES.iter().find(|c| c.name == name)
}

/// Chart color for an industry; neutral gray for unknown names
pub fn industry_color(name: &str) -> &'static str {
    industry_config(name).map(|c| c.color).unwrap_or("#94a3b8")
}

/// Built-in six-month sample series
pub fn sample_series() -> Vec<SeriesRecord> {
    const MONTHS: [(&str, [f64; 4]); 6] = [
        ("2023-01", [0.2, 0.8, 0.5, 0.3]),
        ("2023-02", [0.3, 0.7, 0.4, 0.4]),
        ("2023-03", [0.5, 0.9, 0.6, 0.5]),
        ("2023-04", [0.4, 0.6, 0.7, 0.6]),
        ("2023-05", [0.6, 0.5, 0.5, 0.7]),
        ("2023-06", [0.7, 0.4, 0.8, 0.8]),
    ];

    MONTHS
        .iter()
        .map(|(date, values)| SeriesRecord {
            date: date.to_string(),
            scores: INDUSTRIES
                .iter()
                .zip(values.iter())
                .map(|(config, v)| (config.name.to_string(), *v))
                .collect(),
        })
        .collect()
}

/// Built-in factor breakdown per industry
pub fn sample_details() -> HashMap<String, Vec<FactorWeight>> {
    fn factors(pairs: &[(&str, f64)]) -> Vec<FactorWeight> {
        pairs
            .iter()
            .map(|(name, value)| FactorWeight {
                name: name.to_string(),
                value: *value,
            })
            .collect()
    }

    let mut details = HashMap::new();
    details.insert(
        "白酒".to_string(),
        factors(&[("中证白酒指数", 0.8), ("茅台批发价", 0.6), ("库存周转", 0.7)]),
    );
    details.insert(
        "新能源车".to_string(),
        factors(&[
            ("新能源汽车销量", 0.9),
            ("动力电池产量", 0.85),
            ("充电桩增长", 0.75),
        ]),
    );
    details.insert(
        "半导体".to_string(),
        factors(&[("芯片指数", 0.6), ("集成电路进口", 0.5), ("国产化率", 0.7)]),
    );
    details.insert(
        "机器人".to_string(),
        factors(&[("制造业PMI", 0.55), ("工业机器人产量", 0.8), ("伺服电机成本", 0.4)]),
    );
    details
}

/// Factor list for an industry; empty for unknown names
pub fn radar_data(details: &HashMap<String, Vec<FactorWeight>>, name: &str) -> Vec<FactorWeight> {
    details.get(name).cloned().unwrap_or_default()
}

/// Latest score for an industry from the last series record
pub fn latest_score(series: &[SeriesRecord], name: &str) -> Option<f64> {
    series.last().and_then(|record| record.scores.get(name)).copied()
}

/// Selector-card score display: value x100, one decimal place
pub fn format_score(value: f64) -> String {
    format!("{:.1}", value * 100.0)
}

/// Factor weight as an integer percentage
pub fn format_weight_percent(value: f64) -> String {
    format!("{:.0}", value * 100.0)
}

/// CSS width for a factor's proportional bar
pub fn bar_width(value: f64) -> String {
    format!("{}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_series_industry_has_config() {
        let series = sample_series();
        for record in &series {
            for name in record.scores.keys() {
                assert!(industry_config(name).is_some(), "no config for {}", name);
            }
        }
        for name in sample_details().keys() {
            assert!(industry_config(name).is_some(), "no config for {}", name);
        }
    }

    #[test]
    fn test_sample_scores_in_range() {
        for record in sample_series() {
            for (name, score) in &record.scores {
                assert!(
                    (SCORE_MIN..=SCORE_MAX).contains(score),
                    "{} {} out of range",
                    record.date,
                    name
                );
            }
        }
    }

    #[test]
    fn test_sample_weights_in_range() {
        for (_, factors) in sample_details() {
            for f in factors {
                assert!((0.0..=1.0).contains(&f.value), "{} out of range", f.name);
            }
        }
    }

    #[test]
    fn test_radar_data_preserves_table_order() {
        let details = sample_details();
        let names: Vec<_> = radar_data(&details, "白酒")
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(names, vec!["中证白酒指数", "茅台批发价", "库存周转"]);
    }

    #[test]
    fn test_radar_data_unknown_industry_is_empty() {
        let details = sample_details();
        assert!(radar_data(&details, "元宇宙").is_empty());
    }

    #[test]
    fn test_latest_score_formats_as_card_text() {
        let series = sample_series();
        // 新能源车 ends at 0.4 → "40.0"
        let score = latest_score(&series, DEFAULT_INDUSTRY).unwrap();
        assert_eq!(format_score(score), "40.0");
        // 白酒 ends at 0.7 → "70.0"
        assert_eq!(format_score(latest_score(&series, "白酒").unwrap()), "70.0");
    }

    #[test]
    fn test_latest_score_unknown_industry_is_none() {
        let series = sample_series();
        assert_eq!(latest_score(&series, "元宇宙"), None);
    }

    #[test]
    fn test_factor_bar_formatting() {
        assert_eq!(bar_width(0.85), "85%");
        assert_eq!(format_weight_percent(0.85), "85");
        assert_eq!(format_weight_percent(0.4), "40");
    }

    #[test]
    fn test_series_record_parses_flat_json() {
        let json = r#"{"date": "2023-06", "白酒": 0.7, "新能源车": 0.4}"#;
        let record: SeriesRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, "2023-06");
        assert_eq!(record.scores["白酒"], 0.7);
    }
}
