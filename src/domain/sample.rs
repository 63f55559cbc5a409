//! Built-in sample dataset
//!
//! Metric definitions for the four tracked industries plus six months of
//! raw readings for each. Used by the demo binary and by the API's
//! seed-on-empty startup path so a fresh checkout renders a populated
//! dashboard without any collector credentials.

use super::types::{Industry, MetricDef, RawObservation};
use chrono::NaiveDate;

/// A metric definition paired with its sample readings
pub struct SampleMetricDef {
    pub def: MetricDef,
    /// Monthly readings, 2023-01 through 2023-06
    pub readings: [f64; 6],
}

/// The standard metric catalog: three sub-indicators per industry
pub fn sample_metric_defs() -> Vec<SampleMetricDef> {
    vec![
        // 白酒
        SampleMetricDef {
            def: MetricDef::new(Industry::Liquor, "中证白酒指数", "sz399997"),
            readings: [14650.0, 14980.0, 15820.0, 15390.0, 16240.0, 16710.0],
        },
        SampleMetricDef {
            def: MetricDef::new(Industry::Liquor, "茅台批发价", "maotai_wholesale"),
            readings: [2760.0, 2780.0, 2830.0, 2810.0, 2850.0, 2880.0],
        },
        SampleMetricDef {
            def: MetricDef::new(Industry::Liquor, "库存周转", "liquor_turnover"),
            readings: [3.1, 3.2, 3.6, 3.4, 3.8, 4.0],
        },
        // 新能源车
        SampleMetricDef {
            def: MetricDef::new(Industry::NewEnergyVehicle, "新能源汽车销量", "nev_sales"),
            readings: [40.8, 52.5, 61.7, 60.4, 58.0, 56.6],
        },
        SampleMetricDef {
            def: MetricDef::new(Industry::NewEnergyVehicle, "动力电池产量", "battery_output"),
            readings: [28.2, 33.1, 41.5, 40.0, 39.3, 38.1],
        },
        SampleMetricDef {
            def: MetricDef::new(Industry::NewEnergyVehicle, "充电桩增长", "charger_growth"),
            readings: [5.1, 6.3, 7.2, 6.8, 6.5, 6.1],
        },
        // 半导体
        SampleMetricDef {
            def: MetricDef::new(Industry::Semiconductor, "芯片指数", "sz399987"),
            readings: [3120.0, 3050.0, 3310.0, 3420.0, 3270.0, 3560.0],
        },
        SampleMetricDef {
            def: MetricDef::new(Industry::Semiconductor, "集成电路进口", "ic_imports"),
            readings: [381.0, 370.0, 402.0, 419.0, 397.0, 428.0],
        },
        SampleMetricDef {
            def: MetricDef::new(Industry::Semiconductor, "国产化率", "localization_rate"),
            readings: [0.162, 0.164, 0.171, 0.176, 0.174, 0.182],
        },
        // 机器人
        SampleMetricDef {
            def: MetricDef::new(Industry::Robotics, "制造业PMI", "pmi"),
            readings: [49.2, 49.8, 50.4, 50.9, 51.3, 51.8],
        },
        SampleMetricDef {
            def: MetricDef::new(Industry::Robotics, "工业机器人产量", "robot_output"),
            readings: [3.6, 3.9, 4.3, 4.6, 5.0, 5.3],
        },
        SampleMetricDef {
            def: MetricDef::new(Industry::Robotics, "伺服电机成本", "servo_cost"),
            readings: [118.0, 115.0, 112.0, 110.0, 107.0, 104.0],
        },
    ]
}

/// Expand sample readings into dated observations for a registered metric
///
/// Readings land on the last day of each month, matching how the collector
/// records monthly indicators.
pub fn sample_raw_observations(metric_id: u32, readings: &[f64; 6]) -> Vec<RawObservation> {
    const MONTH_ENDS: [(u32, u32); 6] = [(1, 31), (2, 28), (3, 31), (4, 30), (5, 31), (6, 30)];

    MONTH_ENDS
        .iter()
        .zip(readings.iter())
        .filter_map(|(&(month, day), &value)| {
            NaiveDate::from_ymd_opt(2023, month, day)
                .map(|date| RawObservation::new(metric_id, date, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_metrics_per_industry() {
        let defs = sample_metric_defs();
        for industry in Industry::ALL {
            let count = defs.iter().filter(|m| m.def.industry == industry).count();
            assert_eq!(count, 3, "{} should have 3 metrics", industry);
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let defs = sample_metric_defs();
        let mut codes: Vec<_> = defs.iter().map(|m| m.def.code.as_str()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), defs.len());
    }

    #[test]
    fn test_observations_are_chronological() {
        let obs = sample_raw_observations(1, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(obs.len(), 6);
        for pair in obs.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }
}
