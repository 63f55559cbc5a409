//! Normalization primitives
//!
//! Pure functions over raw series. Zero-variance input degrades to zeros
//! rather than NaN so a flat series never poisons downstream aggregation.

/// Arithmetic mean of a slice; 0.0 for empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Z-score normalize a series against its own mean and standard deviation
///
/// A zero standard deviation maps every value to 0.0.
pub fn zscore(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - m) / std_dev).collect()
}

/// Squash an averaged z-score into the published score range [-1, 1]
pub fn squash_score(avg: f64) -> f64 {
    avg.tanh()
}

/// Map a normalized factor value into (0, 1) for radar weights
pub fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zscore_has_zero_mean() {
        let normalized = zscore(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let m = mean(&normalized);
        assert!(m.abs() < 1e-10);
    }

    #[test]
    fn test_zscore_zero_variance() {
        let normalized = zscore(&[7.0, 7.0, 7.0]);
        assert_eq!(normalized, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zscore_empty() {
        assert!(zscore(&[]).is_empty());
    }

    #[test]
    fn test_zscore_preserves_order() {
        let normalized = zscore(&[10.0, 30.0, 20.0]);
        assert!(normalized[0] < normalized[2]);
        assert!(normalized[2] < normalized[1]);
    }

    #[test]
    fn test_squash_stays_in_range() {
        for avg in [-100.0, -2.5, -1.0, 0.0, 0.3, 1.0, 50.0] {
            let score = squash_score(avg);
            assert!((-1.0..=1.0).contains(&score), "tanh({}) = {}", avg, score);
        }
        assert_eq!(squash_score(0.0), 0.0);
    }

    #[test]
    fn test_logistic_stays_in_range() {
        for z in [-10.0, -1.0, 0.0, 1.0, 10.0] {
            let w = logistic(z);
            assert!(w > 0.0 && w < 1.0, "logistic({}) = {}", z, w);
        }
        assert!((logistic(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_is_monotonic() {
        assert!(logistic(-1.0) < logistic(0.0));
        assert!(logistic(0.0) < logistic(1.0));
    }
}
