//! Risk bucketing and trend adjustment over anomaly scores.

use hydromon_types::{FailurePrediction, RiskLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum scores a timeline estimate needs.
pub const MIN_SCORES: usize = 10;

/// Average score above which the risk is high.
pub const HIGH_RISK_SCORE: f64 = -0.1;

/// Average score above which the risk is medium (high excluded).
pub const MEDIUM_RISK_SCORE: f64 = -0.3;

/// Half-width of the slope band treated as a stable trend.
pub const TREND_BAND: f64 = 0.01;

const HIGH_BASE_DAYS: u32 = 7;
const MEDIUM_BASE_DAYS: u32 = 30;
const LOW_BASE_DAYS: u32 = 90;

/// Direction of the score trend over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Scores falling faster than the stable band: failure approaching.
    Worsening,
    /// Scores rising faster than the stable band: recovery under way.
    Improving,
    /// Slope within the band either way.
    Stable,
}

impl Trend {
    /// Buckets a least-squares slope into a trend direction.
    pub fn from_slope(slope: f64) -> Self {
        if slope < -TREND_BAND {
            Trend::Worsening
        } else if slope > TREND_BAND {
            Trend::Improving
        } else {
            Trend::Stable
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Trend::Worsening => "worsening",
            Trend::Improving => "improving",
            Trend::Stable => "stable",
        };
        f.write_str(word)
    }
}

/// Turns a window of anomaly scores into a failure prediction.
///
/// Lower scores mean more anomalous, so a falling average moves the
/// risk bucket up and a falling trend halves the estimated horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineEstimator;

impl TimelineEstimator {
    /// Estimates the failure timeline from recent anomaly scores.
    ///
    /// Fewer than [`MIN_SCORES`] scores produce the canned
    /// "insufficient data" prediction; everything else always yields an
    /// estimate of at least one day.
    pub fn estimate(&self, scores: &[f64]) -> FailurePrediction {
        if scores.len() < MIN_SCORES {
            return FailurePrediction::insufficient_data();
        }

        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let trend = Trend::from_slope(least_squares_slope(scores));

        let (risk_level, base_days) = if average > HIGH_RISK_SCORE {
            (RiskLevel::High, HIGH_BASE_DAYS)
        } else if average > MEDIUM_RISK_SCORE {
            (RiskLevel::Medium, MEDIUM_BASE_DAYS)
        } else {
            (RiskLevel::Low, LOW_BASE_DAYS)
        };

        // round(base * 0.5) and round(base * 1.5) in integer arithmetic.
        let (days_to_failure, confidence) = match trend {
            Trend::Worsening => (base_days.div_ceil(2).max(1), 0.8),
            Trend::Improving => (base_days + base_days.div_ceil(2), 0.6),
            Trend::Stable => (base_days, 0.7),
        };

        FailurePrediction {
            days_to_failure: Some(days_to_failure),
            confidence,
            risk_level,
            trend_analysis: format!("Average anomaly score: {average:.3}, Trend: {trend}"),
        }
    }
}

/// Slope of the first-degree least-squares fit of `values` against
/// their indices. Zero for fewer than two values or a degenerate fit.
fn least_squares_slope(values: &[f64]) -> f64 {
    let count = values.len();
    if count < 2 {
        return 0.0;
    }
    let n = count as f64;
    let mean_index = (n - 1.0) / 2.0;
    let mean_value = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (index, value) in values.iter().enumerate() {
        let dx = index as f64 - mean_index;
        numerator += dx * (value - mean_value);
        denominator += dx * dx;
    }
    if denominator <= 0.0 {
        return 0.0;
    }
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(start: f64, step: f64, count: usize) -> Vec<f64> {
        (0..count).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn too_few_scores_yield_the_insufficient_outcome() {
        let estimator = TimelineEstimator;
        assert_eq!(
            estimator.estimate(&[-0.4; 9]),
            FailurePrediction::insufficient_data()
        );
        assert_eq!(
            estimator.estimate(&[]),
            FailurePrediction::insufficient_data()
        );
    }

    #[test]
    fn flat_baseline_scores_mean_low_risk_and_a_quarter_ahead() {
        let estimator = TimelineEstimator;
        let prediction = estimator.estimate(&[-0.45; 10]);

        assert_eq!(prediction.risk_level, RiskLevel::Low);
        assert_eq!(prediction.days_to_failure, Some(90));
        assert_abs_diff_eq!(prediction.confidence, 0.7);
        assert_eq!(
            prediction.trend_analysis,
            "Average anomaly score: -0.450, Trend: stable"
        );
    }

    #[test]
    fn near_zero_averages_are_high_risk() {
        let estimator = TimelineEstimator;
        let prediction = estimator.estimate(&[-0.05; 12]);

        assert_eq!(prediction.risk_level, RiskLevel::High);
        assert_eq!(prediction.days_to_failure, Some(7));
        assert_abs_diff_eq!(prediction.confidence, 0.7);
    }

    #[test]
    fn falling_scores_halve_the_horizon() {
        let estimator = TimelineEstimator;
        // Slope -0.02 per sample, average around -0.29: medium risk.
        let prediction = estimator.estimate(&ramp(-0.2, -0.02, 10));

        assert_eq!(prediction.risk_level, RiskLevel::Medium);
        assert_eq!(prediction.days_to_failure, Some(15));
        assert_abs_diff_eq!(prediction.confidence, 0.8);
        assert!(prediction.trend_analysis.ends_with("Trend: worsening"));
    }

    #[test]
    fn rising_scores_stretch_the_horizon() {
        let estimator = TimelineEstimator;
        // Slope +0.02 per sample, average around -0.41: low risk.
        let prediction = estimator.estimate(&ramp(-0.5, 0.02, 10));

        assert_eq!(prediction.risk_level, RiskLevel::Low);
        assert_eq!(prediction.days_to_failure, Some(135));
        assert_abs_diff_eq!(prediction.confidence, 0.6);
        assert!(prediction.trend_analysis.ends_with("Trend: improving"));
    }

    #[test]
    fn worsening_high_risk_rounds_seven_up_to_four_days() {
        let estimator = TimelineEstimator;
        let prediction = estimator.estimate(&ramp(0.0, -0.015, 10));

        // Average -0.0675 stays in the high bucket; 7 * 0.5 rounds to 4.
        assert_eq!(prediction.risk_level, RiskLevel::High);
        assert_eq!(prediction.days_to_failure, Some(4));
        assert_abs_diff_eq!(prediction.confidence, 0.8);
    }

    #[test]
    fn gentle_drift_inside_the_band_counts_as_stable() {
        let estimator = TimelineEstimator;
        let prediction = estimator.estimate(&ramp(-0.4, -0.005, 10));
        assert!(prediction.trend_analysis.ends_with("Trend: stable"));
        assert_abs_diff_eq!(prediction.confidence, 0.7);
    }

    #[test]
    fn slope_of_a_linear_ramp_is_its_step() {
        assert_abs_diff_eq!(
            least_squares_slope(&ramp(-0.5, 0.02, 20)),
            0.02,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(least_squares_slope(&[-0.3; 10]), 0.0);
        assert_abs_diff_eq!(least_squares_slope(&[-0.3]), 0.0);
        assert_abs_diff_eq!(least_squares_slope(&[]), 0.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn estimates_always_promise_at_least_one_day(
                scores in proptest::collection::vec(-0.999_f64..-0.001, 10..60),
            ) {
                let prediction = TimelineEstimator.estimate(&scores);
                prop_assert!(prediction.days_to_failure.is_some_and(|days| days >= 1));
                prop_assert!(prediction.confidence >= 0.6 && prediction.confidence <= 0.8);
                prop_assert!(matches!(
                    prediction.risk_level,
                    RiskLevel::Low | RiskLevel::Medium | RiskLevel::High
                ));
            }

            #[test]
            fn narrative_always_names_the_trend_word(
                scores in proptest::collection::vec(-0.999_f64..-0.001, 10..40),
            ) {
                let prediction = TimelineEstimator.estimate(&scores);
                let named = ["worsening", "improving", "stable"]
                    .iter()
                    .any(|word| prediction.trend_analysis.ends_with(word));
                prop_assert!(named, "narrative: {}", prediction.trend_analysis);
            }
        }
    }
}
