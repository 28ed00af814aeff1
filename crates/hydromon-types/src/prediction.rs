//! Failure-timeline predictions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative failure risk derived from the average anomaly score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Not enough data, or scoring produced nothing usable.
    Unknown,
    /// Scores look like normal operation.
    Low,
    /// Scores drift toward the anomalous range.
    Medium,
    /// Scores sit near the anomaly cut; failure plausible soon.
    High,
    /// The scoring attempt itself failed.
    Error,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Unknown => "unknown",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Estimated failure timeline published by the prognosis component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailurePrediction {
    /// Estimated days until failure; `None` when no estimate exists.
    /// At least 1 when present.
    pub days_to_failure: Option<u32>,
    /// Confidence in the estimate, in [0, 1].
    pub confidence: f64,
    /// Qualitative risk bucket.
    pub risk_level: RiskLevel,
    /// Human-readable summary of the score trend.
    pub trend_analysis: String,
}

impl FailurePrediction {
    /// The well-defined "not enough samples" outcome.
    pub fn insufficient_data() -> Self {
        Self {
            days_to_failure: None,
            confidence: 0.0,
            risk_level: RiskLevel::Unknown,
            trend_analysis: "Insufficient data for analysis".to_owned(),
        }
    }

    /// The outcome for a scoring pass that yielded no scores.
    pub fn unscorable() -> Self {
        Self {
            days_to_failure: None,
            confidence: 0.0,
            risk_level: RiskLevel::Unknown,
            trend_analysis: "Unable to calculate anomaly scores".to_owned(),
        }
    }

    /// The outcome for a scoring pass that failed outright.
    pub fn analysis_error(detail: &str) -> Self {
        Self {
            days_to_failure: None,
            confidence: 0.0,
            risk_level: RiskLevel::Error,
            trend_analysis: format!("Error in analysis: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn canned_outcomes_carry_no_estimate() {
        for prediction in [
            FailurePrediction::insufficient_data(),
            FailurePrediction::unscorable(),
            FailurePrediction::analysis_error("model not fitted"),
        ] {
            assert_eq!(prediction.days_to_failure, None);
            assert_abs_diff_eq!(prediction.confidence, 0.0);
        }
    }

    #[test]
    fn analysis_error_is_the_only_error_risk() {
        assert_eq!(
            FailurePrediction::insufficient_data().risk_level,
            RiskLevel::Unknown
        );
        assert_eq!(FailurePrediction::unscorable().risk_level, RiskLevel::Unknown);
        let failed = FailurePrediction::analysis_error("disk gone");
        assert_eq!(failed.risk_level, RiskLevel::Error);
        assert!(failed.trend_analysis.contains("disk gone"));
    }
}
