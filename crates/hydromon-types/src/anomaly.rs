//! Anomaly labels and scores produced by the outlier model.

use serde::{Deserialize, Serialize};

/// Whether a sample looks like the training distribution or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyLabel {
    /// Within the modeled normal-operation distribution.
    Normal,
    /// Statistically isolated from the training distribution.
    Anomaly,
}

/// One scored sample: its label plus the raw anomaly score.
///
/// Scores follow the isolation-forest convention: values lie in (-1, 0)
/// and lower means more anomalous. The label is derived from the score
/// and the contamination cut fitted at training time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    /// Anomaly/normal decision at the fitted contamination cut.
    pub label: AnomalyLabel,
    /// Raw score; lower = more anomalous.
    pub score: f64,
}

impl AnomalyResult {
    /// Creates a result from a label and score.
    pub fn new(label: AnomalyLabel, score: f64) -> Self {
        Self { label, score }
    }

    /// True if the label is [`AnomalyLabel::Anomaly`].
    pub fn is_anomaly(&self) -> bool {
        matches!(self.label, AnomalyLabel::Anomaly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_anomaly_tracks_the_label() {
        assert!(AnomalyResult::new(AnomalyLabel::Anomaly, -0.6).is_anomaly());
        assert!(!AnomalyResult::new(AnomalyLabel::Normal, -0.4).is_anomaly());
    }
}
