//! Rolling-window feature computation.

use hydromon_types::SensorSample;

use crate::vector::{FEATURE_DIMENSIONS, FeatureVector};

/// Trailing-window length used for health-check features.
pub const DEFAULT_WINDOW: usize = 5;

/// Expands an ordered run of samples into per-sample feature vectors.
///
/// The effective window is `min(configured window, run length)`, and
/// early samples in a run use however many predecessors exist — the
/// same min-periods-of-one semantics whether the window is full or
/// still filling. Input order does not matter; samples are ordered by
/// timestamp before any statistic is computed.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    window: usize,
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl FeatureBuilder {
    /// Creates a builder with the given trailing-window length (min 1).
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// The configured trailing-window length.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Builds one [`FeatureVector`] per input sample, in timestamp order.
    ///
    /// Returns an empty vector for empty input.
    pub fn build(&self, samples: &[SensorSample]) -> Vec<FeatureVector> {
        if samples.is_empty() {
            return Vec::new();
        }

        let mut ordered: Vec<SensorSample> = samples.to_vec();
        ordered.sort_by_key(|sample| sample.timestamp_ms);

        let pressure: Vec<f64> = ordered.iter().map(|sample| sample.pressure).collect();
        let temperature: Vec<f64> = ordered.iter().map(|sample| sample.temperature).collect();
        let flow: Vec<f64> = ordered.iter().map(|sample| sample.flow).collect();

        let window = self.window.min(ordered.len());
        let mut features = Vec::with_capacity(ordered.len());

        for (index, sample) in ordered.iter().enumerate() {
            let start = (index + 1).saturating_sub(window);
            let (p_mean, p_std) = trailing_stats(&pressure, start, index);
            let (t_mean, t_std) = trailing_stats(&temperature, start, index);
            let (f_mean, f_std) = trailing_stats(&flow, start, index);

            let values: [f64; FEATURE_DIMENSIONS] = [
                sample.pressure,
                sample.temperature,
                sample.flow,
                p_mean,
                p_std,
                rate_of_change(&pressure, index),
                t_mean,
                t_std,
                rate_of_change(&temperature, index),
                f_mean,
                f_std,
                rate_of_change(&flow, index),
            ];
            features.push(FeatureVector::new(values));
        }

        features
    }
}

/// Mean and sample standard deviation over `series[start..=end]`.
///
/// A window of one sample has standard deviation 0.
fn trailing_stats(series: &[f64], start: usize, end: usize) -> (f64, f64) {
    let Some(window) = series.get(start..=end) else {
        return (0.0, 0.0);
    };
    if window.is_empty() {
        return (0.0, 0.0);
    }

    let count = window.len() as f64;
    let mean = window.iter().sum::<f64>() / count;
    if window.len() < 2 {
        return (mean, 0.0);
    }

    let squared_deviation: f64 = window.iter().map(|value| (value - mean).powi(2)).sum();
    let std = (squared_deviation / (count - 1.0)).sqrt();
    (mean, std)
}

/// First difference at `index`; 0 for the first sample in a run.
fn rate_of_change(series: &[f64], index: usize) -> f64 {
    if index == 0 {
        return 0.0;
    }
    match (series.get(index), series.get(index - 1)) {
        (Some(current), Some(previous)) => current - previous,
        _ => 0.0,
    }
}
