//! The twelve-dimensional feature vector.

use serde::{Deserialize, Serialize};

/// Number of scalar dimensions in every feature vector.
pub const FEATURE_DIMENSIONS: usize = 12;

/// Features for one sample in the context of its trailing window.
///
/// Fixed layout: the three raw channel values (pressure, temperature,
/// flow), then per channel the rolling mean, rolling standard deviation
/// and rate of change, channel-major:
///
/// ```text
/// [p, t, f,  p_mean, p_std, p_rate,  t_mean, t_std, t_rate,  f_mean, f_std, f_rate]
/// ```
///
/// The vector always has exactly [`FEATURE_DIMENSIONS`] entries; window
/// statistics that cannot be computed yet (single-sample window, first
/// sample in a run) are 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIMENSIONS],
}

impl FeatureVector {
    /// Wraps a raw value array in the canonical layout.
    pub fn new(values: [f64; FEATURE_DIMENSIONS]) -> Self {
        Self { values }
    }

    /// The values in canonical layout.
    pub fn values(&self) -> &[f64; FEATURE_DIMENSIONS] {
        &self.values
    }

    /// The values as a plain slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// True when every dimension is a finite number.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|value| value.is_finite())
    }
}
