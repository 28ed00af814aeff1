//! Per-dimension standardization fitted on the training set.

use hydromon_features::{FEATURE_DIMENSIONS, FeatureVector};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Zero-mean, unit-variance transform fitted per feature dimension.
///
/// Fitting uses the population standard deviation (divide by n).
/// Dimensions with zero variance keep a scale of 1.0 so constant
/// features pass through centered instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Standardizer {
    /// Fits means and scales on the training rows.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InsufficientData`] for an empty training set.
    pub fn fit(rows: &[FeatureVector]) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::InsufficientData {
                rows: 0,
                required: 1,
            });
        }
        let count = rows.len() as f64;

        let mut means = vec![0.0; FEATURE_DIMENSIONS];
        for row in rows {
            for (mean, value) in means.iter_mut().zip(row.values()) {
                *mean += *value;
            }
        }
        for mean in &mut means {
            *mean /= count;
        }

        let mut scales = vec![0.0; FEATURE_DIMENSIONS];
        for row in rows {
            let centered = row.values().iter().zip(&means).map(|(value, mean)| value - mean);
            for (acc, diff) in scales.iter_mut().zip(centered) {
                *acc += diff * diff;
            }
        }
        for scale in &mut scales {
            *scale = (*scale / count).sqrt();
            if *scale <= 0.0 {
                *scale = 1.0;
            }
        }

        Ok(Self { means, scales })
    }

    /// Standardizes one vector with the fitted means and scales.
    pub fn transform_one(&self, vector: &FeatureVector) -> Vec<f64> {
        vector
            .values()
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect()
    }

    /// Standardizes each row, preserving order.
    pub fn transform(&self, rows: &[FeatureVector]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_one(row)).collect()
    }

    /// Number of dimensions the transform was fitted with.
    pub fn dimensions(&self) -> usize {
        self.means.len()
    }

    /// Fitted per-dimension means.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Fitted per-dimension scales.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}
