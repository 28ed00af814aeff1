//! Train/score facade over the standardizer and forest.

use std::path::Path;

use chrono::{DateTime, Utc};
use hydromon_features::{FeatureBuilder, FeatureVector};
use hydromon_types::{AnomalyResult, SensorSample};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::corpus::{DEFAULT_CORPUS_SEED, DEFAULT_CORPUS_SIZE, synthetic_corpus};
use crate::error::ModelError;
use crate::forest::{ForestConfig, IsolationForest};
use crate::snapshot::ModelSnapshot;
use crate::standardizer::Standardizer;

/// Minimum feature rows needed to fit the model.
pub const MIN_TRAINING_ROWS: usize = 10;

/// Where the rows used for a fit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingSource {
    /// Seeded synthetic corpus.
    Synthetic,
    /// Caller-provided sample history.
    Provided,
}

/// Summary of one completed fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Feature rows the fit consumed.
    pub rows: usize,
    /// Training rows scored below the anomaly cut.
    pub flagged: usize,
    /// Score cut separating anomalous rows from normal ones.
    pub offset: f64,
    /// Where the training rows came from.
    pub source: TrainingSource,
    /// Completion time of the fit.
    pub trained_at: DateTime<Utc>,
}

/// Fitted state: the standardizer and forest that must travel together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FittedModel {
    pub(crate) scaler: Standardizer,
    pub(crate) forest: IsolationForest,
    pub(crate) trained_at: DateTime<Utc>,
}

/// Anomaly detector with lazy bootstrap training.
///
/// `predict` before any fit trains once on the synthetic corpus, so a
/// fresh detector is always usable. Explicit `train` calls refit from
/// scratch; `save`/`load` move the fitted state through a versioned
/// JSON snapshot.
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    config: ForestConfig,
    features: FeatureBuilder,
    fitted: Option<FittedModel>,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl AnomalyDetector {
    /// Creates an unfitted detector with the given forest parameters.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            features: FeatureBuilder::default(),
            fitted: None,
        }
    }

    /// True once a fit (trained or loaded) is in place.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Completion time of the current fit, if any.
    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.fitted.as_ref().map(|fitted| fitted.trained_at)
    }

    /// Forest parameters the next fit will use.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Fits on the given samples, or on the synthetic corpus for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InsufficientData`] when fewer than
    /// [`MIN_TRAINING_ROWS`] feature rows are available, and passes
    /// through standardizer and forest fit errors.
    pub fn train(
        &mut self,
        samples: Option<&[SensorSample]>,
    ) -> Result<TrainingReport, ModelError> {
        let (rows, source) = match samples {
            Some(history) => (self.features.build(history), TrainingSource::Provided),
            None => {
                let corpus = synthetic_corpus(DEFAULT_CORPUS_SIZE, DEFAULT_CORPUS_SEED)?;
                (self.features.build(&corpus), TrainingSource::Synthetic)
            }
        };
        self.train_on_features(&rows, source)
    }

    fn train_on_features(
        &mut self,
        rows: &[FeatureVector],
        source: TrainingSource,
    ) -> Result<TrainingReport, ModelError> {
        if rows.len() < MIN_TRAINING_ROWS {
            return Err(ModelError::InsufficientData {
                rows: rows.len(),
                required: MIN_TRAINING_ROWS,
            });
        }

        let scaler = Standardizer::fit(rows)?;
        let standardized = scaler.transform(rows);
        let forest = IsolationForest::fit(&standardized, &self.config)?;

        let offset = forest.offset();
        let flagged = standardized
            .iter()
            .filter(|row| forest.score(row.as_slice()) < offset)
            .count();
        let trained_at = Utc::now();

        info!(
            rows = rows.len(),
            flagged,
            offset,
            source = ?source,
            "anomaly model trained"
        );
        self.fitted = Some(FittedModel {
            scaler,
            forest,
            trained_at,
        });

        Ok(TrainingReport {
            rows: rows.len(),
            flagged,
            offset,
            source,
            trained_at,
        })
    }

    /// Scores samples in order, one result per sample.
    ///
    /// Zero rows short-circuit to an empty result without touching the
    /// model. A detector that has never been fitted trains itself on the
    /// synthetic corpus first.
    ///
    /// # Errors
    ///
    /// Passes through training errors from the bootstrap fit.
    pub fn predict(
        &mut self,
        samples: &[SensorSample],
    ) -> Result<Vec<AnomalyResult>, ModelError> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        if self.fitted.is_none() {
            debug!("predict before any fit, bootstrapping from the synthetic corpus");
            self.train(None)?;
        }
        let Some(fitted) = self.fitted.as_ref() else {
            return Err(ModelError::InsufficientData {
                rows: 0,
                required: MIN_TRAINING_ROWS,
            });
        };

        let rows = self.features.build(samples);
        Ok(rows
            .iter()
            .map(|row| fitted.forest.classify(&fitted.scaler.transform_one(row)))
            .collect())
    }

    /// Writes the fitted state as a snapshot at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Persistence`] when nothing is fitted yet or
    /// the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let Some(fitted) = self.fitted.as_ref() else {
            return Err(ModelError::Persistence(
                "no fitted model to save".to_string(),
            ));
        };
        ModelSnapshot::new(&self.config, fitted).write(path)?;
        info!(path = %path.display(), "model snapshot saved");
        Ok(())
    }

    /// Restores fitted state from `path`; `Ok(false)` means no snapshot
    /// exists there, which is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Format`] or [`ModelError::UnsupportedVersion`]
    /// for snapshots that exist but cannot be used, and
    /// [`ModelError::Persistence`] for read failures.
    pub fn load(&mut self, path: &Path) -> Result<bool, ModelError> {
        let Some(snapshot) = ModelSnapshot::read(path)? else {
            debug!(path = %path.display(), "no model snapshot found");
            return Ok(false);
        };
        let (config, fitted) = snapshot.into_parts()?;
        self.config = config;
        self.fitted = Some(fitted);
        info!(path = %path.display(), "model snapshot loaded");
        Ok(true)
    }
}
