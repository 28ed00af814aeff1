//! Unsupervised anomaly model for hydraulic sensor streams.
//!
//! The model is a two-stage pipeline fitted on feature vectors from
//! `hydromon-features`: a [`Standardizer`] (per-dimension zero mean,
//! unit variance) feeding an [`IsolationForest`] (an ensemble of
//! randomized partitioning trees). Scores land in (-1, 0) with lower
//! meaning more anomalous; the anomaly/normal cut is the contamination
//! quantile of the training scores.
//!
//! [`AnomalyDetector`] is the front door: it trains on caller-provided
//! history or on a seeded synthetic corpus, lazily bootstraps itself on
//! first use, and persists its fitted state as a versioned JSON
//! snapshot.

pub mod corpus;
pub mod detector;
pub mod error;
pub mod forest;
pub mod snapshot;
pub mod standardizer;

pub use corpus::{DEFAULT_CORPUS_SEED, DEFAULT_CORPUS_SIZE, synthetic_corpus};
pub use detector::{AnomalyDetector, MIN_TRAINING_ROWS, TrainingReport, TrainingSource};
pub use error::{ModelError, ModelResult};
pub use forest::{ForestConfig, IsolationForest};
pub use snapshot::{ModelSnapshot, SNAPSHOT_VERSION};
pub use standardizer::Standardizer;
