//! Health-state derivation for the hydraulic monitoring pipeline.
//!
//! The [`HealthClassifier`] turns each scored sample into a
//! [`HealthState`](hydromon_types::HealthState): the model path maps the
//! latest anomaly result through the score cut, and a banded threshold
//! fallback takes over whenever no model result is available. The
//! [`HealthTracker`] remembers the current state and reports a
//! [`HealthTransition`] only when it changes, which is the one condition
//! under which collaborators raise alerts.

pub mod classifier;
pub mod tracker;

pub use classifier::{
    Classification, ClassificationPath, FAULT_SCORE_CUT, HealthClassifier, ThresholdLimits,
};
pub use tracker::{HealthTracker, HealthTransition};
