//! Failure-timeline estimation from anomaly score trends.
//!
//! The [`TimelineEstimator`] looks at the anomaly scores of a recent
//! window and produces a
//! [`FailurePrediction`](hydromon_types::FailurePrediction): a risk
//! bucket from the average score, an estimated days-to-failure from the
//! bucket's base horizon adjusted by the score trend, and a one-line
//! narrative. It is a pure function of the scores; computing them is
//! the caller's job.

pub mod estimator;

pub use estimator::{
    HIGH_RISK_SCORE, MEDIUM_RISK_SCORE, MIN_SCORES, TREND_BAND, TimelineEstimator, Trend,
};
