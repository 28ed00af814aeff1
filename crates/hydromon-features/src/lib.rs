//! Sliding-window feature engineering over hydraulic sensor samples.
//!
//! The anomaly model does not look at raw samples; it looks at feature
//! vectors that describe each sample in the context of its trailing
//! window: the raw channel values, the rolling mean and standard
//! deviation over the window, and the first-difference rate of change.
//! The [`FeatureBuilder`] turns an ordered run of samples into one
//! [`FeatureVector`] per sample with those twelve dimensions, behaving
//! identically whether the window is full or still filling.

pub mod builder;
pub mod vector;

pub use builder::{DEFAULT_WINDOW, FeatureBuilder};
pub use vector::{FEATURE_DIMENSIONS, FeatureVector};
