//! Shared data model for the HydroMon predictive-maintenance suite.
//!
//! Every crate in the workspace speaks in terms of these types: sensor
//! samples flowing out of the simulator, fault descriptors held by the
//! injector, anomaly results produced by the model, and the health /
//! failure-prediction values the engine publishes to collaborators.
//!
//! All types are plain immutable values with `serde` support; behavior
//! that mutates state lives in the component crates.

pub mod anomaly;
pub mod fault;
pub mod health;
pub mod prediction;
pub mod sample;

pub use anomaly::{AnomalyLabel, AnomalyResult};
pub use fault::{FaultDescriptor, FaultType, ParseFaultTypeError};
pub use health::HealthState;
pub use prediction::{FailurePrediction, RiskLevel};
pub use sample::SensorSample;
