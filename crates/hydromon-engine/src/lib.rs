//! The predictive-maintenance engine that ties the pipeline together.
//!
//! [`Engine`] owns the whole closed loop: signal generation and fault
//! injection from `hydromon-signal`, anomaly scoring from
//! `hydromon-model`, health classification from `hydromon-health`,
//! failure-timeline estimation from `hydromon-prognosis`, and the
//! alert/service/maintenance stores from `hydromon-records`. A driver
//! calls [`Engine::tick`] on a fixed period and reads the returned
//! [`TickOutcome`]; everything else is inspection ([`Engine::status`])
//! or explicit operator actions (train, inject, reset).
//!
//! Time comes from a [`Clock`] so tests can step a [`StepClock`]
//! through fault ramps without sleeping; production drivers use the
//! default [`SystemClock`].

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod outcome;

pub use clock::{Clock, StepClock, SystemClock};
pub use config::{
    DEFAULT_HEALTH_WINDOW, DEFAULT_HISTORY_CAPACITY, DEFAULT_PREDICTION_INTERVAL,
    DEFAULT_TREND_WINDOW, EngineConfig, MODEL_FILE_NAME,
};
pub use engine::{Engine, MIN_HISTORY_FOR_TRAINING};
pub use error::EngineError;
pub use history::SampleHistory;
pub use outcome::{EngineStatus, TickOutcome};
