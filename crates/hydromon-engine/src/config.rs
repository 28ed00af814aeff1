//! Engine configuration.

use std::path::PathBuf;

use hydromon_health::ThresholdLimits;
use hydromon_model::ForestConfig;
use hydromon_signal::{DEFAULT_FAULT_DURATION_MS, SignalConfig};

use crate::error::EngineError;

/// Samples the history buffer holds before evicting the oldest.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Trailing samples (including the current one) scored for health.
pub const DEFAULT_HEALTH_WINDOW: usize = 5;

/// Trailing samples scored for the failure timeline.
pub const DEFAULT_TREND_WINDOW: usize = 50;

/// Ticks between failure-timeline refreshes.
pub const DEFAULT_PREDICTION_INTERVAL: u64 = 10;

/// File name of the model snapshot inside the model directory.
pub const MODEL_FILE_NAME: &str = "model.json";

/// Everything the engine needs to run, with reference-rig defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Baseline operating point and jitter spreads.
    pub signal: SignalConfig,
    /// Fallback classification bands and fault deviations.
    pub thresholds: ThresholdLimits,
    /// Isolation-forest fit parameters.
    pub detector: ForestConfig,
    /// History buffer capacity.
    pub history_capacity: usize,
    /// Trailing window scored for health each tick.
    pub health_window: usize,
    /// Trailing window scored for the failure timeline.
    pub trend_window: usize,
    /// Ticks between failure-timeline refreshes.
    pub prediction_interval: u64,
    /// Fault ramp duration.
    pub fault_duration_ms: u64,
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Directory holding the model snapshot; `None` disables persistence.
    pub model_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signal: SignalConfig::default(),
            thresholds: ThresholdLimits::default(),
            detector: ForestConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            health_window: DEFAULT_HEALTH_WINDOW,
            trend_window: DEFAULT_TREND_WINDOW,
            prediction_interval: DEFAULT_PREDICTION_INTERVAL,
            fault_duration_ms: DEFAULT_FAULT_DURATION_MS,
            seed: None,
            model_dir: None,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration, including the nested component
    /// configurations.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] (or the nested model
    /// configuration error) describing the first invalid field.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.signal.validate().map_err(EngineError::Configuration)?;
        self.thresholds
            .validate()
            .map_err(EngineError::Configuration)?;
        self.detector.validate()?;
        if self.history_capacity == 0 {
            return Err(EngineError::Configuration(
                "history capacity must be at least 1",
            ));
        }
        if self.health_window == 0 {
            return Err(EngineError::Configuration(
                "health window must be at least 1",
            ));
        }
        if self.trend_window == 0 {
            return Err(EngineError::Configuration(
                "trend window must be at least 1",
            ));
        }
        if self.prediction_interval == 0 {
            return Err(EngineError::Configuration(
                "prediction interval must be at least 1 tick",
            ));
        }
        if self.fault_duration_ms == 0 {
            return Err(EngineError::Configuration(
                "fault duration must be at least 1 ms",
            ));
        }
        Ok(())
    }

    /// Full path of the model snapshot, when persistence is configured.
    pub fn model_file(&self) -> Option<PathBuf> {
        self.model_dir.as_ref().map(|dir| dir.join(MODEL_FILE_NAME))
    }
}
