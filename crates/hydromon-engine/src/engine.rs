//! Tick orchestration and the external engine interface.

use hydromon_health::{
    Classification, ClassificationPath, HealthClassifier, HealthTracker, HealthTransition,
};
use hydromon_model::{AnomalyDetector, TrainingReport};
use hydromon_prognosis::{MIN_SCORES, TimelineEstimator};
use hydromon_records::{
    AlertSeverity, Component, LogDetail, LogEvent, LogSeverity, MaintenanceDraft,
    MaintenanceRecord, RecordBook,
};
use hydromon_signal::{FaultInjector, SignalGenerator};
use hydromon_types::{
    AnomalyResult, FailurePrediction, FaultDescriptor, FaultType, HealthState, SensorSample,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::history::SampleHistory;
use crate::outcome::{EngineStatus, TickOutcome};

/// Buffered samples needed before [`Engine::train_from_history`]
/// prefers the buffer over the synthetic corpus.
pub const MIN_HISTORY_FOR_TRAINING: usize = 50;

/// Alerts included in a status snapshot.
const STATUS_ALERT_COUNT: usize = 5;

/// The predictive-maintenance engine.
///
/// Owns every piece of mutable simulation state: the RNG, the signal
/// pipeline, the anomaly model, health tracking, the failure
/// prediction, sample history, and the record stores. A driver calls
/// [`tick`](Engine::tick) on a fixed period; everything else is
/// inspection or explicit operator actions.
#[derive(Debug)]
pub struct Engine<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    rng: StdRng,
    generator: SignalGenerator,
    injector: FaultInjector,
    detector: AnomalyDetector,
    classifier: HealthClassifier,
    tracker: HealthTracker,
    estimator: TimelineEstimator,
    history: SampleHistory,
    records: RecordBook,
    current: Option<SensorSample>,
    prediction: Option<FailurePrediction>,
    running: bool,
    ticks: u64,
}

impl Engine<SystemClock> {
    /// Creates an engine on the system clock.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Engine<C> {
    /// Creates an engine on an injected clock.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` fails validation.
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            generator: SignalGenerator::new(config.signal.clone()),
            injector: FaultInjector::new(config.fault_duration_ms),
            detector: AnomalyDetector::new(config.detector),
            classifier: HealthClassifier::new(config.thresholds, config.signal.bases()),
            tracker: HealthTracker::default(),
            estimator: TimelineEstimator,
            history: SampleHistory::new(config.history_capacity),
            records: RecordBook::new(),
            current: None,
            prediction: None,
            running: false,
            ticks: 0,
            rng,
            clock,
            config,
        })
    }

    /// Advances the simulation by one step.
    ///
    /// Generates a sample, applies the active fault signature, derives
    /// health (falling back to the threshold rules on any scoring
    /// failure), raises alerts on state changes, and refreshes the
    /// failure prediction on the configured interval. Never fails; all
    /// degraded paths are reported in the outcome.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        let now = self.clock.now_ms();

        let baseline = self.generator.sample(&mut self.rng, now);
        let (sample, cleared_fault) = self.injector.apply(baseline, now, &mut self.rng);
        if let Some(expired) = cleared_fault.as_ref() {
            info!(fault = %expired.fault_type, "fault ramp completed");
            self.records.raise_alert(
                now,
                AlertSeverity::Info,
                "Fault condition cleared - returning to normal operation",
            );
        }

        let classification = self.classify(sample);
        let transition = self.tracker.observe(classification.state);
        if let Some(change) = transition {
            self.announce_transition(change, &sample, now);
        }

        self.history.push(sample);
        self.current = Some(sample);

        let prediction_refreshed = self.ticks % self.config.prediction_interval == 0;
        if prediction_refreshed {
            self.refresh_prediction();
        }

        debug!(
            tick = self.ticks,
            health = %classification.state,
            pressure = sample.pressure,
            temperature = sample.temperature,
            flow = sample.flow,
            "tick complete"
        );

        TickOutcome {
            sample,
            health: classification.state,
            transition,
            cleared_fault,
            used_fallback: classification.path == ClassificationPath::Threshold,
            prediction_refreshed,
        }
    }

    /// Scores the trailing health window and classifies the sample,
    /// falling back to the threshold rules when scoring fails.
    fn classify(&mut self, sample: SensorSample) -> Classification {
        let mut window = self
            .history
            .recent(self.config.health_window.saturating_sub(1));
        window.push(sample);

        let outcome = match self.detector.predict(&window) {
            Ok(results) => results.last().copied(),
            Err(error) => {
                warn!(%error, "anomaly scoring failed, using threshold fallback");
                None
            }
        };
        self.classifier.classify(&sample, outcome.as_ref())
    }

    fn announce_transition(&mut self, change: HealthTransition, sample: &SensorSample, now: i64) {
        info!(from = %change.from, to = %change.to, "health transition");
        match change.to {
            HealthState::Fault => {
                self.records.raise_alert(
                    now,
                    AlertSeverity::Error,
                    format!(
                        "{} - pressure: {:.1} PSI, temperature: {:.1} °C, flow: {:.1} L/min",
                        change.message(),
                        sample.pressure,
                        sample.temperature,
                        sample.flow
                    ),
                );
            }
            HealthState::Warning => {
                self.records.raise_alert(
                    now,
                    AlertSeverity::Warning,
                    format!(
                        "{} - system parameters show unusual patterns",
                        change.message()
                    ),
                );
            }
            HealthState::Healthy => {
                self.records.raise_alert(
                    now,
                    AlertSeverity::Info,
                    format!("{} operation", change.message()),
                );
            }
        }
    }

    /// Rescoring pass over the trend window; stores the new prediction.
    fn refresh_prediction(&mut self) {
        let window = self.history.recent(self.config.trend_window);
        if window.len() < MIN_SCORES {
            self.prediction = Some(FailurePrediction::insufficient_data());
            return;
        }

        match self.detector.predict(&window) {
            Ok(results) if results.is_empty() => {
                self.prediction = Some(FailurePrediction::unscorable());
            }
            Ok(results) => {
                let scores: Vec<f64> = results.iter().map(|result| result.score).collect();
                self.prediction = Some(self.estimator.estimate(&scores));
            }
            Err(error) => {
                warn!(%error, "failure-timeline scoring failed");
                self.prediction = Some(FailurePrediction::analysis_error(&error.to_string()));
            }
        }
    }

    /// The stored failure prediction, computed on first demand.
    pub fn failure_prediction(&mut self) -> FailurePrediction {
        if self.prediction.is_none() {
            self.refresh_prediction();
        }
        self.prediction
            .clone()
            .unwrap_or_else(FailurePrediction::insufficient_data)
    }

    /// Trains the anomaly model on `samples`, or on the synthetic
    /// corpus with `None`. Success refreshes the stored prediction and
    /// persists a snapshot when a model directory is configured.
    ///
    /// # Errors
    ///
    /// Returns the model error when training fails; the previous fit,
    /// if any, stays in place.
    pub fn train(
        &mut self,
        samples: Option<&[SensorSample]>,
    ) -> Result<TrainingReport, EngineError> {
        let now = self.clock.now_ms();
        match self.detector.train(samples) {
            Ok(report) => {
                self.records.raise_alert(
                    now,
                    AlertSeverity::Info,
                    "Model training completed successfully",
                );
                self.records.log(
                    now,
                    LogEvent::Ml,
                    LogSeverity::Info,
                    Component::MlModel,
                    "Model training completed successfully",
                    Some(LogDetail::TrainingInfo { rows: report.rows }),
                );
                self.persist_model();
                self.refresh_prediction();
                Ok(report)
            }
            Err(error) => {
                self.records.log(
                    now,
                    LogEvent::Ml,
                    LogSeverity::Error,
                    Component::MlModel,
                    format!("Model training failed: {error}"),
                    None,
                );
                Err(error.into())
            }
        }
    }

    /// Trains on the buffered history when at least
    /// [`MIN_HISTORY_FOR_TRAINING`] samples are buffered, otherwise on
    /// the synthetic corpus.
    ///
    /// # Errors
    ///
    /// Same as [`train`](Engine::train).
    pub fn train_from_history(&mut self) -> Result<TrainingReport, EngineError> {
        if self.history.len() < MIN_HISTORY_FOR_TRAINING {
            debug!(
                buffered = self.history.len(),
                "history too short for training, using the synthetic corpus"
            );
            return self.train(None);
        }
        let samples = self.history.recent(self.history.len());
        self.train(Some(&samples))
    }

    /// Scores samples with the anomaly model, one result per sample.
    ///
    /// # Errors
    ///
    /// Passes through model errors, including those from the lazy
    /// first-use fit.
    pub fn predict(
        &mut self,
        samples: &[SensorSample],
    ) -> Result<Vec<AnomalyResult>, EngineError> {
        Ok(self.detector.predict(samples)?)
    }

    /// Load-or-train startup: restores the model snapshot when one
    /// exists, otherwise trains on the synthetic corpus. Returns true
    /// when a snapshot was restored.
    ///
    /// # Errors
    ///
    /// Returns training errors; a missing or unreadable snapshot is not
    /// an error, it just forces the training path.
    pub fn bootstrap(&mut self) -> Result<bool, EngineError> {
        let loaded = match self.config.model_file() {
            Some(path) => match self.detector.load(&path) {
                Ok(loaded) => loaded,
                Err(error) => {
                    warn!(%error, path = %path.display(), "snapshot load failed, training fresh");
                    false
                }
            },
            None => false,
        };

        let now = self.clock.now_ms();
        if loaded {
            self.records.log(
                now,
                LogEvent::Ml,
                LogSeverity::Info,
                Component::MlModel,
                "Model restored from snapshot",
                None,
            );
        } else {
            self.train(None)?;
        }

        self.records
            .raise_alert(now, AlertSeverity::Info, "Monitoring engine initialized");
        self.records.log(
            now,
            LogEvent::System,
            LogSeverity::Info,
            Component::Simulation,
            "Monitoring engine started successfully",
            None,
        );
        Ok(loaded)
    }

    /// Saves the fitted model when persistence is configured. Failures
    /// are logged and swallowed; a stale snapshot beats a dead engine.
    fn persist_model(&mut self) {
        let Some(path) = self.config.model_file() else {
            return;
        };
        if let Err(error) = self.detector.save(&path) {
            warn!(%error, path = %path.display(), "model snapshot save failed");
        }
    }

    /// Activates `fault_type` starting now and records the injection.
    pub fn inject_fault(&mut self, fault_type: FaultType) -> FaultDescriptor {
        let now = self.clock.now_ms();
        let descriptor = self.injector.inject(fault_type, now);
        info!(fault = %fault_type, "fault injected");
        self.records
            .raise_alert(now, AlertSeverity::Warning, fault_type.injection_notice());
        self.records.log(
            now,
            LogEvent::Fault,
            LogSeverity::Warning,
            Component::HydraulicSystem,
            format!("Fault injected: {fault_type}"),
            Some(LogDetail::FaultInfo {
                fault_type,
                duration_ms: descriptor.duration_ms,
            }),
        );
        descriptor
    }

    /// String-boundary form of [`inject_fault`](Engine::inject_fault).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFaultType`] listing the valid
    /// names when `name` does not parse.
    pub fn inject_fault_named(&mut self, name: &str) -> Result<FaultDescriptor, EngineError> {
        let fault_type: FaultType = name.parse()?;
        Ok(self.inject_fault(fault_type))
    }

    /// Clears history, fault state, health, prediction, and the alert
    /// feed, then records the reset. The fitted model survives.
    pub fn reset(&mut self) {
        let now = self.clock.now_ms();
        self.injector.clear();
        self.tracker.reset();
        self.history.clear();
        self.prediction = None;
        self.records.clear_alerts();
        self.ticks = 0;
        info!("engine state reset");
        self.records.raise_alert(
            now,
            AlertSeverity::Info,
            "System reset completed - all parameters restored to normal",
        );
        self.records.log(
            now,
            LogEvent::System,
            LogSeverity::Info,
            Component::Simulation,
            "Simulation state reset - all parameters restored to normal",
            None,
        );
    }

    /// Marks the engine as running and records the start.
    pub fn start(&mut self) {
        self.running = true;
        let now = self.clock.now_ms();
        self.records
            .raise_alert(now, AlertSeverity::Info, "Hydraulic simulation started");
        self.records.log(
            now,
            LogEvent::System,
            LogSeverity::Info,
            Component::Simulation,
            "Hydraulic simulation started",
            None,
        );
    }

    /// Marks the engine as stopped and records the stop.
    pub fn stop(&mut self) {
        self.running = false;
        let now = self.clock.now_ms();
        self.records
            .raise_alert(now, AlertSeverity::Info, "Hydraulic simulation stopped");
        self.records.log(
            now,
            LogEvent::System,
            LogSeverity::Info,
            Component::Simulation,
            "Hydraulic simulation stopped",
            None,
        );
    }

    /// Whether the driver loop should be ticking.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Files a maintenance record stamped with the current clock time.
    pub fn record_maintenance(&mut self, draft: MaintenanceDraft) -> MaintenanceRecord {
        let now = self.clock.now_ms();
        self.records.create_maintenance(now, draft)
    }

    /// Point-in-time snapshot for drivers and status displays.
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            health: self.tracker.state(),
            is_running: self.running,
            current_sample: self.current,
            alerts: self.records.alerts().recent(STATUS_ALERT_COUNT),
            prediction: self.prediction.clone(),
        }
    }

    /// The most recent sample, if any tick has run.
    pub fn current_sample(&self) -> Option<&SensorSample> {
        self.current.as_ref()
    }

    /// The newest `limit` buffered samples in chronological order.
    pub fn history(&self, limit: usize) -> Vec<SensorSample> {
        self.history.recent(limit)
    }

    /// Number of buffered samples.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The active fault, if any.
    pub fn active_fault(&self) -> Option<&FaultDescriptor> {
        self.injector.active()
    }

    /// The record stores.
    pub fn records(&self) -> &RecordBook {
        &self.records
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
