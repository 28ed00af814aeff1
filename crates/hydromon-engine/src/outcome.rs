//! Per-tick and on-demand engine snapshots.

use hydromon_health::HealthTransition;
use hydromon_records::Alert;
use hydromon_types::{FailurePrediction, FaultDescriptor, HealthState, SensorSample};
use serde::Serialize;

/// Everything one `tick()` produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutcome {
    /// The generated (possibly fault-shaped) sample.
    pub sample: SensorSample,
    /// Health derived for this sample.
    pub health: HealthState,
    /// State change, when one happened.
    pub transition: Option<HealthTransition>,
    /// Fault that expired on this tick.
    pub cleared_fault: Option<FaultDescriptor>,
    /// True when the threshold fallback classified instead of the model.
    pub used_fallback: bool,
    /// True when this tick refreshed the failure prediction.
    pub prediction_refreshed: bool,
}

/// Point-in-time engine snapshot for drivers and status displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    /// Current health state.
    pub health: HealthState,
    /// Whether the driver loop should be ticking.
    pub is_running: bool,
    /// Most recent sample, if any tick has run.
    pub current_sample: Option<SensorSample>,
    /// The newest alerts, newest last.
    pub alerts: Vec<Alert>,
    /// Stored failure prediction, if one has been computed.
    pub prediction: Option<FailurePrediction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydromon_types::{FaultDescriptor, FaultType};

    #[test]
    fn tick_outcome_serializes_with_stable_field_names() -> Result<(), serde_json::Error> {
        let outcome = TickOutcome {
            sample: SensorSample::new(148.2, 81.0, 49.5, 1_000),
            health: HealthState::Warning,
            transition: None,
            cleared_fault: Some(FaultDescriptor::new(FaultType::RandomNoise, 0, 15_000)),
            used_fallback: false,
            prediction_refreshed: true,
        };

        let value = serde_json::to_value(&outcome)?;
        assert_eq!(value.get("health"), Some(&serde_json::json!("warning")));
        assert_eq!(
            value.pointer("/cleared_fault/fault_type"),
            Some(&serde_json::json!("random_noise"))
        );
        assert_eq!(
            value.get("prediction_refreshed"),
            Some(&serde_json::json!(true))
        );
        Ok(())
    }

    #[test]
    fn idle_status_serializes_null_optionals() -> Result<(), serde_json::Error> {
        let status = EngineStatus {
            health: HealthState::Healthy,
            is_running: false,
            current_sample: None,
            alerts: Vec::new(),
            prediction: None,
        };

        let value = serde_json::to_value(&status)?;
        assert_eq!(value.get("health"), Some(&serde_json::json!("healthy")));
        assert_eq!(value.get("current_sample"), Some(&serde_json::Value::Null));
        assert_eq!(value.get("prediction"), Some(&serde_json::Value::Null));
        Ok(())
    }
}
