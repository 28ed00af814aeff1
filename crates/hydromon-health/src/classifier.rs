//! Model-first health classification with a banded threshold fallback.

use hydromon_types::{AnomalyResult, HealthState, SensorSample};
use serde::{Deserialize, Serialize};

/// Score below which an anomalous sample counts as a fault rather than
/// a warning.
pub const FAULT_SCORE_CUT: f64 = -0.3;

/// Healthy operating bands and fault cutoffs for the fallback path.
///
/// A sample inside all three bands is healthy. Outside the bands, the
/// absolute deviation from the base operating point decides between
/// warning and fault.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLimits {
    /// Lower edge of the healthy pressure band (PSI).
    pub pressure_min: f64,
    /// Upper edge of the healthy pressure band (PSI).
    pub pressure_max: f64,
    /// Lower edge of the healthy temperature band (degrees Celsius).
    pub temperature_min: f64,
    /// Upper edge of the healthy temperature band (degrees Celsius).
    pub temperature_max: f64,
    /// Lower edge of the healthy flow band (L/min).
    pub flow_min: f64,
    /// Upper edge of the healthy flow band (L/min).
    pub flow_max: f64,
    /// Pressure deviation from base that escalates to fault (PSI).
    pub pressure_fault_deviation: f64,
    /// Temperature deviation from base that escalates to fault (degrees Celsius).
    pub temperature_fault_deviation: f64,
    /// Flow deviation from base that escalates to fault (L/min).
    pub flow_fault_deviation: f64,
}

impl Default for ThresholdLimits {
    fn default() -> Self {
        Self {
            pressure_min: 140.0,
            pressure_max: 160.0,
            temperature_min: 70.0,
            temperature_max: 90.0,
            flow_min: 45.0,
            flow_max: 55.0,
            pressure_fault_deviation: 30.0,
            temperature_fault_deviation: 20.0,
            flow_fault_deviation: 15.0,
        }
    }
}

impl ThresholdLimits {
    /// Checks that the bands are ordered and the deviations positive.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.pressure_min >= self.pressure_max {
            return Err("pressure band must have min < max");
        }
        if self.temperature_min >= self.temperature_max {
            return Err("temperature band must have min < max");
        }
        if self.flow_min >= self.flow_max {
            return Err("flow band must have min < max");
        }
        if self.pressure_fault_deviation <= 0.0
            || self.temperature_fault_deviation <= 0.0
            || self.flow_fault_deviation <= 0.0
        {
            return Err("fault deviations must be positive");
        }
        Ok(())
    }
}

/// Which decision path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationPath {
    /// Scored by the anomaly model.
    Model,
    /// Model unavailable; the banded threshold rules decided.
    Threshold,
}

/// A health decision plus the path that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The derived health state.
    pub state: HealthState,
    /// How the state was derived.
    pub path: ClassificationPath,
}

/// Stateless health classifier.
///
/// The model path only needs the anomaly result; the fallback path
/// needs the sample itself, the healthy bands, and the base operating
/// point the deviations are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthClassifier {
    limits: ThresholdLimits,
    base_pressure: f64,
    base_temperature: f64,
    base_flow: f64,
}

impl Default for HealthClassifier {
    fn default() -> Self {
        Self::new(ThresholdLimits::default(), [150.0, 80.0, 50.0])
    }
}

impl HealthClassifier {
    /// Creates a classifier from fallback limits and the base operating
    /// point in canonical channel order.
    pub fn new(limits: ThresholdLimits, bases: [f64; 3]) -> Self {
        let [base_pressure, base_temperature, base_flow] = bases;
        Self {
            limits,
            base_pressure,
            base_temperature,
            base_flow,
        }
    }

    /// Fallback limits in use.
    pub fn limits(&self) -> &ThresholdLimits {
        &self.limits
    }

    /// Classifies one sample given the model outcome for it.
    ///
    /// `Some` takes the model path; `None` means the model was
    /// unavailable or returned nothing, and the threshold fallback
    /// decides.
    pub fn classify(
        &self,
        sample: &SensorSample,
        outcome: Option<&AnomalyResult>,
    ) -> Classification {
        match outcome {
            Some(result) => Classification {
                state: Self::state_from_result(result),
                path: ClassificationPath::Model,
            },
            None => Classification {
                state: self.classify_fallback(sample),
                path: ClassificationPath::Threshold,
            },
        }
    }

    fn state_from_result(result: &AnomalyResult) -> HealthState {
        if result.is_anomaly() {
            if result.score < FAULT_SCORE_CUT {
                HealthState::Fault
            } else {
                HealthState::Warning
            }
        } else {
            HealthState::Healthy
        }
    }

    /// Banded threshold classification, independent of any model state.
    pub fn classify_fallback(&self, sample: &SensorSample) -> HealthState {
        let limits = &self.limits;
        let pressure_normal =
            (limits.pressure_min..=limits.pressure_max).contains(&sample.pressure);
        let temperature_normal =
            (limits.temperature_min..=limits.temperature_max).contains(&sample.temperature);
        let flow_normal = (limits.flow_min..=limits.flow_max).contains(&sample.flow);

        if pressure_normal && temperature_normal && flow_normal {
            return HealthState::Healthy;
        }

        let pressure_deviation = (sample.pressure - self.base_pressure).abs();
        let temperature_deviation = (sample.temperature - self.base_temperature).abs();
        let flow_deviation = (sample.flow - self.base_flow).abs();

        if pressure_deviation > limits.pressure_fault_deviation
            || temperature_deviation > limits.temperature_fault_deviation
            || flow_deviation > limits.flow_fault_deviation
        {
            HealthState::Fault
        } else {
            HealthState::Warning
        }
    }
}
