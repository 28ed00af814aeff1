//! Fault-signature injection.
//!
//! The injector is a two-state machine:
//!
//! ```text
//!            inject(type)
//!      idle ------------> active
//!        ^                  |
//!        |   elapsed >=     | inject(type)  (overwrite, ramp restarts)
//!        |   duration       v
//!        +-------------- active
//! ```
//!
//! While active, every sample passing through [`FaultInjector::apply`] is
//! reshaped by the fault signature at the current ramp intensity. The
//! tick that reaches the full duration still applies the signature at
//! intensity 1, then the injector returns to idle and hands the expired
//! descriptor back so the caller can announce the clearance.

use hydromon_types::{FaultDescriptor, FaultType, SensorSample};
use rand::Rng;

/// Fixed ramp duration for injected faults.
pub const DEFAULT_FAULT_DURATION_MS: u64 = 15_000;

/// Pressure lost at full intensity (PSI).
const PRESSURE_DROP_SCALE: f64 = 40.0;
/// Leaks never pull the reading below the accumulator floor.
const PRESSURE_DROP_FLOOR: f64 = 80.0;
/// Temperature gained at full intensity (°C).
const TEMPERATURE_SPIKE_SCALE: f64 = 30.0;
/// Full width of the cavitation flow band at intensity 1.
const FLOW_DISRUPTION_SCALE: f64 = 30.0;
/// Full widths of the sensor-noise bands at intensity 1.
const NOISE_PRESSURE_SCALE: f64 = 20.0;
const NOISE_TEMPERATURE_SCALE: f64 = 15.0;
const NOISE_FLOW_SCALE: f64 = 15.0;

/// Holds at most one active fault and applies its signature per sample.
#[derive(Debug, Clone)]
pub struct FaultInjector {
    active: Option<FaultDescriptor>,
    duration_ms: u64,
}

impl Default for FaultInjector {
    fn default() -> Self {
        Self::new(DEFAULT_FAULT_DURATION_MS)
    }
}

impl FaultInjector {
    /// Creates an idle injector whose faults ramp over `duration_ms`.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            active: None,
            duration_ms,
        }
    }

    /// The active fault, if any.
    pub fn active(&self) -> Option<&FaultDescriptor> {
        self.active.as_ref()
    }

    /// True while a fault is active.
    pub fn has_active_fault(&self) -> bool {
        self.active.is_some()
    }

    /// Activates `fault_type` starting now, overwriting any active fault.
    ///
    /// There is no queueing: re-injecting restarts the ramp from zero.
    pub fn inject(&mut self, fault_type: FaultType, now_ms: i64) -> FaultDescriptor {
        let descriptor = FaultDescriptor::new(fault_type, now_ms, self.duration_ms);
        self.active = Some(descriptor);
        descriptor
    }

    /// Drops the active fault without applying anything.
    pub fn clear(&mut self) -> Option<FaultDescriptor> {
        self.active.take()
    }

    /// Applies the active signature to `sample` at the current intensity.
    ///
    /// Returns the (possibly reshaped) sample, plus the descriptor of a
    /// fault that expired on this call. An idle injector passes samples
    /// through untouched.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        sample: SensorSample,
        now_ms: i64,
        rng: &mut R,
    ) -> (SensorSample, Option<FaultDescriptor>) {
        let Some(fault) = self.active else {
            return (sample, None);
        };

        let shaped = apply_signature(sample, fault.fault_type, fault.intensity(now_ms), rng);
        let cleared = if fault.is_expired(now_ms) {
            self.active.take()
        } else {
            None
        };
        (shaped, cleared)
    }
}

/// Reshapes one sample with a fault signature at the given intensity.
///
/// Intensity is expected in [0, 1]; outputs keep the sample timestamp
/// and stay non-negative.
pub fn apply_signature<R: Rng + ?Sized>(
    sample: SensorSample,
    fault_type: FaultType,
    intensity: f64,
    rng: &mut R,
) -> SensorSample {
    match fault_type {
        FaultType::PressureDrop => SensorSample::new(
            (sample.pressure - intensity * PRESSURE_DROP_SCALE).max(PRESSURE_DROP_FLOOR),
            sample.temperature,
            sample.flow,
            sample.timestamp_ms,
        ),
        FaultType::TemperatureSpike => SensorSample::new(
            sample.pressure,
            sample.temperature + intensity * TEMPERATURE_SPIKE_SCALE,
            sample.flow,
            sample.timestamp_ms,
        ),
        FaultType::FlowDisruption => SensorSample::new(
            sample.pressure,
            sample.temperature,
            sample.flow + centered(rng) * intensity * FLOW_DISRUPTION_SCALE,
            sample.timestamp_ms,
        ),
        FaultType::RandomNoise => SensorSample::new(
            sample.pressure + centered(rng) * intensity * NOISE_PRESSURE_SCALE,
            sample.temperature + centered(rng) * intensity * NOISE_TEMPERATURE_SCALE,
            sample.flow + centered(rng) * intensity * NOISE_FLOW_SCALE,
            sample.timestamp_ms,
        ),
    }
}

/// Uniform draw in (-0.5, 0.5).
fn centered<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.r#gen::<f64>() - 0.5
}
