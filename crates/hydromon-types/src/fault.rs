//! Fault types and the active-fault descriptor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fault signatures the injector can apply to the signal stream.
///
/// Each variant models one hydraulic failure mode with its own
/// perturbation formula; the wire name (snake_case) is the stable
/// identifier used by drivers and serialized records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultType {
    /// Gradual pressure loss, as from a developing leak.
    PressureDrop,
    /// Rising fluid temperature, as from overheating.
    TemperatureSpike,
    /// Erratic flow readings, as from cavitation.
    FlowDisruption,
    /// Broadband noise on all channels, as from a failing sensor.
    RandomNoise,
}

impl FaultType {
    /// All fault types, in declaration order.
    pub const ALL: [FaultType; 4] = [
        FaultType::PressureDrop,
        FaultType::TemperatureSpike,
        FaultType::FlowDisruption,
        FaultType::RandomNoise,
    ];

    /// Stable snake_case wire name.
    pub fn name(&self) -> &'static str {
        match self {
            FaultType::PressureDrop => "pressure_drop",
            FaultType::TemperatureSpike => "temperature_spike",
            FaultType::FlowDisruption => "flow_disruption",
            FaultType::RandomNoise => "random_noise",
        }
    }

    /// Notice text recorded when this fault is injected.
    pub fn injection_notice(&self) -> &'static str {
        match self {
            FaultType::PressureDrop => "Injecting pressure drop fault - simulating leak",
            FaultType::TemperatureSpike => {
                "Injecting temperature spike fault - simulating overheating"
            }
            FaultType::FlowDisruption => {
                "Injecting flow disruption fault - simulating cavitation"
            }
            FaultType::RandomNoise => "Injecting sensor noise fault - simulating sensor malfunction",
        }
    }
}

impl fmt::Display for FaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a fault name that does not match any [`FaultType`].
///
/// The message enumerates the valid names, since this is the one
/// user-facing validation error in the system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid fault type `{input}`, expected one of: pressure_drop, temperature_spike, flow_disruption, random_noise"
)]
pub struct ParseFaultTypeError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for FaultType {
    type Err = ParseFaultTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaultType::ALL
            .iter()
            .find(|fault| fault.name() == s)
            .copied()
            .ok_or_else(|| ParseFaultTypeError {
                input: s.to_owned(),
            })
    }
}

/// The single active fault held by the injector.
///
/// Intensity ramps linearly from 0 at `started_at_ms` to 1 once
/// `duration_ms` has elapsed, after which the fault expires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultDescriptor {
    /// Which signature is being applied.
    pub fault_type: FaultType,
    /// Injection time in milliseconds since the Unix epoch.
    pub started_at_ms: i64,
    /// Ramp duration in milliseconds.
    pub duration_ms: u64,
}

impl FaultDescriptor {
    /// Creates a descriptor starting at `started_at_ms`.
    pub fn new(fault_type: FaultType, started_at_ms: i64, duration_ms: u64) -> Self {
        Self {
            fault_type,
            started_at_ms,
            duration_ms,
        }
    }

    /// Milliseconds elapsed since injection, clamped at zero for clocks
    /// that report a time before the start.
    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.started_at_ms).max(0)
    }

    /// Ramp position in [0, 1]: elapsed time over duration.
    pub fn intensity(&self, now_ms: i64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = self.elapsed_ms(now_ms) as f64;
        (elapsed / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// True once the full ramp duration has elapsed.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        u64::try_from(self.elapsed_ms(now_ms)).is_ok_and(|elapsed| elapsed >= self.duration_ms)
    }
}
