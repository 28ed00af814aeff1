//! Hydraulic sensor samples.

use serde::{Deserialize, Serialize};

/// One reading of the three hydraulic channels at a point in time.
///
/// Channel values are physical quantities (PSI, degrees Celsius, L/min)
/// and are never negative; constructors floor them at zero. Samples are
/// immutable once created — fault signatures and other transforms build
/// new samples rather than editing in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Hydraulic pressure in PSI.
    pub pressure: f64,
    /// Fluid temperature in degrees Celsius.
    pub temperature: f64,
    /// Volumetric flow in liters per minute.
    pub flow: f64,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl SensorSample {
    /// Creates a sample, flooring each channel at zero.
    pub fn new(pressure: f64, temperature: f64, flow: f64, timestamp_ms: i64) -> Self {
        Self {
            pressure: pressure.max(0.0),
            temperature: temperature.max(0.0),
            flow: flow.max(0.0),
            timestamp_ms,
        }
    }

    /// The three channel values in canonical order: pressure, temperature, flow.
    pub fn channels(&self) -> [f64; 3] {
        [self.pressure, self.temperature, self.flow]
    }
}
