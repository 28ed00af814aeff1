//! Operating-point configuration for the signal generator.

use serde::{Deserialize, Serialize};

/// Base values and jitter spreads for the three hydraulic channels.
///
/// The defaults describe the reference rig: 150 PSI, 80 °C, 50 L/min,
/// with jitter spreads of 10 / 8 / 6. Each generated channel is
/// `base + uniform(-0.5, 0.5) * spread`, so a spread is the full width
/// of the jitter band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Nominal pressure in PSI.
    pub base_pressure: f64,
    /// Nominal temperature in degrees Celsius.
    pub base_temperature: f64,
    /// Nominal flow in liters per minute.
    pub base_flow: f64,
    /// Full width of the pressure jitter band.
    pub pressure_spread: f64,
    /// Full width of the temperature jitter band.
    pub temperature_spread: f64,
    /// Full width of the flow jitter band.
    pub flow_spread: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            base_pressure: 150.0,
            base_temperature: 80.0,
            base_flow: 50.0,
            pressure_spread: 10.0,
            temperature_spread: 8.0,
            flow_spread: 6.0,
        }
    }
}

impl SignalConfig {
    /// The three base values in canonical channel order.
    pub fn bases(&self) -> [f64; 3] {
        [self.base_pressure, self.base_temperature, self.base_flow]
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.base_pressure <= 0.0 {
            return Err("Base pressure must be greater than 0");
        }
        if self.base_temperature <= 0.0 {
            return Err("Base temperature must be greater than 0");
        }
        if self.base_flow <= 0.0 {
            return Err("Base flow must be greater than 0");
        }
        if self.pressure_spread <= 0.0 || self.temperature_spread <= 0.0 || self.flow_spread <= 0.0
        {
            return Err("Jitter spreads must be greater than 0");
        }
        Ok(())
    }
}
