//! Baseline sample generation.

use hydromon_types::SensorSample;
use rand::Rng;

use crate::config::SignalConfig;

/// Produces baseline samples with bounded uniform jitter.
///
/// Each channel is `base + uniform(-0.5, 0.5) * spread`, floored at
/// zero. The generator holds no mutable state; randomness and time come
/// in through the call, so a seeded RNG makes the stream reproducible.
#[derive(Debug, Clone, Default)]
pub struct SignalGenerator {
    config: SignalConfig,
}

impl SignalGenerator {
    /// Creates a generator for the given operating point.
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// The configured operating point.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Generates one sample stamped with `now_ms`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, now_ms: i64) -> SensorSample {
        let pressure = self.config.base_pressure + centered(rng) * self.config.pressure_spread;
        let temperature =
            self.config.base_temperature + centered(rng) * self.config.temperature_spread;
        let flow = self.config.base_flow + centered(rng) * self.config.flow_spread;
        SensorSample::new(pressure, temperature, flow, now_ms)
    }
}

/// Uniform draw in (-0.5, 0.5).
fn centered<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.r#gen::<f64>() - 0.5
}
