//! Seeded synthetic training corpus for bootstrap fits.
//!
//! When no recorded history is available the detector trains on a
//! generated corpus: 80% of rows drawn from the normal-operation
//! distributions per channel, 20% from four fault-shaped distributions
//! (low pressure, high temperature, low flow, or all three at once).
//! The anomalous rows are shuffled through the sequence so rolling
//! statistics see them in realistic surroundings.

use hydromon_types::SensorSample;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::ModelError;

/// Rows in the default bootstrap corpus.
pub const DEFAULT_CORPUS_SIZE: usize = 1_000;

/// Seed for the dedicated corpus RNG.
pub const DEFAULT_CORPUS_SEED: u64 = 42;

/// Spacing between consecutive corpus timestamps.
const TIMESTAMP_STEP_MS: i64 = 1_000;

/// Generates `size` samples, deterministic for a given seed.
///
/// # Errors
///
/// Returns [`ModelError::Distribution`] if a channel distribution cannot
/// be constructed.
pub fn synthetic_corpus(size: usize, seed: u64) -> Result<Vec<SensorSample>, ModelError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let pressure = Normal::new(150.0, 5.0)?;
    let temperature = Normal::new(80.0, 4.0)?;
    let flow = Normal::new(50.0, 3.0)?;

    // 80% normal / 20% fault-shaped.
    let normal_rows = size.saturating_mul(4) / 5;
    let mut is_normal: Vec<bool> = (0..size).map(|row| row < normal_rows).collect();
    is_normal.shuffle(&mut rng);

    let mut samples = Vec::with_capacity(size);
    for (row, normal) in is_normal.iter().enumerate() {
        let timestamp_ms = row as i64 * TIMESTAMP_STEP_MS;
        let sample = if *normal {
            SensorSample::new(
                pressure.sample(&mut rng),
                temperature.sample(&mut rng),
                flow.sample(&mut rng),
                timestamp_ms,
            )
        } else {
            match rng.gen_range(0..4) {
                0 => SensorSample::new(
                    rng.gen_range(80.0..120.0),
                    temperature.sample(&mut rng),
                    flow.sample(&mut rng),
                    timestamp_ms,
                ),
                1 => SensorSample::new(
                    pressure.sample(&mut rng),
                    rng.gen_range(100.0..130.0),
                    flow.sample(&mut rng),
                    timestamp_ms,
                ),
                2 => SensorSample::new(
                    pressure.sample(&mut rng),
                    temperature.sample(&mut rng),
                    rng.gen_range(20.0..35.0),
                    timestamp_ms,
                ),
                _ => SensorSample::new(
                    rng.gen_range(90.0..130.0),
                    rng.gen_range(90.0..110.0),
                    rng.gen_range(30.0..40.0),
                    timestamp_ms,
                ),
            }
        };
        samples.push(sample);
    }

    Ok(samples)
}
