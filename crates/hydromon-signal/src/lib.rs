//! Synthetic hydraulic signal generation and fault-signature injection.
//!
//! This crate is the head of the tick pipeline. The [`SignalGenerator`]
//! produces baseline samples with bounded jitter around the configured
//! operating point; the [`FaultInjector`] optionally reshapes each sample
//! with the signature of the active fault, ramping its intensity from 0
//! to 1 over the fault duration.
//!
//! ```text
//!            +-----------------+     +---------------+
//!   rng ---> | SignalGenerator | --> | FaultInjector | --> sample
//!   clock -> |  (base+jitter)  |     | (idle|active) |
//!            +-----------------+     +---------------+
//! ```
//!
//! Both components take the RNG and the current time as explicit
//! parameters, so drivers and tests control determinism end to end.

pub mod config;
pub mod generator;
pub mod injector;

pub use config::SignalConfig;
pub use generator::SignalGenerator;
pub use injector::{DEFAULT_FAULT_DURATION_MS, FaultInjector, apply_signature};
