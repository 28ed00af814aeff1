//! Injected time source.
//!
//! The engine never reads the system clock directly; everything
//! time-dependent (sample timestamps, fault ramps, record stamps) goes
//! through a [`Clock`], so tests can drive the engine with a stepped
//! clock and replay exact fault timelines.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Supplies the current time in milliseconds since the Unix epoch.
pub trait Clock {
    /// The current time.
    fn now_ms(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock for tests and deterministic replays.
///
/// Reading the time never advances it; callers step it explicitly, so
/// a shared handle (`Arc<StepClock>`) lets a test move time forward
/// while the engine holds the same clock.
#[derive(Debug)]
pub struct StepClock {
    now_ms: AtomicI64,
    step_ms: i64,
}

impl StepClock {
    /// Creates a clock reading `start_ms` that advances by `step_ms`.
    pub fn new(start_ms: i64, step_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(start_ms),
            step_ms,
        }
    }

    /// Advances by the configured step and returns the new time.
    pub fn advance(&self) -> i64 {
        self.now_ms.fetch_add(self.step_ms, Ordering::Relaxed) + self.step_ms
    }

    /// Jumps straight to `now_ms`.
    pub fn set_ms(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::Relaxed);
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}
