//! Current-state tracking and transition reporting.

use hydromon_types::HealthState;
use serde::{Deserialize, Serialize};

/// A health-state change. Alerts fire exactly on these, never on
/// repeated observations of the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTransition {
    /// State before the change.
    pub from: HealthState,
    /// State after the change.
    pub to: HealthState,
}

impl HealthTransition {
    /// Canonical phrase for the state being entered.
    ///
    /// Collaborators may append detail (for example the triggering
    /// readings) but these phrases themselves are fixed.
    pub fn message(&self) -> &'static str {
        match self.to {
            HealthState::Fault => "fault detected",
            HealthState::Warning => "anomaly detected",
            HealthState::Healthy => "returned to normal",
        }
    }
}

/// Remembers the current health state between observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthTracker {
    state: HealthState,
}

impl HealthTracker {
    /// Starts tracking from an explicit initial state.
    pub fn new(initial: HealthState) -> Self {
        Self { state: initial }
    }

    /// The most recently observed state.
    pub fn state(&self) -> HealthState {
        self.state
    }

    /// Records an observation; `Some` only when the state changed.
    pub fn observe(&mut self, next: HealthState) -> Option<HealthTransition> {
        if next == self.state {
            return None;
        }
        let transition = HealthTransition {
            from: self.state,
            to: next,
        };
        self.state = next;
        Some(transition)
    }

    /// Resets the tracker to healthy without reporting a transition.
    pub fn reset(&mut self) {
        self.state = HealthState::Healthy;
    }
}
