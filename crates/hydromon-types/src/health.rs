//! System health states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discretized system condition derived from anomaly classification.
///
/// Transitions happen only through the health classifier, and a change
/// of state is the sole trigger for alert emission. Any transition is
/// legal; there are no forbidden edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// All channels behave like the training distribution.
    #[default]
    Healthy,
    /// Mild anomaly: unusual patterns that do not yet look like a failure.
    Warning,
    /// Strong anomaly: readings consistent with an active failure mode.
    Fault,
}

impl HealthState {
    /// True only for [`HealthState::Healthy`].
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthState::Healthy)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HealthState::Healthy => "healthy",
            HealthState::Warning => "warning",
            HealthState::Fault => "fault",
        };
        f.write_str(name)
    }
}
