//! Bounded operator-facing alert feed.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alerts kept before the oldest is evicted.
pub const ALERT_CAPACITY: usize = 20;

/// Severity of an operator-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Status changes and recoveries.
    Info,
    /// Degraded but operating.
    Warning,
    /// Fault conditions needing attention.
    Error,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Error => "error",
        };
        f.write_str(name)
    }
}

/// One alert as shown to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Store-assigned identity.
    pub id: Uuid,
    /// How urgent the alert is.
    pub severity: AlertSeverity,
    /// Human-readable text.
    pub message: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

/// Fixed-capacity alert feed; the oldest alert is evicted first.
#[derive(Debug, Clone)]
pub struct AlertLog {
    entries: VecDeque<Alert>,
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertLog {
    /// Creates an empty feed.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(ALERT_CAPACITY),
        }
    }

    /// Records a new alert and returns it with its assigned id.
    pub fn push(
        &mut self,
        timestamp_ms: i64,
        severity: AlertSeverity,
        message: impl Into<String>,
    ) -> Alert {
        let alert = Alert {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            timestamp_ms,
        };
        if self.entries.len() == ALERT_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(alert.clone());
        alert
    }

    /// The newest `n` alerts in chronological order (newest last).
    pub fn recent(&self, n: usize) -> Vec<Alert> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// All buffered alerts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    /// Number of buffered alerts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no alerts are buffered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every buffered alert.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
