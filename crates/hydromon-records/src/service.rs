//! Filterable, bounded service log.
//!
//! The log is the audit trail every other store mirrors into. Entries
//! are classified three ways (event, severity, component) so queries
//! can slice the history without string matching, and structured
//! payloads ride along as a tagged [`LogDetail`].

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::fmt;

use hydromon_types::FaultType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entries kept before the oldest is evicted.
pub const SERVICE_LOG_CAPACITY: usize = 1000;

/// Page size used when a query does not name one.
pub const DEFAULT_LOG_LIMIT: usize = 100;

/// What kind of event produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEvent {
    /// Lifecycle and state changes of the engine itself.
    System,
    /// Maintenance records being filed.
    Maintenance,
    /// Fault injections and clearances.
    Fault,
    /// Model training and scoring.
    Ml,
    /// Operator-initiated actions.
    UserAction,
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogEvent::System => "system",
            LogEvent::Maintenance => "maintenance",
            LogEvent::Fault => "fault",
            LogEvent::Ml => "ml",
            LogEvent::UserAction => "user_action",
        };
        f.write_str(name)
    }
}

/// How serious a logged condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogSeverity::Info => "info",
            LogSeverity::Warning => "warning",
            LogSeverity::Error => "error",
            LogSeverity::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Which subsystem an entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    HydraulicSystem,
    MlModel,
    Simulation,
    UserInterface,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::HydraulicSystem => "hydraulic_system",
            Component::MlModel => "ml_model",
            Component::Simulation => "simulation",
            Component::UserInterface => "user_interface",
        };
        f.write_str(name)
    }
}

/// Structured payload attached to some entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogDetail {
    /// Mirror of an alert, by id.
    AlertRef { alert_id: Uuid },
    /// Parameters of an injected fault.
    FaultInfo { fault_type: FaultType, duration_ms: u64 },
    /// Row count of a completed training run.
    TrainingInfo { rows: usize },
    /// Mirror of a filed maintenance record.
    MaintenanceRef { maintenance_id: Uuid, technician: String },
}

/// One service-log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLogEntry {
    /// Store-assigned identity.
    pub id: Uuid,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// What happened.
    pub event: LogEvent,
    /// How serious it was.
    pub severity: LogSeverity,
    /// Where it happened.
    pub component: Component,
    /// Human-readable text.
    pub message: String,
    /// Optional structured payload.
    pub details: Option<LogDetail>,
}

/// Filter and pagination for [`ServiceLog::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Keep only this event kind.
    pub event: Option<LogEvent>,
    /// Keep only this severity.
    pub severity: Option<LogSeverity>,
    /// Keep only this component.
    pub component: Option<Component>,
    /// Page size; [`DEFAULT_LOG_LIMIT`] when `None`.
    pub limit: Option<usize>,
    /// Entries skipped from the newest end.
    pub offset: usize,
}

impl LogFilter {
    fn accepts(&self, entry: &ServiceLogEntry) -> bool {
        self.event.is_none_or(|event| entry.event == event)
            && self.severity.is_none_or(|severity| entry.severity == severity)
            && self
                .component
                .is_none_or(|component| entry.component == component)
    }
}

/// One page of a filtered query, newest entries first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogPage {
    /// The page itself.
    pub entries: Vec<ServiceLogEntry>,
    /// Matching entries before pagination.
    pub total: usize,
    /// Page size that was applied.
    pub limit: usize,
    /// Offset that was applied.
    pub offset: usize,
}

/// Fixed-capacity service log with filtered, newest-first queries.
#[derive(Debug, Clone)]
pub struct ServiceLog {
    entries: VecDeque<ServiceLogEntry>,
}

impl Default for ServiceLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Appends an entry, evicting the oldest past capacity, and returns
    /// the assigned id.
    pub fn record(
        &mut self,
        timestamp_ms: i64,
        event: LogEvent,
        severity: LogSeverity,
        component: Component,
        message: impl Into<String>,
        details: Option<LogDetail>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        if self.entries.len() == SERVICE_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(ServiceLogEntry {
            id,
            timestamp_ms,
            event,
            severity,
            component,
            message: message.into(),
            details,
        });
        id
    }

    /// Runs `filter` over the log. `total` counts every match; the page
    /// is cut after sorting newest-first (ties keep insertion order).
    pub fn query(&self, filter: &LogFilter) -> LogPage {
        let limit = filter.limit.unwrap_or(DEFAULT_LOG_LIMIT);
        let mut matches: Vec<&ServiceLogEntry> = self
            .entries
            .iter()
            .filter(|entry| filter.accepts(entry))
            .collect();
        matches.sort_by_key(|entry| Reverse(entry.timestamp_ms));

        let total = matches.len();
        let entries = matches
            .into_iter()
            .skip(filter.offset)
            .take(limit)
            .cloned()
            .collect();
        LogPage {
            entries,
            total,
            limit,
            offset: filter.offset,
        }
    }

    /// All buffered entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceLogEntry> {
        self.entries.iter()
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
