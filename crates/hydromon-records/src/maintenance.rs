//! Maintenance history with filtered queries.

use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Page size used when a query does not name one.
pub const DEFAULT_MAINTENANCE_LIMIT: usize = 50;

/// Why the maintenance was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    /// Scheduled ahead of any failure.
    Preventive,
    /// Repairing an observed defect.
    Corrective,
    /// Unplanned response to a failure.
    Emergency,
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaintenanceType::Preventive => "preventive",
            MaintenanceType::Corrective => "corrective",
            MaintenanceType::Emergency => "emergency",
        };
        f.write_str(name)
    }
}

/// Where the work stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Completed,
    InProgress,
    Scheduled,
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Scheduled => "scheduled",
        };
        f.write_str(name)
    }
}

/// One filed maintenance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Store-assigned (or caller-chosen) identity.
    pub id: Uuid,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Why the work happened.
    pub maintenance_type: MaintenanceType,
    /// Free-form name of the serviced part.
    pub component: String,
    /// What was done.
    pub description: String,
    /// Who did it.
    pub technician: String,
    /// How long it took.
    pub duration_minutes: u32,
    /// Where the work stands.
    pub status: MaintenanceStatus,
    /// Cost, when tracked.
    pub cost: Option<f64>,
}

/// A record as submitted, before the store assigns identity and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceDraft {
    /// Caller-chosen id; generated when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Why the work happened.
    pub maintenance_type: MaintenanceType,
    /// Free-form name of the serviced part.
    pub component: String,
    /// What was done.
    pub description: String,
    /// Who did it.
    pub technician: String,
    /// How long it took.
    pub duration_minutes: u32,
    /// Where the work stands.
    pub status: MaintenanceStatus,
    /// Cost, when tracked.
    #[serde(default)]
    pub cost: Option<f64>,
}

/// Filter and pagination for [`MaintenanceLog::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceFilter {
    /// Keep only this maintenance type.
    pub maintenance_type: Option<MaintenanceType>,
    /// Keep only records for this component name.
    pub component: Option<String>,
    /// Keep only this status.
    pub status: Option<MaintenanceStatus>,
    /// Page size; [`DEFAULT_MAINTENANCE_LIMIT`] when `None`.
    pub limit: Option<usize>,
    /// Records skipped from the newest end.
    pub offset: usize,
}

impl MaintenanceFilter {
    fn accepts(&self, record: &MaintenanceRecord) -> bool {
        self.maintenance_type
            .is_none_or(|kind| record.maintenance_type == kind)
            && self.status.is_none_or(|status| record.status == status)
            && self
                .component
                .as_deref()
                .is_none_or(|component| record.component == component)
    }
}

/// One page of a filtered query, newest records first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenancePage {
    /// The page itself.
    pub records: Vec<MaintenanceRecord>,
    /// Matching records before pagination.
    pub total: usize,
    /// Page size that was applied.
    pub limit: usize,
    /// Offset that was applied.
    pub offset: usize,
}

/// Append-only maintenance history.
#[derive(Debug, Clone, Default)]
pub struct MaintenanceLog {
    records: Vec<MaintenanceRecord>,
}

impl MaintenanceLog {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a draft, generating an id when the draft carries none.
    pub fn create(&mut self, timestamp_ms: i64, draft: MaintenanceDraft) -> MaintenanceRecord {
        let record = MaintenanceRecord {
            id: draft.id.unwrap_or_else(Uuid::new_v4),
            timestamp_ms,
            maintenance_type: draft.maintenance_type,
            component: draft.component,
            description: draft.description,
            technician: draft.technician,
            duration_minutes: draft.duration_minutes,
            status: draft.status,
            cost: draft.cost,
        };
        self.records.push(record.clone());
        record
    }

    /// Runs `filter` over the history, newest records first.
    pub fn query(&self, filter: &MaintenanceFilter) -> MaintenancePage {
        let limit = filter.limit.unwrap_or(DEFAULT_MAINTENANCE_LIMIT);
        let mut matches: Vec<&MaintenanceRecord> = self
            .records
            .iter()
            .filter(|record| filter.accepts(record))
            .collect();
        matches.sort_by_key(|record| Reverse(record.timestamp_ms));

        let total = matches.len();
        let records = matches
            .into_iter()
            .skip(filter.offset)
            .take(limit)
            .cloned()
            .collect();
        MaintenancePage {
            records,
            total,
            limit,
            offset: filter.offset,
        }
    }

    /// All records in filing order.
    pub fn iter(&self) -> impl Iterator<Item = &MaintenanceRecord> {
        self.records.iter()
    }

    /// Number of filed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been filed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
