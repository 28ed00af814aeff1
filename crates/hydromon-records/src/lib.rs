//! Operational record stores for the monitoring engine.
//!
//! Three bounded stores cover what an operator console needs: a short
//! alert feed, a filterable service log, and maintenance records.
//! [`RecordBook`] owns all three and enforces the mirroring rules, so
//! the service log stays the single audit trail.

pub mod alert;
pub mod book;
pub mod maintenance;
pub mod service;

pub use alert::{ALERT_CAPACITY, Alert, AlertLog, AlertSeverity};
pub use book::RecordBook;
pub use maintenance::{
    DEFAULT_MAINTENANCE_LIMIT, MaintenanceDraft, MaintenanceFilter, MaintenanceLog,
    MaintenancePage, MaintenanceRecord, MaintenanceStatus, MaintenanceType,
};
pub use service::{
    Component, DEFAULT_LOG_LIMIT, LogDetail, LogEvent, LogFilter, LogPage, LogSeverity,
    SERVICE_LOG_CAPACITY, ServiceLog, ServiceLogEntry,
};
