//! The combined record stores and their mirroring rules.

use crate::alert::{Alert, AlertLog, AlertSeverity};
use crate::maintenance::{MaintenanceDraft, MaintenanceLog, MaintenanceRecord};
use crate::service::{Component, LogDetail, LogEvent, LogSeverity, ServiceLog};

impl From<AlertSeverity> for LogSeverity {
    fn from(severity: AlertSeverity) -> Self {
        match severity {
            AlertSeverity::Info => LogSeverity::Info,
            AlertSeverity::Warning => LogSeverity::Warning,
            AlertSeverity::Error => LogSeverity::Error,
        }
    }
}

/// The three record stores plus the rules that tie them together.
///
/// Every alert leaves an `Alert generated` trace in the service log and
/// every maintenance record a `Maintenance record created` one, so the
/// service log stays the single audit trail even after the short alert
/// feed has evicted or cleared its entries.
#[derive(Debug, Clone, Default)]
pub struct RecordBook {
    alerts: AlertLog,
    service: ServiceLog,
    maintenance: MaintenanceLog,
}

impl RecordBook {
    /// Creates empty stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises an alert and mirrors it into the service log.
    pub fn raise_alert(
        &mut self,
        timestamp_ms: i64,
        severity: AlertSeverity,
        message: impl Into<String>,
    ) -> Alert {
        let alert = self.alerts.push(timestamp_ms, severity, message);
        self.service.record(
            timestamp_ms,
            LogEvent::System,
            severity.into(),
            Component::HydraulicSystem,
            format!("Alert generated: {}", alert.message),
            Some(LogDetail::AlertRef { alert_id: alert.id }),
        );
        alert
    }

    /// Appends a plain service-log entry.
    pub fn log(
        &mut self,
        timestamp_ms: i64,
        event: LogEvent,
        severity: LogSeverity,
        component: Component,
        message: impl Into<String>,
        details: Option<LogDetail>,
    ) {
        self.service
            .record(timestamp_ms, event, severity, component, message, details);
    }

    /// Files a maintenance record and mirrors it into the service log.
    pub fn create_maintenance(
        &mut self,
        timestamp_ms: i64,
        draft: MaintenanceDraft,
    ) -> MaintenanceRecord {
        let record = self.maintenance.create(timestamp_ms, draft);
        self.service.record(
            timestamp_ms,
            LogEvent::Maintenance,
            LogSeverity::Info,
            Component::HydraulicSystem,
            format!(
                "Maintenance record created: {} - {}",
                record.maintenance_type, record.description
            ),
            Some(LogDetail::MaintenanceRef {
                maintenance_id: record.id,
                technician: record.technician.clone(),
            }),
        );
        record
    }

    /// Empties the alert feed; the service log keeps its audit trail.
    pub fn clear_alerts(&mut self) {
        self.alerts.clear();
    }

    /// The alert feed.
    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    /// The service log.
    pub fn service(&self) -> &ServiceLog {
        &self.service
    }

    /// The maintenance history.
    pub fn maintenance(&self) -> &MaintenanceLog {
        &self.maintenance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maintenance::{MaintenanceStatus, MaintenanceType};
    use crate::service::LogFilter;

    #[test]
    fn alerts_leave_a_service_log_trace() {
        let mut book = RecordBook::new();
        let alert = book.raise_alert(5_000, AlertSeverity::Warning, "anomaly detected");

        let page = book.service().query(&LogFilter::default());
        assert_eq!(page.total, 1);
        let entry = page.entries.into_iter().next();
        assert_eq!(
            entry.as_ref().map(|e| e.message.clone()),
            Some("Alert generated: anomaly detected".to_owned())
        );
        assert_eq!(entry.as_ref().map(|e| e.severity), Some(LogSeverity::Warning));
        assert_eq!(entry.as_ref().map(|e| e.event), Some(LogEvent::System));
        assert_eq!(
            entry.and_then(|e| e.details),
            Some(LogDetail::AlertRef { alert_id: alert.id })
        );
    }

    #[test]
    fn alert_severities_map_one_to_one() {
        assert_eq!(LogSeverity::from(AlertSeverity::Info), LogSeverity::Info);
        assert_eq!(
            LogSeverity::from(AlertSeverity::Warning),
            LogSeverity::Warning
        );
        assert_eq!(LogSeverity::from(AlertSeverity::Error), LogSeverity::Error);
    }

    #[test]
    fn maintenance_records_mirror_into_the_service_log() {
        let mut book = RecordBook::new();
        let record = book.create_maintenance(
            8_000,
            MaintenanceDraft {
                id: None,
                maintenance_type: MaintenanceType::Corrective,
                component: "relief valve".to_owned(),
                description: "replaced worn spring".to_owned(),
                technician: "A. Koivisto".to_owned(),
                duration_minutes: 90,
                status: MaintenanceStatus::Completed,
                cost: None,
            },
        );

        let page = book.service().query(&LogFilter {
            event: Some(LogEvent::Maintenance),
            ..LogFilter::default()
        });
        assert_eq!(page.total, 1);
        let entry = page.entries.into_iter().next();
        assert_eq!(
            entry.as_ref().map(|e| e.message.clone()),
            Some("Maintenance record created: corrective - replaced worn spring".to_owned())
        );
        assert_eq!(
            entry.and_then(|e| e.details),
            Some(LogDetail::MaintenanceRef {
                maintenance_id: record.id,
                technician: record.technician.clone(),
            })
        );
        assert_eq!(book.maintenance().len(), 1);
    }

    #[test]
    fn clearing_alerts_keeps_the_audit_trail() {
        let mut book = RecordBook::new();
        book.raise_alert(1_000, AlertSeverity::Info, "simulation started");
        book.raise_alert(2_000, AlertSeverity::Error, "fault detected");
        book.clear_alerts();

        assert!(book.alerts().is_empty());
        assert_eq!(book.service().len(), 2);
    }
}
