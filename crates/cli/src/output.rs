//! Output formatting for CLI responses

use std::path::Path;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use hydromon_engine::{EngineStatus, TickOutcome};
use hydromon_model::{TrainingReport, TrainingSource};
use hydromon_records::AlertSeverity;
use hydromon_types::{FailurePrediction, HealthState};
use serde::Serialize;
use serde_json::json;

/// One tick as a JSON line.
#[derive(Serialize)]
struct TickLine<'a> {
    tick: u64,
    #[serde(flatten)]
    outcome: &'a TickOutcome,
}

/// Print one tick as a compact JSON object on its own line.
pub fn print_tick_json(tick: u64, outcome: &TickOutcome) -> Result<()> {
    println!("{}", serde_json::to_string(&TickLine { tick, outcome })?);
    Ok(())
}

/// Print one tick as a human-readable line.
pub fn print_tick_human(tick: u64, outcome: &TickOutcome) {
    let sample = &outcome.sample;
    println!(
        "tick {tick:>5}  {} {:<7}  {:6.1} PSI  {:5.1} °C  {:5.1} L/min",
        health_marker(outcome.health),
        outcome.health,
        sample.pressure,
        sample.temperature,
        sample.flow
    );
    if let Some(change) = &outcome.transition {
        println!("      health changed: {} -> {}", change.from, change.to);
    }
    if let Some(fault) = &outcome.cleared_fault {
        println!("      fault cleared: {}", fault.fault_type);
    }
}

/// Print the end-of-run summary as pretty JSON.
pub fn print_run_summary_json(
    status: &EngineStatus,
    prediction: &FailurePrediction,
) -> Result<()> {
    let output = json!({
        "status": status,
        "prediction": prediction,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the end-of-run summary in human-readable form.
pub fn print_run_summary_human(status: &EngineStatus, prediction: &FailurePrediction) {
    println!();
    println!(
        "final health: {} {}",
        health_marker(status.health),
        status.health
    );
    if let Some(sample) = &status.current_sample {
        println!(
            "last reading: {:.1} PSI / {:.1} °C / {:.1} L/min",
            sample.pressure, sample.temperature, sample.flow
        );
    }
    match prediction.days_to_failure {
        Some(days) => println!(
            "failure estimate: {} risk, ~{days} days ({:.0}% confidence)",
            prediction.risk_level,
            prediction.confidence * 100.0
        ),
        None => println!("failure estimate: {} risk", prediction.risk_level),
    }
    println!("trend: {}", prediction.trend_analysis);
    if !status.alerts.is_empty() {
        println!("recent alerts:");
        for alert in &status.alerts {
            println!("  [{}] {}", severity_label(alert.severity), alert.message);
        }
    }
}

/// Print the training summary as pretty JSON.
pub fn print_training_report_json(report: &TrainingReport, snapshot_path: &Path) -> Result<()> {
    let output = json!({
        "report": report,
        "snapshot": snapshot_path,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the training summary in human-readable form.
pub fn print_training_report_human(report: &TrainingReport, snapshot_path: &Path) {
    let source = match report.source {
        TrainingSource::Synthetic => "synthetic corpus",
        TrainingSource::Provided => "provided history",
    };
    println!("trained on {} rows from the {source}", report.rows);
    println!(
        "flagged {} rows anomalous at offset {:.4}",
        report.flagged, report.offset
    );
    println!("trained at {}", report.trained_at);
    println!("snapshot saved to {}", snapshot_path.display());
}

fn health_marker(health: HealthState) -> ColoredString {
    match health {
        HealthState::Healthy => "●".green(),
        HealthState::Warning => "●".yellow(),
        HealthState::Fault => "●".red(),
    }
}

fn severity_label(severity: AlertSeverity) -> ColoredString {
    match severity {
        AlertSeverity::Info => "info".normal(),
        AlertSeverity::Warning => "warning".yellow(),
        AlertSeverity::Error => "error".red(),
    }
}
