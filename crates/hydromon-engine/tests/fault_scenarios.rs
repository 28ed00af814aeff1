//! Fault injection scenarios on a stepped clock.
//!
//! Coverage areas:
//! 1. Injection bookkeeping — alert, service-log entry, active descriptor.
//! 2. Ramp shape — a fresh injection leaves the first sample nominal, the
//!    full pressure-drop ramp is classified as a fault, and the expiry
//!    tick hands the cleared descriptor back.
//! 3. Recovery — health returns to normal after clearance and the
//!    transition alerts land in the feed.
//! 4. Re-injection — a second fault overwrites the first and restarts
//!    the ramp.
//! 5. Status snapshots — the alert view keeps only the five newest.

use std::sync::Arc;

use hydromon_engine::{Engine, EngineConfig, StepClock};
use hydromon_records::{AlertSeverity, LogDetail, LogEvent, LogFilter};
use hydromon_types::{FaultType, HealthState};

const START_MS: i64 = 1_700_000_000_000;
const STEP_MS: i64 = 1_000;

fn seeded_default()
-> Result<(Engine<Arc<StepClock>>, Arc<StepClock>), Box<dyn std::error::Error>> {
    let clock = Arc::new(StepClock::new(START_MS, STEP_MS));
    let engine = Engine::with_clock(
        EngineConfig {
            seed: Some(42),
            ..EngineConfig::default()
        },
        Arc::clone(&clock),
    )?;
    Ok((engine, clock))
}

fn warm_up(engine: &mut Engine<Arc<StepClock>>, clock: &StepClock, ticks: usize) {
    for _ in 0..ticks {
        engine.tick();
        clock.advance();
    }
}

#[test]
fn injection_is_announced_and_recorded() -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, _clock) = seeded_default()?;

    let descriptor = engine.inject_fault(FaultType::PressureDrop);
    assert_eq!(descriptor.fault_type, FaultType::PressureDrop);
    assert_eq!(descriptor.started_at_ms, START_MS);
    assert_eq!(descriptor.duration_ms, 15_000);
    assert_eq!(engine.active_fault(), Some(&descriptor));

    let alert = engine
        .records()
        .alerts()
        .recent(1)
        .into_iter()
        .next()
        .ok_or("injection must raise an alert")?;
    assert_eq!(alert.severity, AlertSeverity::Warning);
    assert_eq!(
        alert.message,
        "Injecting pressure drop fault - simulating leak"
    );

    let page = engine.records().service().query(&LogFilter {
        event: Some(LogEvent::Fault),
        ..LogFilter::default()
    });
    assert_eq!(page.total, 1);
    let entry = page.entries.into_iter().next();
    assert_eq!(
        entry.as_ref().map(|e| e.message.clone()),
        Some("Fault injected: pressure_drop".to_owned())
    );
    assert_eq!(
        entry.and_then(|e| e.details),
        Some(LogDetail::FaultInfo {
            fault_type: FaultType::PressureDrop,
            duration_ms: 15_000,
        })
    );
    Ok(())
}

#[test]
fn fresh_injection_leaves_the_first_sample_nominal() -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, clock) = seeded_default()?;
    warm_up(&mut engine, &clock, 5);

    // Injected at the current instant, so the very next tick sees the
    // ramp at intensity zero.
    engine.inject_fault(FaultType::PressureDrop);
    let outcome = engine.tick();

    assert!(
        (145.0..=155.0).contains(&outcome.sample.pressure),
        "pressure {} shaped before the ramp started",
        outcome.sample.pressure
    );
    assert_eq!(outcome.cleared_fault, None);
    assert!(engine.active_fault().is_some());
    Ok(())
}

#[test]
fn pressure_drop_ramp_faults_then_recovers() -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, clock) = seeded_default()?;
    warm_up(&mut engine, &clock, 30);

    engine.inject_fault(FaultType::PressureDrop);
    let mut saw_fault = false;
    let mut cleared = None;
    for _ in 0..=15 {
        let outcome = engine.tick();
        assert!(!outcome.used_fallback, "model path must stay available");
        saw_fault = saw_fault || outcome.health == HealthState::Fault;
        if outcome.cleared_fault.is_some() {
            cleared = outcome.cleared_fault;
            break;
        }
        clock.advance();
    }

    assert!(saw_fault, "the full ramp never classified as a fault");
    let descriptor = cleared.ok_or("the ramp never expired")?;
    assert_eq!(descriptor.fault_type, FaultType::PressureDrop);
    assert_eq!(engine.active_fault(), None);

    // With the signature gone the rolling window flushes and health
    // settles back to normal.
    let mut recovered = false;
    for _ in 0..20 {
        clock.advance();
        let outcome = engine.tick();
        recovered = recovered || outcome.health == HealthState::Healthy;
    }
    assert!(recovered, "health never returned to normal after clearance");

    let messages: Vec<String> = engine
        .records()
        .alerts()
        .iter()
        .map(|alert| alert.message.clone())
        .collect();
    assert!(
        messages
            .iter()
            .any(|message| message.starts_with("fault detected - pressure:")),
        "missing fault transition alert in {messages:?}"
    );
    assert!(
        messages
            .iter()
            .any(|message| message == "Fault condition cleared - returning to normal operation"),
        "missing clearance alert in {messages:?}"
    );
    assert!(
        messages
            .iter()
            .any(|message| message == "returned to normal operation"),
        "missing recovery alert in {messages:?}"
    );
    Ok(())
}

#[test]
fn flow_disruption_leaves_the_other_channels_nominal() -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, clock) = seeded_default()?;
    warm_up(&mut engine, &clock, 5);

    engine.inject_fault(FaultType::FlowDisruption);
    for _ in 0..10 {
        clock.advance();
        let outcome = engine.tick();
        assert!(
            (145.0..=155.0).contains(&outcome.sample.pressure),
            "flow disruption shaped pressure to {}",
            outcome.sample.pressure
        );
        assert!(
            (76.0..=84.0).contains(&outcome.sample.temperature),
            "flow disruption shaped temperature to {}",
            outcome.sample.temperature
        );
    }
    Ok(())
}

#[test]
fn reinjection_overwrites_and_restarts_the_ramp() -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, clock) = seeded_default()?;

    let first = engine.inject_fault(FaultType::TemperatureSpike);
    warm_up(&mut engine, &clock, 5);

    let second = engine.inject_fault(FaultType::FlowDisruption);
    assert_eq!(
        engine.active_fault().map(|fault| fault.fault_type),
        Some(FaultType::FlowDisruption)
    );
    assert_eq!(second.started_at_ms, first.started_at_ms + 5 * STEP_MS);
    Ok(())
}

#[test]
fn status_keeps_only_the_five_newest_alerts() -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, _clock) = seeded_default()?;

    engine.start();
    for fault_type in FaultType::ALL {
        engine.inject_fault(fault_type);
    }
    engine.stop();

    let status = engine.status();
    assert!(!status.is_running);
    assert_eq!(status.alerts.len(), 5);
    assert_eq!(
        status.alerts.last().map(|alert| alert.message.clone()),
        Some("Hydraulic simulation stopped".to_owned())
    );
    // The full feed still holds everything.
    assert_eq!(engine.records().alerts().len(), 6);
    Ok(())
}
