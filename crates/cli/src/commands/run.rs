//! The `run` subcommand: drive the engine on a fixed interval.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use hydromon_engine::{Engine, EngineConfig};
use hydromon_types::FaultType;
use tracing::info;

use crate::output;

#[derive(Args)]
pub struct RunArgs {
    /// Number of ticks to run
    #[arg(long, default_value_t = 60)]
    pub ticks: u64,

    /// Tick period in milliseconds
    #[arg(long, default_value_t = 1_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub period_ms: u64,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for the model snapshot (omit to skip persistence)
    #[arg(long)]
    pub model_dir: Option<PathBuf>,

    /// Fault type to inject during the run
    #[arg(long)]
    pub fault: Option<FaultType>,

    /// Tick at which to inject the fault
    #[arg(long, default_value_t = 10, requires = "fault")]
    pub fault_at: u64,
}

pub async fn execute(args: &RunArgs, json: bool) -> Result<()> {
    let config = EngineConfig {
        seed: args.seed,
        model_dir: args.model_dir.clone(),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config).context("engine configuration rejected")?;

    let restored = engine.bootstrap().context("model bootstrap failed")?;
    if !json {
        if restored {
            println!("model ready (restored snapshot)");
        } else {
            println!("model ready (trained on the synthetic corpus)");
        }
    }
    engine.start();

    let mut interval = tokio::time::interval(Duration::from_millis(args.period_ms));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut completed = 0_u64;
    while completed < args.ticks {
        tokio::select! {
            _ = interval.tick() => {
                completed += 1;
                if let Some(fault_type) = args.fault {
                    if completed == args.fault_at {
                        let descriptor = engine.inject_fault(fault_type);
                        if !json {
                            println!(
                                "      injected {} ({} s ramp)",
                                descriptor.fault_type,
                                descriptor.duration_ms / 1_000
                            );
                        }
                    }
                }

                let outcome = engine.tick();
                if json {
                    output::print_tick_json(completed, &outcome)?;
                } else {
                    output::print_tick_human(completed, &outcome);
                }
            }
            result = &mut ctrl_c => {
                result.context("ctrl-c handler failed")?;
                info!(completed, "interrupted, stopping early");
                break;
            }
        }
    }

    engine.stop();
    let prediction = engine.failure_prediction();
    let status = engine.status();
    if json {
        output::print_run_summary_json(&status, &prediction)?;
    } else {
        output::print_run_summary_human(&status, &prediction);
    }
    Ok(())
}
