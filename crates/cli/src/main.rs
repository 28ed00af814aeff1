//! hydroctl - HydroMon control CLI
//!
//! Command-line driver for the hydraulic predictive-maintenance engine:
//! run the simulation loop, train the anomaly model, and inspect the
//! injectable fault types.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{faults, run, train};

#[derive(Parser)]
#[command(name = "hydroctl")]
#[command(about = "HydroMon control CLI - drive, train, and inspect the monitoring engine")]
#[command(version)]
#[command(long_about = "
hydroctl drives the HydroMon predictive-maintenance engine from the
command line: run the closed simulation loop with optional fault
injection, train the anomaly model and persist its snapshot, and list
the fault signatures available for injection.

Use the --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(long, global = true, help = "Output in JSON format for machine parsing")]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the engine on a fixed tick interval
    Run(run::RunArgs),

    /// Train the anomaly model and save its snapshot
    Train(train::TrainArgs),

    /// List the fault types available for injection
    Faults,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "hydroctl={log_level},hydromon_engine={log_level},hydromon_model={log_level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match &cli.command {
        Commands::Run(args) => run::execute(args, cli.json).await,
        Commands::Train(args) => train::execute(args, cli.json),
        Commands::Faults => faults::execute(cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydromon_types::FaultType;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_faults_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["hydroctl", "faults"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Faults));
        Ok(())
    }

    #[test]
    fn parse_global_json_flag_before_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["hydroctl", "--json", "faults"])?;
        assert!(cli.json);
        Ok(())
    }

    #[test]
    fn parse_global_json_flag_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["hydroctl", "run", "--json"])?;
        assert!(cli.json);
        Ok(())
    }

    #[test]
    fn parse_verbose_levels() -> TestResult {
        let cli0 = Cli::try_parse_from(["hydroctl", "faults"])?;
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["hydroctl", "-vv", "faults"])?;
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["hydroctl", "-vvv", "faults"])?;
        assert_eq!(cli3.verbose, 3);
        Ok(())
    }

    // --- Run command parsing ---

    #[test]
    fn parse_run_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["hydroctl", "run"])?;
        match &cli.command {
            Commands::Run(args) => {
                assert_eq!(args.ticks, 60);
                assert_eq!(args.period_ms, 1_000);
                assert!(args.seed.is_none());
                assert!(args.model_dir.is_none());
                assert!(args.fault.is_none());
                assert_eq!(args.fault_at, 10);
            }
            _ => return Err("expected Run command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_run_with_fault_schedule() -> TestResult {
        let cli = Cli::try_parse_from([
            "hydroctl",
            "run",
            "--ticks",
            "120",
            "--period-ms",
            "250",
            "--seed",
            "7",
            "--fault",
            "pressure_drop",
            "--fault-at",
            "25",
        ])?;
        match &cli.command {
            Commands::Run(args) => {
                assert_eq!(args.ticks, 120);
                assert_eq!(args.period_ms, 250);
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.fault, Some(FaultType::PressureDrop));
                assert_eq!(args.fault_at, 25);
            }
            _ => return Err("expected Run command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_run_with_model_dir() -> TestResult {
        let cli = Cli::try_parse_from(["hydroctl", "run", "--model-dir", "/var/lib/hydromon"])?;
        match &cli.command {
            Commands::Run(args) => {
                assert_eq!(
                    args.model_dir.as_deref(),
                    Some(std::path::Path::new("/var/lib/hydromon"))
                );
            }
            _ => return Err("expected Run command".into()),
        }
        Ok(())
    }

    // --- Train command parsing ---

    #[test]
    fn parse_train_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["hydroctl", "train"])?;
        match &cli.command {
            Commands::Train(args) => {
                assert_eq!(args.model_dir, std::path::PathBuf::from("models"));
                assert!(args.seed.is_none());
            }
            _ => return Err("expected Train command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_train_custom_model_dir() -> TestResult {
        let cli = Cli::try_parse_from(["hydroctl", "train", "--model-dir", "/tmp/m"])?;
        match &cli.command {
            Commands::Train(args) => {
                assert_eq!(args.model_dir, std::path::PathBuf::from("/tmp/m"));
            }
            _ => return Err("expected Train command".into()),
        }
        Ok(())
    }

    // --- Rejection / error cases ---

    #[test]
    fn reject_no_subcommand() {
        let result = Cli::try_parse_from(["hydroctl"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_unknown_subcommand() {
        let result = Cli::try_parse_from(["hydroctl", "nonexistent"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_invalid_fault_name() {
        let result = Cli::try_parse_from(["hydroctl", "run", "--fault", "valve_stuck"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_fault_tick_without_a_fault() {
        let result = Cli::try_parse_from(["hydroctl", "run", "--fault-at", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_zero_period() {
        let result = Cli::try_parse_from(["hydroctl", "run", "--period-ms", "0"]);
        assert!(result.is_err());
    }
}
