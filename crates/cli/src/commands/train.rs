//! The `train` subcommand: fit the anomaly model and save its snapshot.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hydromon_engine::{Engine, EngineConfig, MODEL_FILE_NAME};

use crate::output;

#[derive(Args)]
pub struct TrainArgs {
    /// Directory the snapshot is written to
    #[arg(long, default_value = "models")]
    pub model_dir: PathBuf,

    /// RNG seed for a reproducible fit
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: &TrainArgs, json: bool) -> Result<()> {
    let config = EngineConfig {
        seed: args.seed,
        model_dir: Some(args.model_dir.clone()),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config).context("engine configuration rejected")?;

    let report = engine
        .train(None)
        .context("training on the synthetic corpus failed")?;

    let snapshot_path = args.model_dir.join(MODEL_FILE_NAME);
    if json {
        output::print_training_report_json(&report, &snapshot_path)?;
    } else {
        output::print_training_report_human(&report, &snapshot_path);
    }
    Ok(())
}
