//! Visualize the latest offline tracking-log run.
//!
//! Usage: `visualize-results [--wandb-dir wandb] [--output-dir results_analysis]`

use anyhow::{Context, Result};
use clap::Parser;
use ppo_results::{cli::VisualizeArgs, config::VisualizeConfig, telemetry, visualize, Error};

fn main() -> Result<()> {
    let config = VisualizeConfig::from(VisualizeArgs::parse());
    telemetry::init()?;

    match visualize::run(&config) {
        Ok(outputs) => {
            tracing::info!(
                run = %outputs.run.path().display(),
                files = outputs.written.len(),
                "visualization finished"
            );
            Ok(())
        }
        Err(err @ Error::InputDirMissing(_)) => {
            tracing::error!("Error: {err}");
            tracing::error!("Pass --wandb-dir or run from the directory holding the tracking logs");
            Ok(())
        }
        Err(err) => Err(err).context("log visualization failed"),
    }
}
