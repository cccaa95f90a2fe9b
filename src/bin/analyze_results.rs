//! Aggregate experiment directories into an ablation table and figures.
//!
//! Usage: `analyze-results --experiments baseline ablation1_adaptive_mc combined_full`

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ppo_results::{analyze, cli::AnalyzeArgs, config::AnalyzeConfig, telemetry, Error};

fn main() -> Result<ExitCode> {
    let config = AnalyzeConfig::from(AnalyzeArgs::parse());
    telemetry::init()?;

    match analyze::run(&config) {
        Ok(outputs) => {
            tracing::info!(
                experiments = outputs.experiments,
                "Results saved to: {}",
                config.output_dir.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ Error::NoExperiments) => {
            tracing::error!("Error: {err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("experiment analysis failed"),
    }
}
