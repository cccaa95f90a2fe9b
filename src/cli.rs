//! Command-line interface definitions using clap derive API.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    AnalyzeConfig, VisualizeConfig, DEFAULT_ANALYZE_OUTPUT, DEFAULT_EXP_ROOT,
    DEFAULT_VISUALIZE_OUTPUT, DEFAULT_WANDB_DIR,
};
use crate::plot::{DEFAULT_DPI, MAX_DPI};
use crate::runlog::{DEFAULT_FALLBACK_RUN, DEFAULT_RUN_PREFIX};

/// Aggregate experiment directories into ablation tables and figures
#[derive(Parser, Debug)]
#[command(name = "analyze-results")]
#[command(about = "Analyze PPO experiment results")]
#[command(version)]
pub struct AnalyzeArgs {
    /// List of experiment names to analyze
    #[arg(long, num_args = 1.., required = true)]
    pub experiments: Vec<String>,

    /// Root directory for experiments
    #[arg(long, default_value = DEFAULT_EXP_ROOT)]
    pub exp_root: PathBuf,

    /// Output directory for figures and tables
    #[arg(long, default_value = DEFAULT_ANALYZE_OUTPUT)]
    pub output_dir: PathBuf,

    /// Figure resolution in pixels per inch
    #[arg(
        long,
        default_value_t = DEFAULT_DPI,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DPI))
    )]
    pub dpi: u32,
}

impl From<AnalyzeArgs> for AnalyzeConfig {
    fn from(args: AnalyzeArgs) -> Self {
        Self::new(args.experiments)
            .exp_root(args.exp_root)
            .output_dir(args.output_dir)
            .dpi(args.dpi)
    }
}

/// Visualize the latest offline tracking-log run
#[derive(Parser, Debug)]
#[command(name = "visualize-results")]
#[command(about = "Visualize advantage/value distributions from offline tracking logs")]
#[command(version)]
pub struct VisualizeArgs {
    /// Tracking-log directory holding the run directories
    #[arg(long, default_value = DEFAULT_WANDB_DIR)]
    pub wandb_dir: PathBuf,

    /// Output directory for figures and reports
    #[arg(long, default_value = DEFAULT_VISUALIZE_OUTPUT)]
    pub output_dir: PathBuf,

    /// Name prefix of run directories
    #[arg(long, default_value = DEFAULT_RUN_PREFIX)]
    pub run_prefix: String,

    /// Run directory used when no prefixed run exists
    #[arg(long, default_value = DEFAULT_FALLBACK_RUN)]
    pub fallback_run: String,

    /// Figure resolution in pixels per inch
    #[arg(
        long,
        default_value_t = DEFAULT_DPI,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DPI))
    )]
    pub dpi: u32,
}

impl From<VisualizeArgs> for VisualizeConfig {
    fn from(args: VisualizeArgs) -> Self {
        Self {
            input_dir: args.wandb_dir,
            output_dir: args.output_dir,
            run_prefix: args.run_prefix,
            fallback_run: args.fallback_run,
            dpi: args.dpi,
        }
    }
}
