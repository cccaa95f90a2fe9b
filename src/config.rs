//! Pipeline configuration
//!
//! Every path the two pipelines touch is an explicit field here; the
//! defaults reproduce the conventional layout (`experiments/`,
//! `paper_results/`, `wandb/`, `results_analysis/`) relative to the current
//! working directory.

use std::path::PathBuf;

use crate::plot::DEFAULT_DPI;
use crate::runlog::{RunLocator, DEFAULT_FALLBACK_RUN, DEFAULT_RUN_PREFIX};

/// Default experiment root.
pub const DEFAULT_EXP_ROOT: &str = "experiments";

/// Default output directory of the ablation analysis.
pub const DEFAULT_ANALYZE_OUTPUT: &str = "paper_results";

/// Default tracking-log root.
pub const DEFAULT_WANDB_DIR: &str = "wandb";

/// Default output directory of the log visualization.
pub const DEFAULT_VISUALIZE_OUTPUT: &str = "results_analysis";

/// Configuration of the ablation analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeConfig {
    /// Experiment names to load, in table order
    pub experiments: Vec<String>,
    /// Directory holding one subdirectory per experiment
    pub exp_root: PathBuf,
    /// Directory the tables and figures are written to
    pub output_dir: PathBuf,
    /// Figure resolution in pixels per inch
    pub dpi: u32,
}

impl AnalyzeConfig {
    /// Configuration for `experiments` with default paths.
    #[must_use]
    pub fn new<I, S>(experiments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            experiments: experiments.into_iter().map(Into::into).collect(),
            exp_root: PathBuf::from(DEFAULT_EXP_ROOT),
            output_dir: PathBuf::from(DEFAULT_ANALYZE_OUTPUT),
            dpi: DEFAULT_DPI,
        }
    }

    /// Set the experiment root.
    #[must_use]
    pub fn exp_root(mut self, exp_root: impl Into<PathBuf>) -> Self {
        self.exp_root = exp_root.into();
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the figure resolution.
    #[must_use]
    pub const fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }
}

/// Configuration of the tracking-log visualization pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizeConfig {
    /// Tracking-log root holding the run directories
    pub input_dir: PathBuf,
    /// Directory the figures and reports are written to
    pub output_dir: PathBuf,
    /// Name prefix of run directories
    pub run_prefix: String,
    /// Directory used when no prefixed run exists
    pub fallback_run: String,
    /// Figure resolution in pixels per inch
    pub dpi: u32,
}

impl Default for VisualizeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_WANDB_DIR),
            output_dir: PathBuf::from(DEFAULT_VISUALIZE_OUTPUT),
            run_prefix: DEFAULT_RUN_PREFIX.to_string(),
            fallback_run: DEFAULT_FALLBACK_RUN.to_string(),
            dpi: DEFAULT_DPI,
        }
    }
}

impl VisualizeConfig {
    /// Set the tracking-log root.
    #[must_use]
    pub fn input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the figure resolution.
    #[must_use]
    pub const fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Run locator for the configured root and naming convention.
    #[must_use]
    pub fn locator(&self) -> RunLocator {
        RunLocator::new(&self.input_dir)
            .prefix(&self.run_prefix)
            .fallback(&self.fallback_run)
    }
}
