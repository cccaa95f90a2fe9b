//! Ablation analysis pipeline: experiments → table + figures.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::ablation::{AblationTable, ABLATION_CSV_FILE, ABLATION_LATEX_FILE};
use crate::config::AnalyzeConfig;
use crate::experiment::ExperimentLoader;
use crate::plot::{FigureRenderer, EFFICIENCY_COMPARISON_FILE, TRAINING_CURVES_FILE};
use crate::{Error, Result};

/// Files written by a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOutputs {
    /// Number of experiments that loaded
    pub experiments: usize,
    /// Ablation table as CSV
    pub csv: PathBuf,
    /// Ablation table as LaTeX tabular
    pub latex: PathBuf,
    /// Figures that rendered successfully
    pub figures: Vec<PathBuf>,
}

/// Load the configured experiments and write the table and figures.
///
/// The output directory is only created once at least one experiment has
/// loaded, so a run with no valid experiment leaves the filesystem untouched.
/// A figure that fails to render is logged and left out of
/// [`AnalyzeOutputs::figures`]; the tables are still written.
///
/// # Errors
///
/// Returns [`Error::NoExperiments`] if none of the experiments loads, and IO
/// or Arrow errors if a table cannot be written.
pub fn run(config: &AnalyzeConfig) -> Result<AnalyzeOutputs> {
    info!("Loading experiment results...");
    let loader = ExperimentLoader::new(&config.exp_root);
    let experiments = loader.load_all(&config.experiments);
    if experiments.is_empty() {
        return Err(Error::NoExperiments);
    }

    let out = &config.output_dir;
    fs::create_dir_all(out)?;

    info!("Generating ablation table...");
    let table = AblationTable::from_experiments(&experiments);
    println!("{table}");

    let csv = out.join(ABLATION_CSV_FILE);
    table.write_csv(&csv)?;
    info!("Saved table: {}", csv.display());

    let latex = out.join(ABLATION_LATEX_FILE);
    table.write_latex(&latex)?;
    info!("Saved LaTeX table: {}", latex.display());

    info!("Generating plots...");
    let renderer = FigureRenderer::new(config.dpi);
    let mut figures = Vec::new();

    let training_curves = out.join(TRAINING_CURVES_FILE);
    match renderer.render_training_curves(&experiments, &training_curves) {
        Ok(()) => figures.push(training_curves),
        Err(err) => warn!("Skipping {}: {err}", training_curves.display()),
    }

    let efficiency_comparison = out.join(EFFICIENCY_COMPARISON_FILE);
    match renderer.render_efficiency_comparison(&table, &efficiency_comparison) {
        Ok(()) => figures.push(efficiency_comparison),
        Err(err) => warn!("Skipping {}: {err}", efficiency_comparison.display()),
    }

    info!("Analysis complete! Results saved to: {}", out.display());
    Ok(AnalyzeOutputs {
        experiments: experiments.len(),
        csv,
        latex,
        figures,
    })
}
