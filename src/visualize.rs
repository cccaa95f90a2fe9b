//! Tracking-log visualization pipeline: latest run → figures + reports.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::VisualizeConfig;
use crate::plot::{DistributionKind, FigureRenderer};
use crate::report::{baseline, gradient_variance_lines, SummaryReport};
use crate::runlog::{load_json_artifacts, load_metric_tables, RunDirectory};
use crate::{Error, Result};

/// What a visualization run read and wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizeOutputs {
    /// The run directory that was analyzed
    pub run: RunDirectory,
    /// Number of CSV metric tables loaded
    pub tables: usize,
    /// Number of JSON artifacts loaded
    pub json_artifacts: usize,
    /// Files written, in creation order
    pub written: Vec<PathBuf>,
}

/// Analyze the latest run under the configured tracking-log root.
///
/// # Errors
///
/// Returns [`Error::InputDirMissing`] before touching the output directory
/// when the tracking-log root does not exist, [`Error::RunNotFound`] when it
/// holds no run directory, and IO errors if a report cannot be written.
/// Figures that fail to render are logged and left out of
/// [`VisualizeOutputs::written`].
pub fn run(config: &VisualizeConfig) -> Result<VisualizeOutputs> {
    if !config.input_dir.exists() {
        return Err(Error::InputDirMissing(config.input_dir.clone()));
    }
    let out = &config.output_dir;
    fs::create_dir_all(out)?;

    info!("Loading tracking-log data...");
    let run = config.locator().latest_run()?;
    let tables = load_metric_tables(&run)?;
    let json = load_json_artifacts(&run)?;
    info!("Found {} CSV metric files", tables.len());
    info!("Found {} JSON metric files", json.len());

    let renderer = FigureRenderer::new(config.dpi);
    let mut written = Vec::new();

    if !tables.is_empty() {
        for kind in [DistributionKind::Advantages, DistributionKind::Values] {
            let path = out.join(kind.file_name());
            match renderer.render_distribution(kind, &tables, &path) {
                Ok(true) => written.push(path),
                Ok(false) => {}
                Err(err) => warn!("Skipping {}: {err}", path.display()),
            }
        }
    }

    if !json.is_empty() {
        info!("=== Analyzing Gradient Variance ===");
        let lines = gradient_variance_lines(&json);
        if lines.is_empty() {
            info!("No gradient variance data found");
        }
        for line in lines {
            println!("{line}");
        }
    }

    info!("=== Creating Summary Report ===");
    let report = SummaryReport::build(&tables, &json);
    println!("{report}");
    written.push(report.write(out)?);

    info!("=== Paper Comparison ===");
    written.push(baseline::write_comparison(out)?);

    info!(
        "Analysis complete! Check the '{}' directory for results.",
        out.display()
    );
    Ok(VisualizeOutputs {
        run,
        tables: tables.len(),
        json_artifacts: json.len(),
        written,
    })
}
