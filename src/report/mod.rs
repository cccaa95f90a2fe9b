//! Text reports
//!
//! - [`SummaryReport`]: statistics of the advantage/value tables and the
//!   gradient-variance artifacts of one run (`summary_report.txt`)
//! - [`baseline`]: fixed comparison against published numbers
//!   (`paper_comparison.txt`)

pub mod baseline;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::plot::DistributionKind;
use crate::runlog::{JsonArtifacts, MetricTables};
use crate::stats::SummaryStats;
use crate::Result;

/// Summary report file name.
pub const SUMMARY_REPORT_FILE: &str = "summary_report.txt";

/// Name fragment identifying gradient-variance JSON artifacts.
pub const GRADIENT_VARIANCE_KEY: &str = "PPOGradientVariance";

const RULE_WIDTH: usize = 80;

/// Plain-text summary of one run's logged artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    lines: Vec<String>,
}

impl SummaryReport {
    /// Build the report from loaded tables and JSON artifacts.
    ///
    /// Sections without data are left out; the banner is always present.
    #[must_use]
    pub fn build(tables: &MetricTables, json: &JsonArtifacts) -> Self {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = vec![
            rule.clone(),
            "Training Results Summary".to_string(),
            rule.clone(),
            String::new(),
        ];

        for (heading, kind) in [
            ("Advantage Statistics:", DistributionKind::Advantages),
            ("Value Estimate Statistics:", DistributionKind::Values),
        ] {
            let matched = tables.matching(kind.keyword());
            if matched.is_empty() {
                continue;
            }
            lines.push(heading.to_string());
            for table in matched {
                lines.push(format!("  File: {}", table.name()));
                match table.first_column_stats() {
                    Ok(Some(stats)) => lines.extend(stats_lines(&stats)),
                    Ok(None) => lines.push("    (no numeric values)".to_string()),
                    Err(err) => {
                        warn!("Cannot summarize {}: {err}", table.name());
                        lines.push(format!("    (unreadable: {err})"));
                    }
                }
                lines.push(String::new());
            }
        }

        let gradient_files = gradient_variance_artifacts(json);
        if !gradient_files.is_empty() {
            lines.push("Gradient Variance:".to_string());
            for (name, value) in gradient_files {
                lines.push(format!("  {name}:"));
                lines.extend(value_lines(value).into_iter().map(|l| format!("    {l}")));
                lines.push(String::new());
            }
        }

        lines.push(rule);
        Self { lines }
    }

    /// Report lines without trailing newlines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the report to `dir/summary_report.txt`.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(SUMMARY_REPORT_FILE);
        fs::write(&path, self.to_string())?;
        info!("Saved report: {}", path.display());
        Ok(path)
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Console echo of every gradient-variance artifact, one line per key.
#[must_use]
pub fn gradient_variance_lines(json: &JsonArtifacts) -> Vec<String> {
    let mut lines = Vec::new();
    for (name, value) in gradient_variance_artifacts(json) {
        lines.push(format!("Gradient Variance Analysis ({name}):"));
        lines.extend(value_lines(value).into_iter().map(|l| format!("  {l}")));
    }
    lines
}

fn gradient_variance_artifacts(json: &JsonArtifacts) -> Vec<(&String, &serde_json::Value)> {
    json.iter()
        .filter(|(name, _)| name.contains(GRADIENT_VARIANCE_KEY))
        .collect()
}

fn stats_lines(stats: &SummaryStats) -> [String; 4] {
    [
        format!("    Mean: {:.4}", stats.mean),
        format!("    Std:  {:.4}", stats.std),
        format!("    Min:  {:.4}", stats.min),
        format!("    Max:  {:.4}", stats.max),
    ]
}

/// `key: value` lines of a JSON object; any other value is echoed whole.
fn value_lines(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, v)| format!("{key}: {}", display_value(v)))
            .collect(),
        other => vec![display_value(other)],
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runlog::MetricTable;
    use arrow::array::Float64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    fn table(name: &str, values: Vec<f64>) -> MetricTable {
        let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Float64, false)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(Float64Array::from(values))]).unwrap();
        MetricTable::new(name, batch)
    }

    #[test]
    fn test_report_statistics() {
        let tables: MetricTables = vec![table("advantages__iter_0", vec![1.0, 2.0, 3.0, 4.0])]
            .into_iter()
            .collect();
        let report = SummaryReport::build(&tables, &JsonArtifacts::new()).to_string();

        assert!(report.contains("Advantage Statistics:"));
        assert!(report.contains("  File: advantages__iter_0"));
        assert!(report.contains("    Mean: 2.5000"));
        assert!(report.contains("    Std:  1.2910"));
        assert!(report.contains("    Min:  1.0000"));
        assert!(report.contains("    Max:  4.0000"));
        assert!(!report.contains("Value Estimate Statistics:"));
    }

    #[test]
    fn test_report_empty_has_banner_only() {
        let report = SummaryReport::build(&MetricTables::new(), &JsonArtifacts::new());
        assert_eq!(report.lines().len(), 5);
        assert_eq!(report.lines()[1], "Training Results Summary");
    }

    #[test]
    fn test_gradient_variance_echo() {
        let mut json = JsonArtifacts::new();
        json.insert(
            "PPOGradientVariance_iter_0".to_string(),
            serde_json::json!({"grad_var": 0.125, "method": "vine"}),
        );
        json.insert("config".to_string(), serde_json::json!({"lr": 1e-6}));

        let lines = gradient_variance_lines(&json);
        assert_eq!(
            lines,
            vec![
                "Gradient Variance Analysis (PPOGradientVariance_iter_0):".to_string(),
                "  grad_var: 0.125".to_string(),
                "  method: vine".to_string(),
            ]
        );

        let report = SummaryReport::build(&MetricTables::new(), &json).to_string();
        assert!(report.contains("Gradient Variance:\n  PPOGradientVariance_iter_0:\n    grad_var: 0.125"));
        assert!(!report.contains("lr"));
    }

    #[test]
    fn test_gradient_variance_keeps_file_key_order() {
        let mut json = JsonArtifacts::new();
        json.insert(
            "PPOGradientVariance".to_string(),
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap(),
        );

        assert_eq!(
            gradient_variance_lines(&json),
            vec![
                "Gradient Variance Analysis (PPOGradientVariance):".to_string(),
                "  zeta: 1".to_string(),
                "  alpha: 2".to_string(),
                "  mid: 3".to_string(),
            ]
        );

        let report = SummaryReport::build(&MetricTables::new(), &json).to_string();
        assert!(report.contains("    zeta: 1\n    alpha: 2\n    mid: 3"));
    }

    #[test]
    fn test_non_object_gradient_artifact() {
        let mut json = JsonArtifacts::new();
        json.insert("PPOGradientVariance".to_string(), serde_json::json!([1, 2]));
        assert_eq!(gradient_variance_lines(&json)[1], "  [1,2]");
    }

    #[test]
    fn test_write_report() {
        let tmp = tempfile::tempdir().unwrap();
        let report = SummaryReport::build(&MetricTables::new(), &JsonArtifacts::new());
        let path = report.write(tmp.path()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), report.to_string());
    }
}
