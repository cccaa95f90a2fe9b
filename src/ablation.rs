//! Ablation comparison table
//!
//! One row per loaded experiment. The numeric columns are placeholders: the
//! experiment directories do not yet expose accuracy, wall-clock time or
//! Monte-Carlo sample counts, so every row reports zeros until those are
//! parsed from evaluation outputs.

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::experiment::ExperimentRecord;
use crate::Result;

/// CSV export file name.
pub const ABLATION_CSV_FILE: &str = "ablation_results.csv";

/// LaTeX export file name.
pub const ABLATION_LATEX_FILE: &str = "ablation_table.tex";

/// Column headers, in output order.
pub const COLUMNS: [&str; 5] = [
    "Method",
    "Accuracy (%)",
    "Training Time (h)",
    "Avg MC Samples",
    "Convergence Iter",
];

/// One row of the ablation table.
#[derive(Debug, Clone, PartialEq)]
pub struct AblationRow {
    /// Experiment name
    pub method: String,
    /// Final test accuracy in percent
    pub accuracy_pct: f64,
    /// Total training time in hours
    pub training_time_h: f64,
    /// Mean number of Monte-Carlo rollouts per state
    pub avg_mc_samples: u64,
    /// Iteration at which training converged
    pub convergence_iter: u64,
}

impl AblationRow {
    /// Placeholder row for an experiment.
    #[must_use]
    pub fn placeholder(record: &ExperimentRecord) -> Self {
        Self {
            method: record.name().to_string(),
            accuracy_pct: 0.0,
            training_time_h: 0.0,
            avg_mc_samples: 0,
            convergence_iter: 0,
        }
    }

    fn cells(&self) -> [String; 5] {
        [
            self.method.clone(),
            format!("{:.2}", self.accuracy_pct),
            format!("{:.2}", self.training_time_h),
            self.avg_mc_samples.to_string(),
            self.convergence_iter.to_string(),
        ]
    }
}

/// Ablation study comparison table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AblationTable {
    rows: Vec<AblationRow>,
}

impl AblationTable {
    /// Build one placeholder row per experiment, in input order.
    #[must_use]
    pub fn from_experiments(experiments: &[ExperimentRecord]) -> Self {
        Self {
            rows: experiments.iter().map(AblationRow::placeholder).collect(),
        }
    }

    /// Get the rows.
    #[must_use]
    pub fn rows(&self) -> &[AblationRow] {
        &self.rows
    }

    /// Convert to an Arrow record batch with the [`COLUMNS`] schema.
    ///
    /// # Errors
    ///
    /// Returns an Arrow error if the batch cannot be assembled.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COLUMNS[0], DataType::Utf8, false),
            Field::new(COLUMNS[1], DataType::Float64, false),
            Field::new(COLUMNS[2], DataType::Float64, false),
            Field::new(COLUMNS[3], DataType::UInt64, false),
            Field::new(COLUMNS[4], DataType::UInt64, false),
        ]));

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                self.rows.iter().map(|r| r.method.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(
                self.rows.iter().map(|r| r.accuracy_pct),
            )),
            Arc::new(Float64Array::from_iter_values(
                self.rows.iter().map(|r| r.training_time_h),
            )),
            Arc::new(UInt64Array::from_iter_values(
                self.rows.iter().map(|r| r.avg_mc_samples),
            )),
            Arc::new(UInt64Array::from_iter_values(
                self.rows.iter().map(|r| r.convergence_iter),
            )),
        ];

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    /// Write the table as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns an IO or Arrow error if the file cannot be written.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let batch = self.to_record_batch()?;
        let file = File::create(path)?;
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(&batch)?;
        Ok(())
    }

    /// Render as a booktabs LaTeX tabular, floats with two decimals.
    #[must_use]
    pub fn to_latex(&self) -> String {
        let mut out = String::new();
        out.push_str("\\begin{tabular}{lrrrr}\n");
        out.push_str("\\toprule\n");
        out.push_str(&latex_row(COLUMNS.iter().map(|c| (*c).to_string())));
        out.push_str("\\midrule\n");
        for row in &self.rows {
            out.push_str(&latex_row(row.cells()));
        }
        out.push_str("\\bottomrule\n");
        out.push_str("\\end{tabular}\n");
        out
    }

    /// Write [`to_latex`](Self::to_latex) output to `path`.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn write_latex(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_latex())?;
        Ok(())
    }
}

impl fmt::Display for AblationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body: Vec<[String; 5]> = self.rows.iter().map(AblationRow::cells).collect();
        let mut widths = COLUMNS.map(str::len);
        for cells in &body {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(cell.len());
            }
        }

        for (i, (header, w)) in COLUMNS.iter().zip(widths).enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{header:>w$}")?;
        }
        for cells in &body {
            writeln!(f)?;
            for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
                if i > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{cell:>w$}")?;
            }
        }
        Ok(())
    }
}

fn latex_row<I: IntoIterator<Item = String>>(cells: I) -> String {
    let escaped: Vec<String> = cells.into_iter().map(|c| latex_escape(&c)).collect();
    format!("{} \\\\\n", escaped.join(" & "))
}

/// Escape LaTeX special characters.
#[must_use]
pub fn latex_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AblationTable {
        AblationTable::from_experiments(&[
            ExperimentRecord::new("baseline", "experiments/baseline"),
            ExperimentRecord::new("ablation1_adaptive_mc", "experiments/ablation1_adaptive_mc"),
        ])
    }

    #[test]
    fn test_rows_are_placeholders() {
        let t = table();
        assert_eq!(t.rows().len(), 2);
        assert_eq!(t.rows()[1].method, "ablation1_adaptive_mc");
        assert!(t.rows().iter().all(|r| r.accuracy_pct == 0.0 && r.convergence_iter == 0));
    }

    #[test]
    fn test_record_batch_shape() {
        let batch = table().to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), COLUMNS.len());
        assert_eq!(batch.schema().field(1).name(), "Accuracy (%)");
    }

    #[test]
    fn test_latex_output() {
        let latex = table().to_latex();
        assert!(latex.starts_with("\\begin{tabular}{lrrrr}\n\\toprule\n"));
        assert!(latex.contains("Method & Accuracy (\\%) & Training Time (h)"));
        assert!(latex.contains("ablation1\\_adaptive\\_mc & 0.00 & 0.00 & 0 & 0 \\\\\n"));
        assert!(latex.ends_with("\\bottomrule\n\\end{tabular}\n"));
    }

    #[test]
    fn test_latex_escape() {
        assert_eq!(latex_escape("a_b&c%"), "a\\_b\\&c\\%");
        assert_eq!(latex_escape("x~y"), "x\\textasciitilde{}y");
    }

    #[test]
    fn test_display_aligns_columns() {
        let text = table().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), lines[1].len());
        assert!(lines[1].trim_start().starts_with("baseline"));
    }

    #[test]
    fn test_write_csv() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ablation_results.csv");
        table().write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("Method,Accuracy (%),Training Time (h),Avg MC Samples,Convergence Iter")
        );
        assert!(lines.next().unwrap().starts_with("baseline,"));
        assert_eq!(lines.count(), 1);
    }
}
