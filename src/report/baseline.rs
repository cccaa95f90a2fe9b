//! Published reference numbers and the static comparison banner.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::Result;

/// Comparison file name.
pub const PAPER_COMPARISON_FILE: &str = "paper_comparison.txt";

/// Training iterations behind the published numbers.
pub const REFERENCE_ITERATIONS: u32 = 650;

/// A published result row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceResult {
    /// Model / method name
    pub model: &'static str,
    /// GSM8K test accuracy in percent
    pub gsm8k: f64,
    /// MATH test accuracy in percent
    pub math: f64,
}

/// Published baseline (first) and method (last) results.
pub const REFERENCE_RESULTS: [ReferenceResult; 2] = [
    ReferenceResult {
        model: "Rho-1B SFT",
        gsm8k: 40.5,
        math: 9.6,
    },
    ReferenceResult {
        model: "Rho-1B + VinePPO",
        gsm8k: 53.0,
        math: 16.2,
    },
];

const INNER_WIDTH: usize = 62;
const INDENT: &str = "    ";

/// The comparison banner: reference table plus guidance on run length.
///
/// The text is fixed; it does not depend on any loaded run.
#[must_use]
pub fn comparison_banner() -> String {
    let [baseline, method] = REFERENCE_RESULTS;
    let rule = |left: char, right: char| format!("{INDENT}{left}{}{right}", "═".repeat(INNER_WIDTH));

    let mut lines = vec![
        String::new(),
        rule('╔', '╗'),
        framed(&format!("{:^INNER_WIDTH$}", "VinePPO Paper Results (Reference)")),
        rule('╠', '╣'),
        row("Model", "GSM8K Accuracy", "MATH Accuracy"),
        rule('╠', '╣'),
    ];
    for result in &REFERENCE_RESULTS {
        lines.push(row(
            result.model,
            &format!("{:.1}%", result.gsm8k),
            &format!("{:.1}%", result.math),
        ));
    }
    lines.push(rule('╠', '╣'));
    lines.push(row(
        "Improvement",
        &format!("{:+.1}%", method.gsm8k - baseline.gsm8k),
        &format!("{:+.1}%", method.math - baseline.math),
    ));
    lines.push(rule('╚', '╝'));
    lines.push(String::new());

    for note in [
        format!("Note: The reference results are from {REFERENCE_ITERATIONS} iterations of training."),
        "Runs that stop after a handful of iterations are not comparable.".to_string(),
        String::new(),
        "To get comparable results:".to_string(),
        "1. Run full training (expect several hours to days)".to_string(),
        format!("2. Check num_iterations in config (should be {REFERENCE_ITERATIONS})"),
        "3. Monitor progress in the tracking logs".to_string(),
        "4. Final evaluation will show test accuracy".to_string(),
    ] {
        if note.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{INDENT}{note}"));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write [`comparison_banner`] to `dir/paper_comparison.txt`.
///
/// # Errors
///
/// Returns an IO error if the file cannot be written.
pub fn write_comparison(dir: &Path) -> Result<PathBuf> {
    let banner = comparison_banner();
    println!("{banner}");

    let path = dir.join(PAPER_COMPARISON_FILE);
    fs::write(&path, banner)?;
    info!("Saved: {}", path.display());
    Ok(path)
}

fn framed(inner: &str) -> String {
    format!("{INDENT}║{inner}║")
}

fn row(model: &str, gsm8k: &str, math: &str) -> String {
    framed(&format!(" {model:<20} │{gsm8k:^16}│{math:^22}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_rows_have_equal_width() {
        let banner = comparison_banner();
        let widths: Vec<usize> = banner
            .lines()
            .filter(|l| l.trim_start().starts_with(['║', '╔', '╠', '╚']))
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.len() >= 9);
        assert!(widths.iter().all(|&w| w == INDENT.len() + INNER_WIDTH + 2));
    }

    #[test]
    fn test_banner_contents() {
        let banner = comparison_banner();
        assert!(banner.contains("Rho-1B SFT"));
        assert!(banner.contains("40.5%"));
        assert!(banner.contains("16.2%"));
        assert!(banner.contains("+12.5%"));
        assert!(banner.contains("+6.6%"));
        assert!(banner.contains("should be 650"));
    }

    #[test]
    fn test_write_comparison() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_comparison(tmp.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), PAPER_COMPARISON_FILE);
        assert_eq!(fs::read_to_string(path).unwrap(), comparison_banner());
    }
}
