//! End-to-end tests of the ablation analysis pipeline

use std::fs;
use std::path::Path;
use std::process::Command;

use ppo_results::ablation::{ABLATION_CSV_FILE, ABLATION_LATEX_FILE, COLUMNS};
use ppo_results::analyze;
use ppo_results::config::AnalyzeConfig;
use ppo_results::plot::{EFFICIENCY_COMPARISON_FILE, TRAINING_CURVES_FILE};
use ppo_results::Error;

fn experiment(root: &Path, name: &str, done_checkpoints: u32) {
    let exp_dir = root.join(name);
    fs::create_dir_all(&exp_dir).unwrap();
    fs::write(exp_dir.join("config.json"), r#"{"num_iterations": 650}"#).unwrap();
    for step in 1..=done_checkpoints {
        let ckpt = exp_dir.join("evaluation").join(format!("ckpt--{step:04}"));
        fs::create_dir_all(&ckpt).unwrap();
        fs::write(ckpt.join("done"), "").unwrap();
    }
}

// =============================================================================
// Missing experiments
// =============================================================================

#[test]
fn test_zero_experiments_fails_without_output_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("paper_results");
    let config = AnalyzeConfig::new(["ghost", "phantom"])
        .exp_root(tmp.path().join("experiments"))
        .output_dir(&out);

    let err = analyze::run(&config).unwrap_err();

    assert!(matches!(err, Error::NoExperiments));
    assert!(!out.exists());
}

#[test]
fn test_binary_exits_nonzero_without_experiments() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("paper_results");

    let status = Command::new(env!("CARGO_BIN_EXE_analyze-results"))
        .arg("--experiments")
        .arg("ghost")
        .arg("--exp-root")
        .arg(tmp.path().join("experiments"))
        .arg("--output-dir")
        .arg(&out)
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out.exists());
}

#[test]
fn test_binary_requires_experiments_argument() {
    let output = Command::new(env!("CARGO_BIN_EXE_analyze-results"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--experiments"));
}

// =============================================================================
// Successful analysis
// =============================================================================

#[test]
fn test_analysis_writes_tables_for_loaded_experiments() {
    let tmp = tempfile::tempdir().unwrap();
    let exp_root = tmp.path().join("experiments");
    experiment(&exp_root, "baseline", 2);
    experiment(&exp_root, "combined_full", 3);
    let out = tmp.path().join("paper_results");
    let config = AnalyzeConfig::new(["baseline", "missing_run", "combined_full"])
        .exp_root(&exp_root)
        .output_dir(&out)
        .dpi(20);

    let outputs = analyze::run(&config).unwrap();

    assert_eq!(outputs.experiments, 2);
    assert_eq!(outputs.csv, out.join(ABLATION_CSV_FILE));
    assert_eq!(outputs.latex, out.join(ABLATION_LATEX_FILE));

    let csv = fs::read_to_string(&outputs.csv).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
    let methods: Vec<&str> = lines
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(methods, vec!["baseline", "combined_full"]);

    let latex = fs::read_to_string(&outputs.latex).unwrap();
    assert!(latex.contains("\\begin{tabular}"));
    assert!(latex.contains("combined\\_full"));

    assert_eq!(
        outputs.figures,
        vec![
            out.join(TRAINING_CURVES_FILE),
            out.join(EFFICIENCY_COMPARISON_FILE)
        ]
    );
    for figure in &outputs.figures {
        assert!(fs::metadata(figure).unwrap().len() > 0, "{} is empty", figure.display());
    }
}

#[test]
fn test_invalid_dpi_skips_figures_but_writes_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let exp_root = tmp.path().join("experiments");
    experiment(&exp_root, "baseline", 1);
    let out = tmp.path().join("paper_results");
    let config = AnalyzeConfig::new(["baseline"])
        .exp_root(&exp_root)
        .output_dir(&out)
        .dpi(400_000_000);

    let outputs = analyze::run(&config).unwrap();

    assert!(outputs.figures.is_empty());
    assert!(outputs.csv.exists());
    assert!(outputs.latex.exists());
    assert!(!out.join(TRAINING_CURVES_FILE).exists());
    assert!(!out.join(EFFICIENCY_COMPARISON_FILE).exists());
}

#[test]
fn test_rerun_overwrites_previous_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let exp_root = tmp.path().join("experiments");
    experiment(&exp_root, "baseline", 1);
    experiment(&exp_root, "combined_full", 1);
    let out = tmp.path().join("paper_results");

    let first = AnalyzeConfig::new(["baseline", "combined_full"])
        .exp_root(&exp_root)
        .output_dir(&out)
        .dpi(20);
    analyze::run(&first).unwrap();

    let second = AnalyzeConfig::new(["baseline"])
        .exp_root(&exp_root)
        .output_dir(&out)
        .dpi(20);
    let outputs = analyze::run(&second).unwrap();

    let csv = fs::read_to_string(outputs.csv).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(!csv.contains("combined_full"));
}
