//! Experiment loader tests against scratch experiment directories

use std::fs;
use std::path::Path;

use ppo_results::experiment::{ExperimentLoader, CONFIG_FILE, DONE_MARKER, EVALUATION_DIR};
use ppo_results::Error;

fn checkpoint(exp_dir: &Path, name: &str, done: bool) {
    let dir = exp_dir.join(EVALUATION_DIR).join(name);
    fs::create_dir_all(&dir).unwrap();
    if done {
        fs::write(dir.join(DONE_MARKER), "").unwrap();
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_experiment_without_config_loads() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("baseline")).unwrap();

    let record = ExperimentLoader::new(tmp.path()).load("baseline").unwrap();

    assert_eq!(record.name(), "baseline");
    assert!(record.config().is_none());
    assert_eq!(record.root(), tmp.path().join("baseline"));
}

#[test]
fn test_experiment_config_is_loaded() {
    let tmp = tempfile::tempdir().unwrap();
    let exp_dir = tmp.path().join("combined_full");
    fs::create_dir(&exp_dir).unwrap();
    fs::write(
        exp_dir.join(CONFIG_FILE),
        r#"{"num_iterations": 650, "adaptive_mc": true, "model": "rho-1b"}"#,
    )
    .unwrap();

    let record = ExperimentLoader::new(tmp.path()).load("combined_full").unwrap();
    let config = record.config().expect("config.json should be loaded");

    assert_eq!(config["num_iterations"], 650);
    assert_eq!(config["adaptive_mc"], true);
    assert_eq!(config["model"], "rho-1b");
}

// =============================================================================
// Checkpoints
// =============================================================================

#[test]
fn test_n_done_checkpoints_yield_n_entries() {
    let tmp = tempfile::tempdir().unwrap();
    let exp_dir = tmp.path().join("ablation1_adaptive_mc");
    for step in [100, 200, 300, 400, 500] {
        checkpoint(&exp_dir, &format!("ckpt--{step:04}"), true);
    }

    let record = ExperimentLoader::new(tmp.path())
        .load("ablation1_adaptive_mc")
        .unwrap();

    assert_eq!(record.checkpoints().len(), 5);
    let steps: Vec<Option<u64>> = record.checkpoints().iter().map(|c| c.step()).collect();
    assert_eq!(
        steps,
        vec![Some(100), Some(200), Some(300), Some(400), Some(500)]
    );
}

#[test]
fn test_unfinished_and_foreign_directories_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let exp_dir = tmp.path().join("baseline");
    checkpoint(&exp_dir, "ckpt--0001", true);
    checkpoint(&exp_dir, "ckpt--0002", false);
    checkpoint(&exp_dir, "tmp-ckpt--0003", true);
    fs::write(exp_dir.join(EVALUATION_DIR).join("ckpt--0004"), "a file").unwrap();

    let record = ExperimentLoader::new(tmp.path()).load("baseline").unwrap();

    assert_eq!(record.checkpoints().len(), 1);
    assert_eq!(record.checkpoints()[0].name(), "ckpt--0001");
}

#[test]
fn test_missing_evaluation_dir_yields_no_checkpoints() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("baseline")).unwrap();

    let record = ExperimentLoader::new(tmp.path()).load("baseline").unwrap();
    assert!(record.checkpoints().is_empty());
    assert!(record.training_metrics().is_empty());
}

// =============================================================================
// Multiple experiments
// =============================================================================

#[test]
fn test_load_all_preserves_order_and_skips_missing() {
    let tmp = tempfile::tempdir().unwrap();
    for name in ["combined_full", "baseline"] {
        fs::create_dir(tmp.path().join(name)).unwrap();
    }

    let records =
        ExperimentLoader::new(tmp.path()).load_all(&["combined_full", "ghost", "baseline"]);

    let names: Vec<&str> = records.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["combined_full", "baseline"]);
}

#[test]
fn test_missing_experiment_error_names_path() {
    let tmp = tempfile::tempdir().unwrap();
    let err = ExperimentLoader::new(tmp.path()).load("ghost").unwrap_err();

    assert!(matches!(err, Error::ExperimentNotFound(_)));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_record_serializes_to_json() {
    let tmp = tempfile::tempdir().unwrap();
    checkpoint(&tmp.path().join("baseline"), "ckpt--0010", true);

    let record = ExperimentLoader::new(tmp.path()).load("baseline").unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["name"], "baseline");
    assert_eq!(json["checkpoints"][0]["name"], "ckpt--0010");
    assert_eq!(json["checkpoints"][0]["step"], 10);
    assert!(json["config"].is_null());
}
