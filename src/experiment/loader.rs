//! Experiment Loader - reads experiment directories from disk
//!
//! Expected layout:
//!
//! ```text
//! <root>/<name>/
//! ├── config.json                 (optional)
//! └── evaluation/                 (optional)
//!     ├── ckpt--0010/done         completed evaluation
//!     └── ckpt--0020/             still running, ignored
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{CheckpointEval, ExperimentRecord, CHECKPOINT_PREFIX};
use crate::{Error, Result};

/// Configuration file read from each experiment directory.
pub const CONFIG_FILE: &str = "config.json";

/// Subdirectory holding checkpoint evaluations.
pub const EVALUATION_DIR: &str = "evaluation";

/// Marker file written once a checkpoint evaluation has finished.
pub const DONE_MARKER: &str = "done";

/// Loads experiment records from an experiment root directory.
#[derive(Debug, Clone)]
pub struct ExperimentLoader {
    root: PathBuf,
}

impl ExperimentLoader {
    /// Create a loader for experiments under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the experiment root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a single experiment by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExperimentNotFound`] if `<root>/<name>` does not exist,
    /// and IO/JSON errors if `config.json` exists but cannot be read or parsed.
    pub fn load(&self, name: &str) -> Result<ExperimentRecord> {
        let exp_dir = self.root.join(name);
        if !exp_dir.exists() {
            return Err(Error::ExperimentNotFound(exp_dir));
        }

        let mut builder = ExperimentRecord::builder(name, &exp_dir);

        let config_path = exp_dir.join(CONFIG_FILE);
        if config_path.is_file() {
            let contents = fs::read_to_string(&config_path)?;
            builder = builder.config(serde_json::from_str(&contents)?);
        }

        for checkpoint in completed_checkpoints(&exp_dir.join(EVALUATION_DIR))? {
            builder = builder.checkpoint(checkpoint);
        }

        Ok(builder.build())
    }

    /// Load every named experiment, skipping the ones that fail.
    ///
    /// Failures are logged and excluded; the caller decides whether an empty
    /// result is fatal.
    #[must_use]
    pub fn load_all<S: AsRef<str>>(&self, names: &[S]) -> Vec<ExperimentRecord> {
        let mut records = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match self.load(name) {
                Ok(record) => {
                    info!(
                        experiment = name,
                        checkpoints = record.checkpoints().len(),
                        "Loaded: {name}"
                    );
                    records.push(record);
                }
                Err(err) => warn!("Warning: {err}"),
            }
        }
        records
    }
}

fn completed_checkpoints(eval_dir: &Path) -> Result<Vec<CheckpointEval>> {
    if !eval_dir.is_dir() {
        debug!(path = %eval_dir.display(), "no evaluation directory");
        return Ok(Vec::new());
    }

    let mut checkpoints = Vec::new();
    for entry in fs::read_dir(eval_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(CHECKPOINT_PREFIX) && path.join(DONE_MARKER).exists() {
            checkpoints.push(CheckpointEval::new(name));
        }
    }
    Ok(checkpoints)
}
