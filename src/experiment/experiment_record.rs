//! Experiment Record - summary of one experiment directory

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::CheckpointEval;

/// Experiment Record represents one loaded experiment directory.
///
/// This is the unit the ablation table and the figures are built from.
/// A record is never mutated after the loader builds it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentRecord {
    name: String,
    root: PathBuf,
    config: Option<serde_json::Value>,
    checkpoints: Vec<CheckpointEval>,
    training_metrics: BTreeMap<String, serde_json::Value>,
}

impl ExperimentRecord {
    /// Create a new experiment record with no config and no checkpoints.
    ///
    /// # Arguments
    ///
    /// * `name` - Experiment name (directory name under the experiment root)
    /// * `root` - Directory the experiment was loaded from
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self::builder(name, root).build()
    }

    /// Create a builder for constructing an experiment record with optional fields.
    #[must_use]
    pub fn builder(name: impl Into<String>, root: impl Into<PathBuf>) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(name, root)
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the directory the experiment was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the experiment configuration, if `config.json` was present.
    #[must_use]
    pub const fn config(&self) -> Option<&serde_json::Value> {
        self.config.as_ref()
    }

    /// Get the completed checkpoint evaluations, ordered by step.
    #[must_use]
    pub fn checkpoints(&self) -> &[CheckpointEval] {
        &self.checkpoints
    }

    /// Get the training metrics.
    ///
    /// Training logs are not parsed yet, so this is always empty.
    #[must_use]
    pub const fn training_metrics(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.training_metrics
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    name: String,
    root: PathBuf,
    config: Option<serde_json::Value>,
    checkpoints: Vec<CheckpointEval>,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            config: None,
            checkpoints: Vec::new(),
        }
    }

    /// Set the experiment configuration.
    #[must_use]
    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Append a completed checkpoint evaluation.
    #[must_use]
    pub fn checkpoint(mut self, checkpoint: CheckpointEval) -> Self {
        self.checkpoints.push(checkpoint);
        self
    }

    /// Build the `ExperimentRecord`, sorting checkpoints by step then name.
    #[must_use]
    pub fn build(mut self) -> ExperimentRecord {
        self.checkpoints.sort();
        ExperimentRecord {
            name: self.name,
            root: self.root,
            config: self.config,
            checkpoints: self.checkpoints,
            training_metrics: BTreeMap::new(),
        }
    }
}
