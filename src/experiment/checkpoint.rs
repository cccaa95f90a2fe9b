//! Checkpoint evaluation entries

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Directory-name prefix of checkpoint evaluation directories.
pub const CHECKPOINT_PREFIX: &str = "ckpt--";

/// A completed checkpoint evaluation.
///
/// The directory name is kept verbatim. When it ends in a number
/// (`ckpt--0042`) that number is exposed as the training step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckpointEval {
    name: String,
    step: Option<u64>,
    metrics: Option<serde_json::Value>,
}

impl CheckpointEval {
    /// Create a checkpoint entry from its directory name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let step = parse_step(&name);
        Self {
            name,
            step,
            metrics: None,
        }
    }

    /// Get the checkpoint directory name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the training step encoded in the name, if any.
    #[must_use]
    pub const fn step(&self) -> Option<u64> {
        self.step
    }

    /// Get the evaluation metrics.
    ///
    /// Evaluation outputs are not parsed, so this is always `None`.
    #[must_use]
    pub const fn metrics(&self) -> Option<&serde_json::Value> {
        self.metrics.as_ref()
    }
}

impl Eq for CheckpointEval {}

impl PartialOrd for CheckpointEval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheckpointEval {
    // Numbered checkpoints first, in step order; unnumbered ones after, by name.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.step, other.step) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.name.cmp(&other.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.name.cmp(&other.name),
        }
    }
}

fn parse_step(name: &str) -> Option<u64> {
    let suffix = name.strip_prefix(CHECKPOINT_PREFIX)?;
    let digits_start = suffix
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(0, |(i, c)| i + c.len_utf8());
    suffix[digits_start..].parse().ok()
}
