//! Experiment directories
//!
//! Each experiment lives under an experiment root and is summarised into an
//! [`ExperimentRecord`]:
//!
//! ```text
//! ExperimentRecord (1) ──< CheckpointEval (N)   [evaluation/ckpt--*/done]
//!        │
//!        └── config.json (optional)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ppo_results::experiment::ExperimentLoader;
//!
//! let loader = ExperimentLoader::new("experiments");
//! let records = loader.load_all(&["baseline", "combined_full"]);
//! for record in &records {
//!     println!("{}: {} checkpoints", record.name(), record.checkpoints().len());
//! }
//! ```

mod checkpoint;
mod experiment_record;
mod loader;

pub use checkpoint::{CheckpointEval, CHECKPOINT_PREFIX};
pub use experiment_record::{ExperimentRecord, ExperimentRecordBuilder};
pub use loader::{ExperimentLoader, CONFIG_FILE, DONE_MARKER, EVALUATION_DIR};
