//! Offline tracking-log runs
//!
//! An offline experiment tracker writes one directory per run:
//!
//! ```text
//! wandb/
//! ├── offline-run-20240611_101500-1a2b3c/
//! │   └── files/
//! │       ├── advantages__iter_0.csv.gz   → MetricTable "advantages__iter_0"
//! │       ├── values__iter_0.csv          → MetricTable "values__iter_0"
//! │       └── PPOGradientVariance.json    → JSON artifact "PPOGradientVariance"
//! └── latest-run/                          fallback when no prefixed run exists
//! ```
//!
//! [`RunLocator`] picks the most recently modified run, then
//! [`load_metric_tables`] and [`load_json_artifacts`] read its artifacts.

mod discovery;
mod loader;
mod metric_table;

pub use discovery::{
    select_latest, RunDirectory, RunLocator, DEFAULT_FALLBACK_RUN, DEFAULT_RUN_PREFIX,
    RUN_FILES_DIR,
};
pub use loader::{load_json_artifacts, load_metric_tables, JsonArtifacts};
pub use metric_table::{MetricTable, MetricTables, LABEL_DELIMITER};
