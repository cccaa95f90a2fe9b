//! Error types for ppo-results
//!
//! Every message names the path or artifact involved so a failed run can be
//! fixed without re-running under a debugger.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ppo-results error types
#[derive(Error, Debug)]
pub enum Error {
    /// Experiment directory does not exist
    #[error("Experiment directory not found: {}", .0.display())]
    ExperimentNotFound(PathBuf),

    /// None of the requested experiments could be loaded
    #[error("No valid experiments found!")]
    NoExperiments,

    /// Tracking-log input directory does not exist
    #[error("Input directory not found at {}", .0.display())]
    InputDirMissing(PathBuf),

    /// No run directory (prefixed or fallback) under the tracking-log root
    #[error("No run directory found under {}", .0.display())]
    RunNotFound(PathBuf),

    /// Figure rendering failed
    #[error("Plot error: {0}")]
    Plot(String),

    /// Invalid caller input (empty column, bad table shape, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow/CSV error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON parse/serialize error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap a plotters drawing error.
    pub(crate) fn plot<E: std::fmt::Debug>(err: E) -> Self {
        Self::Plot(format!("{err:?}"))
    }
}
