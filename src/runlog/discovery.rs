//! Run directory discovery

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{Error, Result};

/// Name prefix of run directories written by an offline tracker.
pub const DEFAULT_RUN_PREFIX: &str = "offline-run-";

/// Directory used when no prefixed run directory exists.
pub const DEFAULT_FALLBACK_RUN: &str = "latest-run";

/// Subdirectory of a run that holds the logged artifacts.
pub const RUN_FILES_DIR: &str = "files";

/// A run directory and its filesystem modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    path: PathBuf,
    modified: DateTime<Utc>,
}

impl RunDirectory {
    /// Create a run directory entry with an explicit timestamp.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, modified: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }

    /// Stat `path` and record its modification time.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the path cannot be stat'ed or the platform does
    /// not report modification times.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let modified = fs::metadata(&path)?.modified()?;
        Ok(Self::new(path, DateTime::<Utc>::from(modified)))
    }

    /// Get the run directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the modification time.
    #[must_use]
    pub const fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Get the `files` subdirectory holding the logged artifacts.
    #[must_use]
    pub fn files_dir(&self) -> PathBuf {
        self.path.join(RUN_FILES_DIR)
    }
}

/// Pick the most recently modified run; the first one wins a tie.
#[must_use]
pub fn select_latest(candidates: Vec<RunDirectory>) -> Option<RunDirectory> {
    candidates
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.modified > best.modified {
                candidate
            } else {
                best
            }
        })
}

/// Finds the latest run directory under a tracking-log root.
#[derive(Debug, Clone)]
pub struct RunLocator {
    root: PathBuf,
    prefix: String,
    fallback: String,
}

impl RunLocator {
    /// Create a locator with the default prefix and fallback names.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            prefix: DEFAULT_RUN_PREFIX.to_string(),
            fallback: DEFAULT_FALLBACK_RUN.to_string(),
        }
    }

    /// Set the run directory name prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the fallback directory name.
    #[must_use]
    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Get the tracking-log root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List candidate run directories.
    ///
    /// Prefixed subdirectories when any exist, otherwise the fallback
    /// directory if it exists, otherwise nothing.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the root cannot be listed.
    pub fn candidates(&self) -> Result<Vec<RunDirectory>> {
        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let matches = path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&self.prefix));
            if matches {
                runs.push(RunDirectory::from_path(path)?);
            }
        }

        if runs.is_empty() {
            let fallback = self.root.join(&self.fallback);
            if fallback.exists() {
                debug!(path = %fallback.display(), "no prefixed runs, using fallback");
                runs.push(RunDirectory::from_path(fallback)?);
            }
        }

        Ok(runs)
    }

    /// Select the most recently modified candidate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RunNotFound`] if there is no candidate at all.
    pub fn latest_run(&self) -> Result<RunDirectory> {
        select_latest(self.candidates()?).ok_or_else(|| Error::RunNotFound(self.root.clone()))
    }
}
