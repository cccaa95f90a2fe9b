//! Logging initialization.

use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

use crate::{Error, Result};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a console `tracing` subscriber filtered by `RUST_LOG`.
///
/// # Errors
///
/// Returns [`Error::Other`] if a global subscriber is already installed.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|e| Error::Other(format!("invalid log filter: {e}")))?;

    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("failed to install log subscriber: {e}")))
}
