//! # ppo-results: experiment aggregation and training-log analysis
//!
//! Two pipelines for a PPO-style RL training setup:
//!
//! - [`analyze`]: load experiment directories ([`experiment`]), build the
//!   ablation table ([`ablation`]) and render comparison figures ([`plot`]).
//! - [`visualize`]: pick the latest offline tracking-log run ([`runlog`]),
//!   plot advantage/value distributions and write text reports ([`report`]).
//!
//! Both are sequential single passes: read inputs, write outputs, exit.
//! Reruns overwrite earlier outputs.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ppo_results::config::AnalyzeConfig;
//!
//! let config = AnalyzeConfig::new(["baseline", "combined_full"])
//!     .exp_root("experiments")
//!     .output_dir("paper_results");
//! let outputs = ppo_results::analyze::run(&config)?;
//! println!("table written to {}", outputs.csv.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod ablation;
pub mod analyze;
pub mod cli;
pub mod config;
pub mod error;
pub mod experiment;
pub mod plot;
pub mod report;
pub mod runlog;
pub mod stats;
pub mod telemetry;
pub mod visualize;

pub use error::{Error, Result};
