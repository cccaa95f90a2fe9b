//! PNG figure rendering using plotters.
//!
//! Four figures are produced, each by one [`FigureRenderer`] method:
//!
//! | Figure | Method | Layout |
//! |---|---|---|
//! | `training_curves.png` | [`FigureRenderer::render_training_curves`] | 2×2 panels |
//! | `efficiency_comparison.png` | [`FigureRenderer::render_efficiency_comparison`] | grouped bars |
//! | `advantage_distribution.png` | [`FigureRenderer::render_distribution`] | histogram + CDF |
//! | `value_distribution.png` | [`FigureRenderer::render_distribution`] | histogram + box plot |

mod curves;
mod distribution;

use std::ops::Range;

use plotters::prelude::*;

use crate::{Error, Result};

pub use distribution::{DistributionKind, HISTOGRAM_BINS};

/// Training-curves figure file name.
pub const TRAINING_CURVES_FILE: &str = "training_curves.png";

/// Efficiency-comparison figure file name.
pub const EFFICIENCY_COMPARISON_FILE: &str = "efficiency_comparison.png";

const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 22;
const LABEL_SIZE: u32 = 14;

/// Figure sizes in inches, scaled by [`FigureRenderer::dpi`].
const TRAINING_CURVES_INCHES: (u32, u32) = (14, 10);
const EFFICIENCY_INCHES: (u32, u32) = (10, 6);
const DISTRIBUTION_INCHES: (u32, u32) = (15, 5);

/// Default pixels per inch.
pub const DEFAULT_DPI: u32 = 100;

/// Highest accepted resolution in pixels per inch.
pub const MAX_DPI: u32 = 1200;

/// Renders analysis figures to PNG files.
#[derive(Debug, Clone, Copy)]
pub struct FigureRenderer {
    dpi: u32,
}

impl Default for FigureRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DPI)
    }
}

impl FigureRenderer {
    /// Create a renderer with the given resolution in pixels per inch.
    #[must_use]
    pub const fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    /// Get the resolution in pixels per inch.
    #[must_use]
    pub const fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Bitmap size of a figure measured in inches.
    ///
    /// Rejects a resolution outside `1..=MAX_DPI` instead of allocating an
    /// empty or oversized bitmap.
    fn pixels(&self, inches: (u32, u32)) -> Result<(u32, u32)> {
        if !(1..=MAX_DPI).contains(&self.dpi) {
            return Err(Error::InvalidInput(format!(
                "figure resolution must be between 1 and {MAX_DPI} dpi, got {}",
                self.dpi
            )));
        }
        match (inches.0.checked_mul(self.dpi), inches.1.checked_mul(self.dpi)) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(Error::InvalidInput(format!(
                "figure of {}x{} inches at {} dpi is too large",
                inches.0, inches.1, self.dpi
            ))),
        }
    }
}

/// Axis range covering `values` with 5% padding; `0..1` when empty.
fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// Label formatter for categorical axes laid out at integer positions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn category_label(labels: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

fn series_color(idx: usize) -> RGBAColor {
    Palette99::pick(idx).to_rgba()
}
