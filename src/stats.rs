//! Descriptive statistics over metric columns
//!
//! Conventions follow the usual dataframe defaults: NaN values are skipped
//! and the standard deviation is the sample estimate (N - 1 denominator).

use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::{Error, Result};

/// Mean, sample standard deviation, minimum and maximum of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    /// Number of values that went into the statistics
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (NaN for fewer than two values)
    pub std: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl SummaryStats {
    /// Compute statistics over `values`, ignoring NaN.
    ///
    /// Returns `None` when no finite-or-infinite (non-NaN) value remains.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ppo_results::stats::SummaryStats;
    ///
    /// let stats = SummaryStats::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert!((stats.mean - 2.5).abs() < 1e-12);
    /// assert!((stats.std - 1.290_994).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values.iter().filter(|v| !v.is_nan()) {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = sum / count as f64;
        let std = if count < 2 {
            f64::NAN
        } else {
            let sq: f64 = values
                .iter()
                .filter(|v| !v.is_nan())
                .map(|v| (v - mean).powi(2))
                .sum();
            #[allow(clippy::cast_precision_loss)]
            let var = sq / (count - 1) as f64;
            var.sqrt()
        };

        Some(Self {
            count,
            mean,
            std,
            min,
            max,
        })
    }
}

/// Extract a column of a record batch as `f64` values.
///
/// Any numeric or string column is cast to Float64; nulls and entries that
/// fail to parse are dropped.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the column index is out of bounds, or an
/// Arrow error if the column type cannot be cast to Float64.
pub fn column_values(batch: &RecordBatch, column_index: usize) -> Result<Vec<f64>> {
    if column_index >= batch.num_columns() {
        return Err(Error::InvalidInput(format!(
            "Column index {} out of bounds (batch has {} columns)",
            column_index,
            batch.num_columns()
        )));
    }

    let casted = cast(batch.column(column_index), &DataType::Float64)?;
    let array = casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| Error::Other("Failed to downcast to Float64Array".to_string()))?;

    Ok(array.iter().flatten().collect())
}

/// Five-number summary used by box plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// Lower whisker: smallest value within 1.5 IQR of Q1
    pub lower_whisker: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Upper whisker: largest value within 1.5 IQR of Q3
    pub upper_whisker: f64,
}

impl Quartiles {
    /// Compute quartiles with linear interpolation between order statistics.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile_sorted(&sorted, 0.25);
        let median = percentile_sorted(&sorted, 0.5);
        let q3 = percentile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - 1.5 * iqr;
        let hi_fence = q3 + 1.5 * iqr;

        // whiskers never fall inside the box
        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= lo_fence)
            .map_or(q1, |v| v.min(q1));
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= hi_fence)
            .map_or(q3, |v| v.max(q3));

        Some(Self {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
        })
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// One histogram bin: `[start, end)`, the last bin is closed on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    /// Left edge
    pub start: f64,
    /// Right edge
    pub end: f64,
    /// Number of values in the bin
    pub count: usize,
}

/// Bin `values` into `bins` equal-width bins spanning their range.
///
/// A constant column gets a unit-wide range centred on the value.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

/// Empirical cumulative distribution: sorted values paired with `i / n`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn empirical_cdf(values: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, v)| (v, (i + 1) as f64 / n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    #[test]
    fn test_summary_stats_known_column() {
        let stats = SummaryStats::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 2.5).abs() < 1e-12);
        assert!((stats.std - 1.29).abs() < 0.01);
        assert!((stats.min - 1.0).abs() < f64::EPSILON);
        assert!((stats.max - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_stats_skips_nan() {
        let stats = SummaryStats::from_values(&[f64::NAN, 2.0, 4.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.mean - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_stats_single_value_std_is_nan() {
        let stats = SummaryStats::from_values(&[7.0]).unwrap();
        assert!(stats.std.is_nan());
    }

    #[test]
    fn test_summary_stats_empty() {
        assert!(SummaryStats::from_values(&[]).is_none());
        assert!(SummaryStats::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_column_values_casts_ints_and_strings() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("step", DataType::Int64, false),
            Field::new("raw", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3])),
                Arc::new(StringArray::from(vec![Some("0.5"), None, Some("1.5")])),
            ],
        )
        .unwrap();

        assert_eq!(column_values(&batch, 0).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(column_values(&batch, 1).unwrap(), vec![0.5, 1.5]);
        assert!(matches!(
            column_values(&batch, 2),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_quartiles() {
        let q = Quartiles::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((q.q1 - 2.0).abs() < 1e-12);
        assert!((q.median - 3.0).abs() < 1e-12);
        assert!((q.q3 - 4.0).abs() < 1e-12);
        assert!((q.lower_whisker - 1.0).abs() < 1e-12);
        assert!((q.upper_whisker - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_quartiles_outlier_outside_whisker() {
        let q = Quartiles::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert!((q.upper_whisker - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_counts_everything() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let bins = histogram(&values, 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[9].count, 10);
    }

    #[test]
    fn test_histogram_constant_column() {
        let bins = histogram(&[3.0, 3.0, 3.0], 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert!(bins[0].start < 3.0 && bins[3].end > 3.0);
    }

    #[test]
    fn test_empirical_cdf() {
        let cdf = empirical_cdf(&[3.0, 1.0, 2.0, 4.0]);
        assert_eq!(cdf.first(), Some(&(1.0, 0.25)));
        assert_eq!(cdf.last(), Some(&(4.0, 1.0)));
    }
}
