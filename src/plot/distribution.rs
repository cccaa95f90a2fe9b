//! Advantage and value distribution figures.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use super::{
    category_label, padded_range, series_color, FigureRenderer, CAPTION_SIZE,
    DISTRIBUTION_INCHES, FONT, LABEL_SIZE,
};
use crate::runlog::{MetricTable, MetricTables};
use crate::stats::{empirical_cdf, histogram, Quartiles};
use crate::{Error, Result};

/// Number of histogram bins per series.
pub const HISTOGRAM_BINS: usize = 50;

/// Which logged quantity a distribution figure shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    /// Per-step advantage estimates: histogram + cumulative distribution
    Advantages,
    /// Value-head estimates: histogram + box plot
    Values,
}

impl DistributionKind {
    /// Substring that selects the tables of this kind (case-insensitive).
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Advantages => "advantages",
            Self::Values => "values",
        }
    }

    /// Output file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Advantages => "advantage_distribution.png",
            Self::Values => "value_distribution.png",
        }
    }

    /// Human-readable name used in titles and log lines.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Advantages => "Advantage",
            Self::Values => "Value",
        }
    }

    /// Axis description of the logged quantity.
    #[must_use]
    pub const fn axis_label(self) -> &'static str {
        match self {
            Self::Advantages => "Advantage Value",
            Self::Values => "Value Estimate",
        }
    }
}

/// A table's label and its first-column values.
type Column = (String, Vec<f64>);

impl FigureRenderer {
    /// Render the distribution figure for every table matching `kind`.
    ///
    /// Returns `Ok(false)` without touching `path` when no table matches.
    /// Tables whose first column cannot be read as numbers are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the resolution is outside
    /// `1..=MAX_DPI`, and [`Error::Plot`] if drawing or PNG encoding fails.
    pub fn render_distribution(
        &self,
        kind: DistributionKind,
        tables: &MetricTables,
        path: &Path,
    ) -> Result<bool> {
        info!("=== Plotting {} Distribution ===", kind.title());

        let matched = tables.matching(kind.keyword());
        if matched.is_empty() {
            info!("No {} distribution data found", kind.keyword().trim_end_matches('s'));
            return Ok(false);
        }
        let columns = first_columns(&matched);

        let root = BitMapBackend::new(path, self.pixels(DISTRIBUTION_INCHES)?).into_drawing_area();
        root.fill(&WHITE).map_err(Error::plot)?;
        let panels = root.split_evenly((1, 2));

        draw_histogram(&panels[0], kind, &columns)?;
        match kind {
            DistributionKind::Advantages => draw_cdf(&panels[1], kind, &columns)?,
            DistributionKind::Values => draw_boxplot(&panels[1], kind, &columns)?,
        }

        root.present().map_err(Error::plot)?;
        info!("Saved: {}", path.display());
        Ok(true)
    }
}

fn first_columns(tables: &[&MetricTable]) -> Vec<Column> {
    tables
        .iter()
        .filter_map(|table| match table.first_column() {
            Ok(values) => Some((table.label().to_string(), values)),
            Err(err) => {
                warn!("Skipping {}: {err}", table.name());
                None
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    kind: DistributionKind,
    columns: &[Column],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let binned: Vec<_> = columns
        .iter()
        .map(|(label, values)| (label, histogram(values, HISTOGRAM_BINS)))
        .collect();

    let x_range = padded_range(columns.iter().flat_map(|(_, v)| v.iter().copied()));
    let y_max = binned
        .iter()
        .flat_map(|(_, bins)| bins.iter().map(|b| b.count))
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("{} Distribution", kind.title()),
            (FONT, CAPTION_SIZE).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, 0.0..y_max)
        .map_err(Error::plot)?;

    chart
        .configure_mesh()
        .x_desc(kind.axis_label())
        .y_desc("Frequency")
        .axis_desc_style((FONT, LABEL_SIZE).into_font())
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(Error::plot)?;

    for (idx, (label, bins)) in binned.iter().enumerate() {
        let color = series_color(idx);
        chart
            .draw_series(bins.iter().map(|b| {
                Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], color.mix(0.7).filled())
            }))
            .map_err(Error::plot)?
            .label(label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(Error::plot)?;

    Ok(())
}

fn draw_cdf<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    kind: DistributionKind,
    columns: &[Column],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let x_range = padded_range(columns.iter().flat_map(|(_, v)| v.iter().copied()));

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("Cumulative {} Distribution", kind.title()),
            (FONT, CAPTION_SIZE).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, 0.0..1.05)
        .map_err(Error::plot)?;

    chart
        .configure_mesh()
        .x_desc(kind.axis_label())
        .y_desc("Cumulative Probability")
        .axis_desc_style((FONT, LABEL_SIZE).into_font())
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(Error::plot)?;

    for (idx, (label, values)) in columns.iter().enumerate() {
        let color = series_color(idx);
        chart
            .draw_series(LineSeries::new(empirical_cdf(values), color.stroke_width(2)))
            .map_err(Error::plot)?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(Error::plot)?;

    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn draw_boxplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    kind: DistributionKind,
    columns: &[Column],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let labels: Vec<String> = columns.iter().map(|(label, _)| label.clone()).collect();
    let boxes: Vec<(f64, Quartiles)> = columns
        .iter()
        .enumerate()
        .filter_map(|(i, (_, values))| Quartiles::from_values(values).map(|q| (i as f64, q)))
        .collect();

    let n = columns.len().max(1) as f64;
    let y_range = padded_range(
        boxes
            .iter()
            .flat_map(|(_, q)| [q.lower_whisker, q.upper_whisker]),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("{} Distribution (Box Plot)", kind.title()),
            (FONT, CAPTION_SIZE).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5..(n - 0.5), y_range)
        .map_err(Error::plot)?;

    let formatter = |x: &f64| category_label(&labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(columns.len().max(1))
        .x_label_formatter(&formatter)
        .y_desc(kind.axis_label())
        .axis_desc_style((FONT, LABEL_SIZE).into_font())
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(Error::plot)?;

    let half = 0.25;
    let cap = 0.12;
    let stroke = BLACK.stroke_width(1);

    chart
        .draw_series(
            boxes
                .iter()
                .map(|(x, q)| Rectangle::new([(x - half, q.q1), (x + half, q.q3)], stroke)),
        )
        .map_err(Error::plot)?;

    let segments = boxes.iter().flat_map(|&(x, q)| {
        [
            vec![(x - half, q.median), (x + half, q.median)],
            vec![(x, q.q3), (x, q.upper_whisker)],
            vec![(x, q.q1), (x, q.lower_whisker)],
            vec![(x - cap, q.upper_whisker), (x + cap, q.upper_whisker)],
            vec![(x - cap, q.lower_whisker), (x + cap, q.lower_whisker)],
        ]
    });
    chart
        .draw_series(segments.map(|points| PathElement::new(points, stroke)))
        .map_err(Error::plot)?;

    Ok(())
}
