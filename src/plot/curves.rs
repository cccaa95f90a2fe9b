//! Training-curve and efficiency figures for the ablation comparison.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use super::{
    category_label, padded_range, series_color, FigureRenderer, CAPTION_SIZE, EFFICIENCY_INCHES,
    FONT, LABEL_SIZE, TRAINING_CURVES_INCHES,
};
use crate::ablation::AblationTable;
use crate::experiment::ExperimentRecord;
use crate::{Error, Result};

/// Titles and axis descriptions of one panel.
struct Panel {
    title: &'static str,
    x_desc: &'static str,
    y_desc: &'static str,
}

const ACCURACY_PANEL: Panel = Panel {
    title: "Test Accuracy over Training",
    x_desc: "Iteration",
    y_desc: "Accuracy (%)",
};

const LOSS_PANEL: Panel = Panel {
    title: "Training Loss",
    x_desc: "Iteration",
    y_desc: "Loss",
};

const MC_SAMPLES_PANEL: Panel = Panel {
    title: "Distribution of MC Samples (Adaptive)",
    x_desc: "Number of MC Samples",
    y_desc: "Frequency",
};

const ADVANTAGE_STATS_PANEL: Panel = Panel {
    title: "Advantage Statistics over Time",
    x_desc: "Iteration",
    y_desc: "Advantage Std",
};

/// A named line series.
type Series = (String, Vec<(f64, f64)>);

impl FigureRenderer {
    /// Render the 2×2 training-curves figure.
    ///
    /// Accuracy and loss panels carry one legend entry per experiment. No
    /// per-iteration metrics are parsed from the experiment directories yet,
    /// so every series is empty and the MC-sample and advantage panels only
    /// show their axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the resolution is outside
    /// `1..=MAX_DPI`, and [`Error::Plot`] if drawing or PNG encoding fails.
    pub fn render_training_curves(
        &self,
        experiments: &[ExperimentRecord],
        path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(path, self.pixels(TRAINING_CURVES_INCHES)?).into_drawing_area();
        root.fill(&WHITE).map_err(Error::plot)?;

        let series: Vec<Series> = experiments
            .iter()
            .map(|exp| (exp.name().to_string(), Vec::new()))
            .collect();

        let panels = root.split_evenly((2, 2));
        draw_line_panel(&panels[0], &ACCURACY_PANEL, &series)?;
        draw_line_panel(&panels[1], &LOSS_PANEL, &series)?;
        draw_line_panel(&panels[2], &MC_SAMPLES_PANEL, &[])?;
        draw_line_panel(&panels[3], &ADVANTAGE_STATS_PANEL, &[])?;

        root.present().map_err(Error::plot)?;
        info!("Saved plot: {}", path.display());
        Ok(())
    }

    /// Render the grouped-bar efficiency comparison, one group per method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the resolution is outside
    /// `1..=MAX_DPI`, and [`Error::Plot`] if drawing or PNG encoding fails.
    #[allow(clippy::cast_precision_loss)]
    pub fn render_efficiency_comparison(&self, table: &AblationTable, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, self.pixels(EFFICIENCY_INCHES)?).into_drawing_area();
        root.fill(&WHITE).map_err(Error::plot)?;

        let methods: Vec<String> = table.rows().iter().map(|r| r.method.clone()).collect();
        // Time per iteration is not recorded yet; the bar stays at zero.
        let time_per_iter: Vec<f64> = vec![0.0; methods.len()];
        let mc_samples: Vec<f64> = table
            .rows()
            .iter()
            .map(|r| r.avg_mc_samples as f64)
            .collect();

        let n = methods.len().max(1) as f64;
        let y_max = time_per_iter
            .iter()
            .chain(&mc_samples)
            .copied()
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Computational Efficiency Comparison",
                (FONT, CAPTION_SIZE).into_font(),
            )
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..(n - 0.5), 0.0..y_max)
            .map_err(Error::plot)?;

        let formatter = |x: &f64| category_label(&methods, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(methods.len().max(1))
            .x_label_formatter(&formatter)
            .x_desc("Method")
            .y_desc("Value")
            .axis_desc_style((FONT, LABEL_SIZE).into_font())
            .light_line_style(BLACK.mix(0.05))
            .bold_line_style(BLACK.mix(0.15))
            .draw()
            .map_err(Error::plot)?;

        let width = 0.35;
        let groups = [
            ("Time per Iter (min)", &time_per_iter, -width),
            ("Avg MC Samples", &mc_samples, 0.0),
        ];
        for (idx, (label, values, offset)) in groups.into_iter().enumerate() {
            let color = series_color(idx);
            chart
                .draw_series(values.iter().enumerate().map(|(i, &v)| {
                    let x0 = i as f64 + offset;
                    Rectangle::new([(x0, 0.0), (x0 + width, v)], color.mix(0.8).filled())
                }))
                .map_err(Error::plot)?
                .label(label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(Error::plot)?;

        root.present().map_err(Error::plot)?;
        info!("Saved plot: {}", path.display());
        Ok(())
    }
}

fn draw_line_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    series: &[Series],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let x_range = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
    let y_range = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT, CAPTION_SIZE).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)
        .map_err(Error::plot)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .axis_desc_style((FONT, LABEL_SIZE).into_font())
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(Error::plot)?;

    for (idx, (label, points)) in series.iter().enumerate() {
        let color = series_color(idx);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(Error::plot)?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(Error::plot)?;
    }

    Ok(())
}
