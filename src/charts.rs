//! Chart rendering.
//!
//! Thin wrapper over `plotters`: one PNG per metric series, worker count on
//! a base-2 log x-axis, values connected in ascending worker-count order
//! with point markers.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use tracing::info;

use crate::series::MetricSeries;

/// Render every series into `out_dir`, one `<name>.png` per series.
///
/// Consumes the series; a batch is rendered exactly once.
pub fn render_all(series: Vec<MetricSeries>, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    for s in series {
        let path = out_dir.join(format!("{}.png", s.name));
        render_series(&s, &path)
            .with_context(|| format!("failed to render chart {}", path.display()))?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn render_series(series: &MetricSeries, path: &Path) -> Result<()> {
    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|&(count, value)| (count as f64, value))
        .collect();

    let root = BitMapBackend::new(
        path,
        (crate::defaults::CHART_WIDTH, crate::defaults::CHART_HEIGHT),
    )
    .into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = points.first().map(|p| p.0).unwrap_or(1.0);
    let x_max = points.last().map(|p| p.0).unwrap_or(1.0);
    // A single observed worker count would give a zero-width log range;
    // widen it one octave in each direction.
    let x_range = if x_min == x_max {
        (x_min / 2.0).max(0.5)..x_max * 2.0
    } else {
        x_min..x_max
    };

    let y_max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    let y_upper = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(series.name, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(x_range.log_scale().base(2.0), 0.0..y_upper)?;

    chart
        .configure_mesh()
        .x_desc("Worker Count")
        .y_desc(series.name)
        .x_labels(series.points.len().max(2))
        .x_label_formatter(&|count| format!("{count:.0}"))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 4, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}
