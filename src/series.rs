//! Metric series assembly across runs.
//!
//! Each aggregated run contributes one point per chart. The builder owns the
//! fixed set of series, appends to all of them in lock step, and hands the
//! finished collection to the renderer.

use std::collections::BTreeMap;

use crate::error::AnalysisError;
use crate::metrics::RunMetrics;
use crate::records::Run;

/// Chart names, one per derived metric, in render order.
///
/// These names double as output filenames, so they stay lowercase and
/// filesystem-safe.
pub const SERIES_NAMES: [&str; 8] = [
    "average request duration ms",
    "average connection time ms",
    "RPMS per worker",
    "RPS per worker",
    "RPS",
    "RPMS",
    "variance",
    "standard deviation ms",
];

/// One named metric across every run, ordered by ascending worker count.
///
/// Built incrementally while runs are aggregated, consumed exactly once by
/// the chart renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub name: &'static str,
    pub points: Vec<(usize, f64)>,
}

/// Accumulates the eight metric series as runs are aggregated.
#[derive(Debug)]
pub struct SeriesBuilder {
    series: Vec<MetricSeries>,
}

impl SeriesBuilder {
    /// Start a batch with every series present and empty.
    pub fn new() -> Self {
        Self {
            series: SERIES_NAMES
                .iter()
                .map(|&name| MetricSeries {
                    name,
                    points: Vec::new(),
                })
                .collect(),
        }
    }

    /// Append one run's metrics to every series.
    ///
    /// Callers feed runs in ascending worker-count order; the builder does
    /// not reorder.
    pub fn push(&mut self, metrics: &RunMetrics) {
        let worker_count = metrics.worker_count;
        let values = [
            metrics.avg_request_ms,
            metrics.avg_connection_ms,
            metrics.req_per_ms_per_worker,
            metrics.req_per_s_per_worker,
            metrics.req_per_s_total,
            metrics.req_per_ms_total,
            metrics.variance,
            metrics.stdev,
        ];
        for (series, value) in self.series.iter_mut().zip(values) {
            series.points.push((worker_count, value));
        }
    }

    /// Hand the finished series over for rendering.
    pub fn finish(self) -> Vec<MetricSeries> {
        self.series
    }
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate every run in ascending worker-count order and assemble the
/// metric series.
///
/// Fail-fast: the first run that cannot be aggregated aborts the whole
/// batch, so a failed batch never produces charts. Returns the per-run
/// metrics alongside the series; the metrics feed the console report and
/// the JSON summary.
pub fn build_series(
    runs: &BTreeMap<usize, Run>,
) -> Result<(Vec<RunMetrics>, Vec<MetricSeries>), AnalysisError> {
    let mut builder = SeriesBuilder::new();
    let mut all_metrics = Vec::with_capacity(runs.len());

    for run in runs.values() {
        let metrics = RunMetrics::from_run(run)?;
        builder.push(&metrics);
        all_metrics.push(metrics);
    }

    Ok((all_metrics, builder.finish()))
}
