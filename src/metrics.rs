//! Run-level metric derivation.
//!
//! A [`Run`] is reduced to a fixed set of scalar metrics describing how the
//! configuration performed: average durations, request rates per worker and
//! in aggregate, and the spread of per-worker workload totals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;
use crate::records::{Run, WorkerRecord};

/// Derived, read-only summary of one run. Computed once, never mutated.
///
/// Rates come in two flavours: per worker (how fast a single worker turned
/// requests around) and aggregate (per-worker rate scaled by the worker
/// count). Variance and standard deviation are taken over the per-worker
/// total request durations and expose how evenly the load was spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub worker_count: usize,
    pub avg_request_ms: f64,
    pub avg_connection_ms: f64,
    pub req_per_ms_per_worker: f64,
    pub req_per_s_per_worker: f64,
    pub req_per_ms_total: f64,
    pub req_per_s_total: f64,
    pub variance: f64,
    pub stdev: f64,
}

impl RunMetrics {
    /// Aggregate a run's worker records into its derived metrics.
    ///
    /// Deterministic for a given run. Fails with
    /// [`AnalysisError::DivisionByZero`] when a ratio's denominator sums to
    /// zero, which only happens for degenerate runs (no successful or no
    /// completed requests at all).
    pub fn from_run(run: &Run) -> Result<Self, AnalysisError> {
        let workers = run.workers();
        let worker_count = run.worker_count();

        for worker in workers {
            debug!(
                worker = worker.worker_id,
                request_ms = worker.total_request_duration_ms,
                success = worker.success,
                "aggregating worker record"
            );
        }

        let total_request_ms = sum_by(workers, |w| w.total_request_duration_ms);
        let total_completed = sum_by(workers, |w| w.requests_completed);
        let total_success = sum_by(workers, |w| w.success);
        let total_connection_ms = sum_by(workers, |w| w.total_connection_duration_ms);

        let avg_connection_ms = ratio(
            total_connection_ms,
            total_success,
            "average connection time",
            run,
        )?;
        let avg_request_ms = ratio(
            total_request_ms,
            total_completed,
            "average request duration",
            run,
        )?;
        let req_per_ms_per_worker = ratio(
            total_completed,
            total_request_ms,
            "requests per millisecond",
            run,
        )?;
        let req_per_s_per_worker = req_per_ms_per_worker * 1000.0;

        let durations: Vec<u64> = workers
            .iter()
            .map(|w| w.total_request_duration_ms)
            .collect();
        let variance = sample_variance(&durations);

        Ok(Self {
            worker_count,
            avg_request_ms,
            avg_connection_ms,
            req_per_ms_per_worker,
            req_per_s_per_worker,
            req_per_ms_total: req_per_ms_per_worker * worker_count as f64,
            req_per_s_total: req_per_s_per_worker * worker_count as f64,
            variance,
            stdev: variance.sqrt(),
        })
    }
}

fn sum_by(workers: &[WorkerRecord], field: impl Fn(&WorkerRecord) -> u64) -> u64 {
    workers.iter().map(field).sum()
}

fn ratio(
    numerator: u64,
    denominator: u64,
    metric: &'static str,
    run: &Run,
) -> Result<f64, AnalysisError> {
    if denominator == 0 {
        return Err(AnalysisError::DivisionByZero {
            file: run.source().to_path_buf(),
            metric,
        });
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Unbiased sample variance (n-1 divisor) of per-worker duration totals.
///
/// A single worker gives no spread to estimate, so one-sample runs are
/// defined as zero variance. This keeps the variance and stdev charts
/// well-defined for the degenerate one-worker configuration.
fn sample_variance(durations: &[u64]) -> f64 {
    if durations.len() < 2 {
        return 0.0;
    }
    let n = durations.len() as f64;
    let mean = durations.iter().map(|&d| d as f64).sum::<f64>() / n;
    durations
        .iter()
        .map(|&d| (d as f64 - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0)
}
