//! # Load Test Analysis Library
//!
//! Aggregates per-worker load test measurements and renders comparative
//! charts across worker-count configurations. Given a directory of result
//! files (one CSV per run, each run using a distinct number of concurrent
//! workers), the library derives run-level statistics and produces one chart
//! per metric showing how throughput, latency, and variance scale with
//! worker count.
//!
//! ## Pipeline
//!
//! 1. **Discovery**: every `.csv` file in the input directory is parsed into
//!    a [`records::Run`], keyed by its worker count (the number of records
//!    in the file).
//! 2. **Aggregation**: each run is reduced to [`metrics::RunMetrics`], a
//!    fixed set of derived scalars (average durations, request rates,
//!    duration spread).
//! 3. **Series assembly**: the per-run metrics are collected into eight
//!    named [`series::MetricSeries`], ordered by ascending worker count.
//! 4. **Rendering**: each series becomes one PNG with worker count on a
//!    base-2 log x-axis.
//!
//! Processing is single-threaded and synchronous; a batch is bounded by the
//! number of input files and runs to completion or fails fast on the first
//! malformed or degenerate run.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use loadtest_analysis::{charts, records, series};
//!
//! fn main() -> anyhow::Result<()> {
//!     let runs = records::discover_runs("results".as_ref())?;
//!     let (metrics, all_series) = series::build_series(&runs)?;
//!     charts::render_all(all_series, "charts".as_ref())?;
//!     println!("aggregated {} runs", metrics.len());
//!     Ok(())
//! }
//! ```

/// Chart rendering: one PNG per metric series.
pub mod charts;

/// Command-line interface definition.
pub mod cli;

/// Typed error kinds for parsing and aggregation failures.
pub mod error;

/// Run-level metric derivation from worker records.
pub mod metrics;

/// Result file parsing and run discovery.
pub mod records;

/// Console reporting and JSON summary export.
pub mod results;

/// Metric series assembly across runs.
pub mod series;

pub use cli::Args;
pub use error::AnalysisError;
pub use metrics::RunMetrics;
pub use records::{discover_runs, Run, WorkerRecord};
pub use series::{build_series, MetricSeries, SeriesBuilder};

/// The current version of the analysis tool, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values.
pub mod defaults {
    /// Chart width in pixels.
    ///
    /// Wide enough that tick labels at every observed worker count stay
    /// readable for batches spanning 1..=1024 workers.
    pub const CHART_WIDTH: u32 = 1024;

    /// Chart height in pixels.
    pub const CHART_HEIGHT: u32 = 768;
}
