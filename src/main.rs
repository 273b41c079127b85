//! # Load Test Analysis - Main Entry Point
//!
//! Command-line shell around the analysis pipeline. The program performs
//! these operations in order:
//!
//! 1. **Initialize logging**: structured logging with tracing, controlled
//!    via `RUST_LOG` or the `--verbose` flag
//! 2. **Parse arguments**: input directory, output directory, optional
//!    summary file
//! 3. **Discover runs**: parse every `.csv` result file into a run keyed by
//!    worker count
//! 4. **Aggregate and assemble series**: derive per-run metrics and the
//!    metric-vs-worker-count series
//! 5. **Report**: print the per-run console report
//! 6. **Render**: write one PNG chart per metric series
//! 7. **Export**: optionally write the consolidated JSON summary
//!
//! ## Error Handling
//!
//! Every parse or aggregation failure is fatal: the process reports the
//! offending file and field on stderr and exits non-zero before any chart
//! is written. There is no partial output for a failed batch.

use anyhow::{bail, Context, Result};
use clap::Parser;
use loadtest_analysis::{
    charts::render_all,
    cli::Args,
    records::discover_runs,
    results::{print_run_report, write_summary},
    series::build_series,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins when set; --verbose only raises the default level.
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting load test analysis");
    info!("Configuration: {:?}", args);

    let runs = discover_runs(&args.input_dir)
        .with_context(|| format!("failed to load runs from {}", args.input_dir.display()))?;
    if runs.is_empty() {
        bail!(
            "no .csv result files found in {}",
            args.input_dir.display()
        );
    }
    info!(
        "loaded {} runs with worker counts {:?}",
        runs.len(),
        runs.keys().collect::<Vec<_>>()
    );

    // Aggregation precedes rendering so a bad run aborts the batch before
    // any chart exists on disk.
    let (metrics, series) = build_series(&runs)?;

    for run_metrics in &metrics {
        print_run_report(run_metrics);
    }

    render_all(series, &args.output_dir)?;

    if let Some(ref summary_file) = args.summary_file {
        write_summary(summary_file, &metrics)?;
    }

    info!("Load test analysis completed successfully");
    Ok(())
}
