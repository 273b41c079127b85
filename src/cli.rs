use clap::Parser;
use std::path::PathBuf;

/// Load Test Analysis - aggregate per-worker results and chart how they
/// scale with worker count
#[derive(Parser, Debug, Clone)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Directory holding one CSV result file per load test run
    #[clap(short = 'i', long)]
    pub input_dir: PathBuf,

    /// Directory the chart images are written into (created if absent)
    #[clap(short = 'o', long)]
    pub output_dir: PathBuf,

    /// Optional path for a consolidated JSON summary of all run metrics
    #[clap(long)]
    pub summary_file: Option<PathBuf>,

    /// Verbose output (per-record aggregation diagnostics)
    #[clap(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}
