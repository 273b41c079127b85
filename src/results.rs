//! Result reporting and export.
//!
//! Two consumers sit beside the charts: a colorized per-run console report
//! for the operator watching the analysis, and a consolidated JSON summary
//! with enough metadata to reproduce the numbers later.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::metrics::RunMetrics;

/// Consolidated output of one analysis batch.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub metadata: SummaryMetadata,
    pub runs: Vec<RunMetrics>,
}

/// Provenance for a summary file.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub run_count: usize,
    pub system_info: SystemInfo,
}

/// Host details recorded for reproducibility.
#[derive(Debug, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub architecture: String,
    pub cpu_cores: usize,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            architecture: std::env::consts::ARCH.to_string(),
            cpu_cores: num_cpus::get(),
        }
    }
}

/// Write the consolidated JSON summary for a finished batch.
pub fn write_summary(path: &Path, runs: &[RunMetrics]) -> Result<()> {
    let summary = AnalysisSummary {
        metadata: SummaryMetadata {
            version: crate::VERSION.to_string(),
            timestamp: chrono::Utc::now(),
            run_count: runs.len(),
            system_info: SystemInfo::default(),
        },
        runs: runs.to_vec(),
    };

    let json = serde_json::to_string_pretty(&summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write summary to {}", path.display()))?;

    info!("summary written to {}", path.display());
    Ok(())
}

/// Print one run's metrics as a human-readable block on stdout.
pub fn print_run_report(metrics: &RunMetrics) {
    println!(
        "{}",
        format!("Worker count {}", metrics.worker_count).bold()
    );
    println!("  Avg request:        {:.3} ms", metrics.avg_request_ms);
    println!("  Avg connection:     {:.3} ms", metrics.avg_connection_ms);
    println!(
        "  Request/ms/worker:  {:.4}",
        metrics.req_per_ms_per_worker
    );
    println!(
        "  Request/s/worker:   {:.2}",
        metrics.req_per_s_per_worker
    );
    println!("  Request/ms:         {:.4}", metrics.req_per_ms_total);
    println!("  Request/s:          {:.2}", metrics.req_per_s_total);
    println!(
        "  Duration variance:  {} ms^2",
        format!("{:.2}", metrics.variance).cyan()
    );
    println!(
        "  Duration stdev:     {} ms",
        format!("{:.2}", metrics.stdev).cyan()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_metrics() -> Vec<RunMetrics> {
        vec![RunMetrics {
            worker_count: 2,
            avg_request_ms: 3.0,
            avg_connection_ms: 2.0,
            req_per_ms_per_worker: 1.0 / 3.0,
            req_per_s_per_worker: 1000.0 / 3.0,
            req_per_ms_total: 2.0 / 3.0,
            req_per_s_total: 2000.0 / 3.0,
            variance: 5000.0,
            stdev: 5000.0_f64.sqrt(),
        }]
    }

    #[test]
    fn summary_round_trips_through_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        write_summary(&path, &sample_metrics()).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let parsed: AnalysisSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.metadata.run_count, 1);
        assert_eq!(parsed.runs, sample_metrics());
    }

    #[test]
    fn system_info_is_populated() {
        let info = SystemInfo::default();

        assert!(!info.os.is_empty());
        assert!(!info.architecture.is_empty());
        assert!(info.cpu_cores > 0);
    }
}
