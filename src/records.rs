//! Raw result file parsing.
//!
//! Each load test run writes one CSV file with a header row and one data row
//! per worker. This module reads a file into typed [`WorkerRecord`] values,
//! wraps them in a [`Run`], and discovers whole directories of result files
//! keyed by worker count.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, warn};

use crate::error::AnalysisError;

/// Column names a result file must carry, exactly as the load test client
/// writes them.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "worker_id",
    "success",
    "failed",
    "timeouts",
    "channelsOpened",
    "channelsReused",
    "channelsClosed",
    "channelConnected",
    "channelConnectionErrors",
    "connectDurationMs",
    "requestsRegistered",
    "requestCompleted",
    "requestDurationMs",
];

/// One worker's counters for a single run. Immutable once parsed.
///
/// Duration fields are totals in milliseconds accumulated over the whole
/// run, not per-request values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRecord {
    pub worker_id: u64,
    pub success: u64,
    pub failed: u64,
    pub timeouts: u64,
    pub channels_opened: u64,
    pub channels_reused: u64,
    pub channels_closed: u64,
    pub channels_connected: u64,
    pub channel_connection_errors: u64,
    pub total_connection_duration_ms: u64,
    pub requests_registered: u64,
    pub requests_completed: u64,
    pub total_request_duration_ms: u64,
}

/// The records produced by one load test execution.
///
/// The worker count of a run is the number of records it holds, never a
/// field value. A run always holds at least one record; constructing one
/// from an empty collection fails with [`AnalysisError::EmptyRun`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    source: PathBuf,
    workers: Vec<WorkerRecord>,
}

impl Run {
    /// Wrap parsed records, rejecting the degenerate empty run.
    pub fn new(
        workers: Vec<WorkerRecord>,
        source: impl Into<PathBuf>,
    ) -> Result<Self, AnalysisError> {
        let source = source.into();
        if workers.is_empty() {
            return Err(AnalysisError::EmptyRun { file: source });
        }
        Ok(Self { source, workers })
    }

    /// Parse a result file and construct the run it describes.
    pub fn from_file(path: &Path) -> Result<Self, AnalysisError> {
        let workers = parse_records(path)?;
        Self::new(workers, path)
    }

    /// Number of concurrent workers in this run.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// The per-worker records, in file order.
    pub fn workers(&self) -> &[WorkerRecord] {
        &self.workers
    }

    /// The result file this run was parsed from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Header positions of the required columns within one result file.
///
/// Resolved once per file so row parsing is a plain indexed lookup. Column
/// order in the file does not matter; only the header names do.
struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, file: &Path) -> Result<Self, AnalysisError> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| AnalysisError::MissingField {
                    file: file.to_path_buf(),
                    field: name,
                })?;
        }
        Ok(Self { positions })
    }

    /// Read column `column` of a data row, coercing it to an integer.
    fn field(
        &self,
        record: &StringRecord,
        column: usize,
        row: usize,
        file: &Path,
    ) -> Result<u64, AnalysisError> {
        let raw = record.get(self.positions[column]).unwrap_or("");
        raw.trim()
            .parse::<u64>()
            .map_err(|_| AnalysisError::MalformedRecord {
                file: file.to_path_buf(),
                field: REQUIRED_COLUMNS[column],
                row,
                value: raw.to_string(),
            })
    }
}

/// Read one result file into worker records, preserving row order.
///
/// Every required column must be present and every value must coerce to an
/// integer; the first violation fails the whole parse. A file holding only
/// the header row yields an empty vector, which [`Run::new`] then rejects.
pub fn parse_records(path: &Path) -> Result<Vec<WorkerRecord>, AnalysisError> {
    let csv_err = |source| AnalysisError::Csv {
        file: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = ColumnIndex::resolve(&headers, path)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(csv_err)?;
        let number = index + 1;
        records.push(WorkerRecord {
            worker_id: columns.field(&row, 0, number, path)?,
            success: columns.field(&row, 1, number, path)?,
            failed: columns.field(&row, 2, number, path)?,
            timeouts: columns.field(&row, 3, number, path)?,
            channels_opened: columns.field(&row, 4, number, path)?,
            channels_reused: columns.field(&row, 5, number, path)?,
            channels_closed: columns.field(&row, 6, number, path)?,
            channels_connected: columns.field(&row, 7, number, path)?,
            channel_connection_errors: columns.field(&row, 8, number, path)?,
            total_connection_duration_ms: columns.field(&row, 9, number, path)?,
            requests_registered: columns.field(&row, 10, number, path)?,
            requests_completed: columns.field(&row, 11, number, path)?,
            total_request_duration_ms: columns.field(&row, 12, number, path)?,
        });
    }

    debug!("parsed {} worker records from {}", records.len(), path.display());
    Ok(records)
}

/// Discover every `.csv` result file directly inside `dir` and parse each
/// into a run, keyed by its worker count.
///
/// Files are visited in filename order so batches are reproducible. When two
/// files infer the same worker count the later file replaces the earlier
/// run; the replacement is logged rather than raised, since re-running a
/// configuration is how operators refresh a measurement.
pub fn discover_runs(dir: &Path) -> Result<BTreeMap<usize, Run>, AnalysisError> {
    let dir_err = |source| AnalysisError::InputDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_err)? {
        let path = entry.map_err(dir_err)?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut runs = BTreeMap::new();
    for path in paths {
        let run = Run::from_file(&path)?;
        let worker_count = run.worker_count();
        debug!(
            "loaded run with {} workers from {}",
            worker_count,
            path.display()
        );
        if let Some(previous) = runs.insert(worker_count, run) {
            warn!(
                "worker count {} measured twice: replacing {} with {}",
                worker_count,
                previous.source().display(),
                path.display()
            );
        }
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "worker_id,success,failed,timeouts,channelsOpened,channelsReused,\
                          channelsClosed,channelConnected,channelConnectionErrors,\
                          connectDurationMs,requestsRegistered,requestCompleted,requestDurationMs";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_records_in_row_order() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "run.csv",
            &format!("{HEADER}\n0,50,1,2,3,4,5,6,7,100,50,50,100\n1,50,0,0,3,4,5,6,0,120,50,50,200\n"),
        );

        let records = parse_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].worker_id, 0);
        assert_eq!(records[0].success, 50);
        assert_eq!(records[0].total_connection_duration_ms, 100);
        assert_eq!(records[0].total_request_duration_ms, 100);
        assert_eq!(records[1].worker_id, 1);
        assert_eq!(records[1].total_request_duration_ms, 200);
    }

    #[test]
    fn header_order_does_not_matter() {
        let dir = TempDir::new().unwrap();
        // The client historically wrote requestDurationMs before
        // connectDurationMs; lookups go by name, not position.
        let path = write_file(
            &dir,
            "run.csv",
            "requestDurationMs,worker_id,success,failed,timeouts,channelsOpened,channelsReused,\
             channelsClosed,channelConnected,channelConnectionErrors,connectDurationMs,\
             requestsRegistered,requestCompleted\n300,7,10,0,0,1,1,1,1,0,40,10,10\n",
        );

        let records = parse_records(&path).unwrap();
        assert_eq!(records[0].worker_id, 7);
        assert_eq!(records[0].total_request_duration_ms, 300);
        assert_eq!(records[0].total_connection_duration_ms, 40);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let dir = TempDir::new().unwrap();
        let header_without_success = HEADER.replace("success,", "");
        let path = write_file(
            &dir,
            "run.csv",
            &format!("{header_without_success}\n0,0,0,0,0,0,0,0,0,0,0,0\n"),
        );

        match parse_records(&path) {
            Err(AnalysisError::MissingField { field, .. }) => assert_eq!(field, "success"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_value_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "run.csv",
            &format!("{HEADER}\n0,50,0,0,0,0,0,0,0,100,50,oops,100\n"),
        );

        match parse_records(&path) {
            Err(AnalysisError::MalformedRecord { field, row, value, .. }) => {
                assert_eq!(field, "requestCompleted");
                assert_eq!(row, 1);
                assert_eq!(value, "oops");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_yields_empty_run_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "run.csv", &format!("{HEADER}\n"));

        let records = parse_records(&path).unwrap();
        assert!(records.is_empty());
        assert!(matches!(
            Run::new(records, &path),
            Err(AnalysisError::EmptyRun { .. })
        ));
    }

    #[test]
    fn discovery_skips_other_extensions() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "run.csv", &format!("{HEADER}\n0,1,0,0,0,0,0,0,0,1,1,1,1\n"));
        write_file(&dir, "notes.txt", "not a result file");

        let runs = discover_runs(dir.path()).unwrap();
        assert_eq!(runs.len(), 1);
        assert!(runs.contains_key(&1));
    }

    #[test]
    fn duplicate_worker_count_keeps_later_file() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.csv", &format!("{HEADER}\n0,1,0,0,0,0,0,0,0,1,1,1,1\n"));
        write_file(&dir, "b.csv", &format!("{HEADER}\n0,2,0,0,0,0,0,0,0,2,2,2,2\n"));

        let runs = discover_runs(dir.path()).unwrap();
        assert_eq!(runs.len(), 1);
        let run = &runs[&1];
        assert!(run.source().ends_with("b.csv"));
        assert_eq!(run.workers()[0].success, 2);
    }
}
