use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, parsing, or aggregating load test results.
///
/// Every variant is fatal to the batch: the caller reports the diagnostic
/// and aborts before any chart is written. Each variant carries the source
/// file so the offending run can be identified from the error alone.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required column is absent from a result file's header row.
    #[error("{file}: missing required column `{field}`")]
    MissingField { file: PathBuf, field: &'static str },

    /// A field value could not be coerced to an integer.
    ///
    /// `row` is the 1-based data row index (the header row is not counted).
    #[error("{file}: malformed value {value:?} for column `{field}` in row {row}")]
    MalformedRecord {
        file: PathBuf,
        field: &'static str,
        row: usize,
        value: String,
    },

    /// A result file contained a header but no worker records.
    #[error("{file}: run contains no worker records")]
    EmptyRun { file: PathBuf },

    /// A derived ratio is undefined because its denominator summed to zero.
    ///
    /// Occurs for genuinely degenerate runs, e.g. every worker reporting
    /// zero successful or zero completed requests.
    #[error("{file}: cannot derive {metric}: denominator is zero")]
    DivisionByZero { file: PathBuf, metric: &'static str },

    /// The result file could not be read or decoded as CSV.
    #[error("{file}: {source}")]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The input directory could not be enumerated.
    #[error("failed to read input directory {dir}")]
    InputDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
