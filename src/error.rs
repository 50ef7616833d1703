//! Error types for the sales metrics pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that abort a whole pipeline run.
///
/// Row-scoped trouble never shows up here; it is absorbed during
/// ingest and reported through the ingest summary.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read the input file, or write the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader itself failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: sales-metrics <input.csv>")]
    MissingArgument,
}
