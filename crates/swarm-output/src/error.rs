//! Error types for swarm-output.

use thiserror::Error;

/// Errors that can occur when writing or reading a telemetry file.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unexpected header: expected `{expected}`, found `{found}`")]
    Header { expected: String, found: String },

    #[error("row {row}: {message}")]
    Schema { row: u64, message: String },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
