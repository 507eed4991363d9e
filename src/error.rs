use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single simulation or comparison run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid parameter {name}: {value} (must be positive and finite)")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("division by zero in {context}")]
    DivisionByZero { context: &'static str },
    #[error("length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Failures while reading reference recordings.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("column {column}: header {label:?} is not an integer frequency")]
    BadHeader { column: usize, label: String },
    #[error("row {row}, column {column}: {value:?} is not a number")]
    BadValue {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("row {row} has {actual} columns, header has {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("frequency {0} Hz appears more than once in the header")]
    DuplicateFrequency(u32),
    #[error("reference table has no data")]
    Empty,
}
