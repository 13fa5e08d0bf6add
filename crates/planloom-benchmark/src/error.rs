//! Benchmark error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BenchmarkError>;
