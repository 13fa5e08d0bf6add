//! Error types for planloom

use thiserror::Error;

use crate::score::{ScoreArithmeticError, ScoreParseError, TrendParseError};

/// Main error type for planloom core operations
#[derive(Debug, Error)]
pub enum PlanloomError {
    /// Malformed score string
    #[error(transparent)]
    ScoreFormat(#[from] ScoreParseError),

    /// Scores of different shapes were combined
    #[error(transparent)]
    ScoreArithmetic(#[from] ScoreArithmeticError),

    /// Malformed initializing score trend
    #[error(transparent)]
    Trend(#[from] TrendParseError),

    /// Error in domain model definition
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Invalid operation for current state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for planloom core operations
pub type Result<T> = std::result::Result<T, PlanloomError>;
