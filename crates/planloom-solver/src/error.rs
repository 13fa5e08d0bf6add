//! Solver error types.

use planloom_config::ConfigError;
use planloom_core::{ScoreArithmeticError, ScoreParseError};
use thiserror::Error;

/// Errors that abort solving.
///
/// Reaching a termination limit is not an error: the solve returns the
/// best solution found so far.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The working score diverged from a full recalculation.
    ///
    /// This points at a bug in an incremental score calculator or a move
    /// that changes variables without notifying the score director.
    #[error(
        "Score corruption: working score ({working}) differs from the from-scratch score \
         ({from_scratch}) after {move_description} on levels {levels_differing:?}.{constraint_context}"
    )]
    ScoreCorruption {
        working: String,
        from_scratch: String,
        move_description: String,
        levels_differing: Vec<usize>,
        constraint_context: String,
    },

    #[error(transparent)]
    ScoreArithmetic(#[from] ScoreArithmeticError),

    #[error(transparent)]
    Parse(#[from] ScoreParseError),

    #[error("Invalid solver state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;
