//! Score types for representing solution quality
//!
//! Scores are used to compare solutions and guide the optimization process.
//! All score types are immutable and implement arithmetic operations.

#[macro_use]
mod macros;

mod bendable;
mod definition;
mod hard_medium_soft;
mod hard_soft;
mod hard_soft_decimal;
mod level;
mod simple;
mod traits;
mod trend;

#[cfg(test)]
mod tests;

pub use bendable::BendableScore;
pub use definition::{
    BendableScoreDefinition, HardMediumSoftScoreDefinition, HardSoftDecimalScoreDefinition,
    HardSoftScoreDefinition, ScoreDefinition, SimpleScoreDefinition,
};
pub use hard_medium_soft::HardMediumSoftScore;
pub use hard_soft::HardSoftScore;
pub use hard_soft_decimal::{HardSoftDecimalScore, DECIMAL_PLACES, SCALE};
pub use level::LevelNumber;
pub use simple::SimpleScore;
pub use traits::{ParseableScore, Score, ScoreArithmeticError, ScoreParseError};
pub use trend::{InitializingScoreTrend, InitializingScoreTrendLevel, TrendParseError};
