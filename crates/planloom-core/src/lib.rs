//! Planloom Core - score model, constraint match accounting and domain traits
//!
//! This crate provides the fundamental abstractions for planloom:
//! - Score types for representing solution quality
//! - Score definitions with bound computation and parsing
//! - Constraint match accounting for score explanation
//! - Domain traits for defining planning problems

pub mod constraint;
pub mod constraint_match;
pub mod domain;
pub mod error;
pub mod score;


#[cfg(test)]
mod constraint_match_tests;

pub use constraint::{ConstraintRef, ImpactType};
pub use constraint_match::{
    ConstraintJustification, ConstraintMatch, ConstraintMatchTotal, EntityRef, ScoreHolder,
};
pub use domain::{PlanningEntity, PlanningSolution};
pub use error::PlanloomError;
pub use score::{
    BendableScore, BendableScoreDefinition, HardMediumSoftScore, HardMediumSoftScoreDefinition,
    HardSoftDecimalScore, HardSoftDecimalScoreDefinition, HardSoftScore, HardSoftScoreDefinition,
    InitializingScoreTrend, InitializingScoreTrendLevel, LevelNumber, ParseableScore, Score,
    ScoreArithmeticError, ScoreDefinition, ScoreParseError, SimpleScore, SimpleScoreDefinition,
    TrendParseError,
};
