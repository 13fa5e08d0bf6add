//! Core Score trait definition

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use super::LevelNumber;

/// Core trait for all score types in planloom.
///
/// Scores represent the quality of a planning solution. They are used to:
/// - Compare solutions (better/worse/equal)
/// - Guide the optimization process
/// - Determine feasibility
///
/// All score implementations must be:
/// - Immutable (operations return new instances)
/// - Thread-safe (Send + Sync)
/// - Comparable (total ordering)
///
/// # Init score
///
/// Every score carries an init score: the negated number of planning
/// entities that are still unassigned. It is compared before every level,
/// so a less initialized solution is always worse.
///
/// # Score Levels
///
/// Scores can have multiple levels (e.g., hard/soft constraints).
/// When comparing scores, higher-priority levels are compared first.
pub trait Score:
    Clone
    + Debug
    + Display
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Returns the init score (`0` once every entity is assigned).
    fn init_score(&self) -> i64;

    /// Returns a copy of this score with a different init score.
    fn with_init_score(&self, init_score: i64) -> Self;

    /// Returns true if no entity is left unassigned.
    fn is_solution_initialized(&self) -> bool {
        self.init_score() >= 0
    }

    /// Returns true if this score represents a feasible solution.
    ///
    /// A solution is feasible when it is initialized and every hard level
    /// is non-negative.
    fn is_feasible(&self) -> bool;

    /// Returns the zero score (identity element for addition).
    fn zero() -> Self;

    /// Returns the number of score levels (init score excluded).
    fn levels_size(&self) -> usize {
        self.to_level_numbers().len()
    }

    /// Returns the score levels as raw i64 values.
    ///
    /// The order is from highest priority to lowest priority.
    /// For HardSoftScore: [hard, soft]
    fn to_level_numbers(&self) -> Vec<i64>;

    /// Returns the score levels as typed level values.
    fn to_level_values(&self) -> Vec<LevelNumber> {
        self.to_level_numbers()
            .into_iter()
            .map(LevelNumber::Integer)
            .collect()
    }

    /// Returns true if `other` has the same level layout as this score.
    fn is_compatible_with(&self, other: &Self) -> bool {
        self.levels_size() == other.levels_size()
    }

    /// Adds two scores, failing when their level layouts differ.
    fn checked_add(&self, other: &Self) -> Result<Self, ScoreArithmeticError> {
        ensure_compatible(self, other)?;
        Ok(self.clone() + other.clone())
    }

    /// Subtracts two scores, failing when their level layouts differ.
    fn checked_sub(&self, other: &Self) -> Result<Self, ScoreArithmeticError> {
        ensure_compatible(self, other)?;
        Ok(self.clone() - other.clone())
    }

    /// Multiplies this score by a scalar, flooring every level.
    fn multiply(&self, multiplicand: f64) -> Self;

    /// Divides this score by a scalar, flooring every level.
    ///
    /// Fails with [`ScoreArithmeticError::DivisionByZero`] for a zero divisor.
    fn divide(&self, divisor: f64) -> Result<Self, ScoreArithmeticError>;

    /// Returns the absolute value of this score.
    fn abs(&self) -> Self;

    /// Compares two scores, returning the ordering.
    ///
    /// Default implementation uses the Ord trait.
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Returns true if this score is better than the other score.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns true if this score is worse than the other score.
    fn is_worse_than(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns true if this score is equal to the other score.
    fn is_equal_to(&self, other: &Self) -> bool {
        self == other
    }
}

/// Marker trait for scores that can be parsed from a string.
pub trait ParseableScore: Score {
    /// Parses a score from a string representation.
    ///
    /// # Format
    /// - SimpleScore: "42" or "-1init/42"
    /// - HardSoftScore: "0hard/-100soft" or "-2init/-1hard/0soft"
    /// - HardMediumSoftScore: "0hard/0medium/-100soft"
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    /// Returns the string representation of this score.
    fn to_string_repr(&self) -> String;
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Score parse error: {message}")]
pub struct ScoreParseError {
    pub message: String,
}

impl ScoreParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error raised when scores of different shapes or level types are combined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreArithmeticError {
    /// The operands do not have the same number of levels.
    #[error("score level count mismatch: expected {expected} levels, got {actual}")]
    LevelsSizeMismatch { expected: usize, actual: usize },

    /// An integer level was combined with a decimal level.
    #[error("score level type mismatch: cannot combine {left} with {right}")]
    LevelTypeMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// A score was divided by zero.
    #[error("score division by zero")]
    DivisionByZero,
}

fn ensure_compatible<Sc: Score>(left: &Sc, right: &Sc) -> Result<(), ScoreArithmeticError> {
    if left.is_compatible_with(right) {
        Ok(())
    } else {
        Err(ScoreArithmeticError::LevelsSizeMismatch {
            expected: left.levels_size(),
            actual: right.levels_size(),
        })
    }
}

/// Splits an optional leading `"<n>init/"` segment off a score string.
pub(crate) fn split_init_prefix(s: &str) -> Result<(i64, &str), ScoreParseError> {
    match s.split_once('/') {
        Some((head, rest)) if head.trim().ends_with("init") => {
            let head = head.trim();
            let num_str = &head[..head.len() - "init".len()];
            let init = num_str.parse::<i64>().map_err(|e| {
                ScoreParseError::new(format!("Invalid init score '{}': {}", num_str, e))
            })?;
            Ok((init, rest))
        }
        _ => Ok((0, s)),
    }
}

/// Formats the `"<n>init/"` prefix, empty for an initialized score.
pub(crate) fn init_prefix(init_score: i64) -> String {
    if init_score == 0 {
        String::new()
    } else {
        format!("{}init/", init_score)
    }
}

/// Floors `value * multiplicand` back to an integer level.
///
/// Integral factors stay in `i64`; other factors are applied as a `Decimal`.
pub(crate) fn floor_multiply(value: i64, multiplicand: f64) -> i64 {
    integral_factor(multiplicand)
        .and_then(|factor| value.checked_mul(factor))
        .unwrap_or_else(|| decimal_scale(value, multiplicand, false))
}

/// Floors `value / divisor` back to an integer level.
pub(crate) fn floor_divide(value: i64, divisor: f64) -> i64 {
    integral_factor(divisor)
        .and_then(|divisor| checked_floor_div(value, divisor))
        .unwrap_or_else(|| decimal_scale(value, divisor, true))
}

fn integral_factor(factor: f64) -> Option<i64> {
    if factor.is_finite() && factor.fract() == 0.0 && factor.abs() < 9.0e18 {
        Some(factor as i64)
    } else {
        None
    }
}

fn checked_floor_div(value: i64, divisor: i64) -> Option<i64> {
    let quotient = value.checked_div(divisor)?;
    let remainder = value.checked_rem(divisor)?;
    if remainder != 0 && (remainder < 0) != (divisor < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// Saturates through `f64` only when the exact result leaves `i64`.
fn decimal_scale(value: i64, factor: f64, divide: bool) -> i64 {
    let exact = Decimal::from_str(&factor.to_string())
        .ok()
        .and_then(|factor| {
            if divide {
                Decimal::from(value).checked_div(factor)
            } else {
                Decimal::from(value).checked_mul(factor)
            }
        })
        .and_then(|value| value.floor().to_i64());
    match exact {
        Some(value) => value,
        None if divide => (value as f64 / factor).floor() as i64,
        None => (value as f64 * factor).floor() as i64,
    }
}

pub(crate) fn check_divisor(divisor: f64) -> Result<(), ScoreArithmeticError> {
    if divisor == 0.0 {
        Err(ScoreArithmeticError::DivisionByZero)
    } else {
        Ok(())
    }
}
