//! Typed score level values.

use std::fmt;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::ScoreArithmeticError;

/// The value of a single score level.
///
/// Integer score types report [`LevelNumber::Integer`]; fixed-point decimal
/// score types report [`LevelNumber::Decimal`] so that weight totals keep
/// their exact fractional value.
///
/// # Examples
///
/// ```
/// use planloom_core::LevelNumber;
/// use rust_decimal::Decimal;
///
/// let a = LevelNumber::Integer(-3);
/// let b = LevelNumber::Integer(-4);
/// assert_eq!(a.checked_add(b).unwrap(), LevelNumber::Integer(-7));
///
/// let d = LevelNumber::Decimal(Decimal::new(-15, 1));
/// assert!(a.checked_add(d).is_err());
/// assert_eq!(d.to_f64(), -1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelNumber {
    /// Integer level (simple, hard/soft, hard/medium/soft, bendable).
    Integer(i64),
    /// Exact decimal level.
    Decimal(Decimal),
}

impl LevelNumber {
    /// Returns the zero value of the same variant.
    pub fn zero_like(&self) -> LevelNumber {
        match self {
            LevelNumber::Integer(_) => LevelNumber::Integer(0),
            LevelNumber::Decimal(_) => LevelNumber::Decimal(Decimal::ZERO),
        }
    }

    /// Returns true if this level value is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            LevelNumber::Integer(v) => *v == 0,
            LevelNumber::Decimal(d) => d.is_zero(),
        }
    }

    /// Adds two level values of the same variant.
    pub fn checked_add(self, other: LevelNumber) -> Result<LevelNumber, ScoreArithmeticError> {
        match (self, other) {
            (LevelNumber::Integer(a), LevelNumber::Integer(b)) => Ok(LevelNumber::Integer(a + b)),
            (LevelNumber::Decimal(a), LevelNumber::Decimal(b)) => Ok(LevelNumber::Decimal(a + b)),
            (left, right) => Err(ScoreArithmeticError::LevelTypeMismatch {
                left: left.type_name(),
                right: right.type_name(),
            }),
        }
    }

    /// Converts to a floating point value for charts and CSV export.
    pub fn to_f64(&self) -> f64 {
        match self {
            LevelNumber::Integer(v) => *v as f64,
            LevelNumber::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            LevelNumber::Integer(_) => "integer",
            LevelNumber::Decimal(_) => "decimal",
        }
    }
}

impl fmt::Display for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelNumber::Integer(v) => write!(f, "{}", v),
            LevelNumber::Decimal(d) => write!(f, "{}", d.normalize()),
        }
    }
}
