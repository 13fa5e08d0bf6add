//! HardSoftDecimalScore - Fixed-point decimal hard/soft score

use std::fmt;
use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::traits::{
    check_divisor, floor_divide, floor_multiply, init_prefix, split_init_prefix, ParseableScore,
    Score, ScoreArithmeticError, ScoreParseError,
};
use super::LevelNumber;

/// Number of fractional digits kept by [`HardSoftDecimalScore`].
pub const DECIMAL_PLACES: u32 = 5;

/// Scale factor between a level value and its stored representation.
pub const SCALE: i64 = 100_000;

/// A hard/soft score with exact fractional levels.
///
/// Levels are stored as integers scaled by 100000, so every value with at
/// most five fractional digits is represented exactly. Arithmetic is
/// exact; `multiply` and `divide` floor at the 0.00001 resolution.
///
/// # Examples
///
/// ```
/// use planloom_core::{HardSoftDecimalScore, ParseableScore, Score};
///
/// let score1 = HardSoftDecimalScore::of(-1, -100);
/// assert_eq!(score1.hard_scaled(), -100000);
/// assert_eq!(score1.soft_scaled(), -10000000);
///
/// // Create from pre-scaled values
/// let score2 = HardSoftDecimalScore::of_scaled(-3050000, 0);  // -30.5 hard
/// assert!(!score2.is_feasible());
///
/// // Display shows values (trailing zeros stripped)
/// let score3 = HardSoftDecimalScore::of_scaled(-150000, -225000);
/// assert_eq!(format!("{}", score3), "-1.5hard/-2.25soft");
/// assert_eq!(HardSoftDecimalScore::parse("-1.5hard/-2.25soft").unwrap(), score3);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftDecimalScore {
    init_score: i64,
    hard: i64,
    soft: i64,
}

impl HardSoftDecimalScore {
    /// The zero score.
    pub const ZERO: HardSoftDecimalScore = HardSoftDecimalScore::of_scaled(0, 0);

    /// One hard constraint penalty (scaled).
    pub const ONE_HARD: HardSoftDecimalScore = HardSoftDecimalScore::of_scaled(SCALE, 0);

    /// One soft constraint penalty (scaled).
    pub const ONE_SOFT: HardSoftDecimalScore = HardSoftDecimalScore::of_scaled(0, SCALE);

    /// Creates a new score from whole unscaled values.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftDecimalScore::of_scaled(hard * SCALE, soft * SCALE)
    }

    /// Creates a score from values already multiplied by [`SCALE`].
    #[inline]
    pub const fn of_scaled(hard: i64, soft: i64) -> Self {
        HardSoftDecimalScore {
            init_score: 0,
            hard,
            soft,
        }
    }

    /// Creates a score with an explicit init score from scaled values.
    #[inline]
    pub const fn of_uninitialized_scaled(init_score: i64, hard: i64, soft: i64) -> Self {
        HardSoftDecimalScore {
            init_score,
            hard,
            soft,
        }
    }

    /// Creates a score from decimal values.
    ///
    /// Digits beyond the fifth fractional place are floored away.
    ///
    /// ```
    /// use planloom_core::HardSoftDecimalScore;
    /// use rust_decimal::Decimal;
    ///
    /// let score = HardSoftDecimalScore::of_decimal(Decimal::new(-25, 1), Decimal::new(3, 0));
    /// assert_eq!(score.hard_scaled(), -250000);
    /// assert_eq!(score.soft_scaled(), 300000);
    /// ```
    pub fn of_decimal(hard: Decimal, soft: Decimal) -> Self {
        HardSoftDecimalScore::of_scaled(decimal_to_scaled(hard), decimal_to_scaled(soft))
    }

    /// Returns the hard score as a scaled integer.
    #[inline]
    pub const fn hard_scaled(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score as a scaled integer.
    #[inline]
    pub const fn soft_scaled(&self) -> i64 {
        self.soft
    }

    /// Returns the hard score as an exact decimal.
    pub fn hard(&self) -> Decimal {
        Decimal::new(self.hard, DECIMAL_PLACES)
    }

    /// Returns the soft score as an exact decimal.
    pub fn soft(&self) -> Decimal {
        Decimal::new(self.soft, DECIMAL_PLACES)
    }
}

fn decimal_to_scaled(value: Decimal) -> i64 {
    let saturated = if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };
    value
        .checked_mul(Decimal::from(SCALE))
        .and_then(|scaled| scaled.floor().to_i64())
        .unwrap_or(saturated)
}

impl Score for HardSoftDecimalScore {
    #[inline]
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        HardSoftDecimalScore::of_uninitialized_scaled(init_score, self.hard, self.soft)
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score == 0 && self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        HardSoftDecimalScore::ZERO
    }

    #[inline]
    fn levels_size(&self) -> usize {
        2
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.soft]
    }

    fn to_level_values(&self) -> Vec<LevelNumber> {
        vec![
            LevelNumber::Decimal(self.hard()),
            LevelNumber::Decimal(self.soft()),
        ]
    }

    fn multiply(&self, multiplicand: f64) -> Self {
        HardSoftDecimalScore::of_uninitialized_scaled(
            floor_multiply(self.init_score, multiplicand),
            floor_multiply(self.hard, multiplicand),
            floor_multiply(self.soft, multiplicand),
        )
    }

    fn divide(&self, divisor: f64) -> Result<Self, ScoreArithmeticError> {
        check_divisor(divisor)?;
        Ok(HardSoftDecimalScore::of_uninitialized_scaled(
            floor_divide(self.init_score, divisor),
            floor_divide(self.hard, divisor),
            floor_divide(self.soft, divisor),
        ))
    }

    fn abs(&self) -> Self {
        HardSoftDecimalScore::of_uninitialized_scaled(
            self.init_score.abs(),
            self.hard.abs(),
            self.soft.abs(),
        )
    }
}

impl_score_ops!(HardSoftDecimalScore { init_score, hard, soft } => of_uninitialized_scaled);

impl fmt::Debug for HardSoftDecimalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardSoftDecimalScore({}, {}, {})",
            self.init_score,
            self.hard().normalize(),
            self.soft().normalize()
        )
    }
}

impl fmt::Display for HardSoftDecimalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}hard/{}soft",
            init_prefix(self.init_score),
            self.hard().normalize(),
            self.soft().normalize()
        )
    }
}

fn parse_decimal_part(part: &str, suffix: &str) -> Result<i64, ScoreParseError> {
    let part = part.trim();
    let num_str = part.strip_suffix(suffix).ok_or_else(|| {
        ScoreParseError::new(format!("{} part '{}' must end with '{}'", suffix, part, suffix))
    })?;
    let value = Decimal::from_str(num_str).map_err(|e| {
        ScoreParseError::new(format!("Invalid {} score '{}': {}", suffix, num_str, e))
    })?;
    if value.normalize().scale() > DECIMAL_PLACES {
        return Err(ScoreParseError::new(format!(
            "Invalid {} score '{}': more than {} decimal places",
            suffix, num_str, DECIMAL_PLACES
        )));
    }
    value
        .checked_mul(Decimal::from(SCALE))
        .and_then(|scaled| scaled.to_i64())
        .ok_or_else(|| {
            ScoreParseError::new(format!("{} score '{}' is out of range", suffix, num_str))
        })
}

impl ParseableScore for HardSoftDecimalScore {
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let (init_score, levels) = split_init_prefix(s)?;

        // Format: "0.5hard/-100.25soft" or "-1hard/0soft"
        let parts: Vec<&str> = levels.split('/').collect();
        if parts.len() != 2 {
            return Err(ScoreParseError::new(format!(
                "Invalid HardSoftDecimalScore format '{}': expected 'Xhard/Ysoft'",
                s
            )));
        }

        let hard = parse_decimal_part(parts[0], "hard")?;
        let soft = parse_decimal_part(parts[1], "soft")?;
        Ok(HardSoftDecimalScore::of_uninitialized_scaled(
            init_score, hard, soft,
        ))
    }

    fn to_string_repr(&self) -> String {
        self.to_string()
    }
}
