//! SimpleScore - Single-level score

use std::fmt;

use super::traits::{init_prefix, Score};

/// A single-level score.
///
/// Useful for problems with only one kind of constraint, or where every
/// constraint has the same weight.
///
/// # Examples
///
/// ```
/// use planloom_core::{ParseableScore, Score, SimpleScore};
///
/// let score = SimpleScore::of(-5);
/// assert_eq!(score.score(), -5);
/// assert_eq!(score.to_string(), "-5");
///
/// let uninitialized = SimpleScore::of_uninitialized(-2, 0);
/// assert_eq!(uninitialized.to_string(), "-2init/0");
/// assert!(!uninitialized.is_feasible());
/// assert_eq!(SimpleScore::parse("-2init/0").unwrap(), uninitialized);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleScore {
    init_score: i64,
    score: i64,
}

impl SimpleScore {
    /// The zero score.
    pub const ZERO: SimpleScore = SimpleScore {
        init_score: 0,
        score: 0,
    };

    /// One unit of score.
    pub const ONE: SimpleScore = SimpleScore {
        init_score: 0,
        score: 1,
    };

    /// Creates a new initialized SimpleScore.
    #[inline]
    pub const fn of(score: i64) -> Self {
        SimpleScore {
            init_score: 0,
            score,
        }
    }

    /// Creates a SimpleScore with an explicit init score.
    #[inline]
    pub const fn of_uninitialized(init_score: i64, score: i64) -> Self {
        SimpleScore { init_score, score }
    }

    /// Returns the score value.
    #[inline]
    pub const fn score(&self) -> i64 {
        self.score
    }
}

impl Score for SimpleScore {
    #[inline]
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        SimpleScore::of_uninitialized(init_score, self.score)
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score == 0 && self.score >= 0
    }

    #[inline]
    fn zero() -> Self {
        SimpleScore::ZERO
    }

    #[inline]
    fn levels_size(&self) -> usize {
        1
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.score]
    }

    impl_score_scale!(SimpleScore { init_score, score } => of_uninitialized);
}

impl_score_ops!(SimpleScore { init_score, score } => of_uninitialized);

impl fmt::Debug for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimpleScore({}, {})", self.init_score, self.score)
    }
}

impl fmt::Display for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", init_prefix(self.init_score), self.score)
    }
}

impl super::traits::ParseableScore for SimpleScore {
    fn parse(s: &str) -> Result<Self, super::traits::ScoreParseError> {
        let s = s.trim();
        let (init_score, level) = super::traits::split_init_prefix(s)?;
        if level.contains('/') {
            return Err(super::traits::ScoreParseError::new(format!(
                "Invalid SimpleScore format '{}': expected a single level",
                s
            )));
        }
        let level = level.trim();
        let score = level.parse::<i64>().map_err(|e| {
            super::traits::ScoreParseError::new(format!("Invalid score '{}': {}", level, e))
        })?;
        Ok(SimpleScore::of_uninitialized(init_score, score))
    }

    fn to_string_repr(&self) -> String {
        self.to_string()
    }
}
