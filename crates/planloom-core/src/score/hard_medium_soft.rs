//! HardMediumSoftScore - Three-level score

use std::fmt;

use super::traits::{init_prefix, Score};

/// A score with hard, medium and soft constraint levels.
///
/// Medium constraints sit between hard and soft: they are never traded
/// for soft gains, but do not affect feasibility.
///
/// # Examples
///
/// ```
/// use planloom_core::{HardMediumSoftScore, Score};
///
/// let score = HardMediumSoftScore::of(0, -2, -100);
/// assert!(score.is_feasible());
/// assert!(HardMediumSoftScore::of(0, -1, -500) > score);
/// assert_eq!(score.to_string(), "0hard/-2medium/-100soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardMediumSoftScore {
    init_score: i64,
    hard: i64,
    medium: i64,
    soft: i64,
}

impl HardMediumSoftScore {
    /// The zero score.
    pub const ZERO: HardMediumSoftScore = HardMediumSoftScore::of(0, 0, 0);

    /// One hard constraint penalty.
    pub const ONE_HARD: HardMediumSoftScore = HardMediumSoftScore::of(1, 0, 0);

    /// One medium constraint penalty.
    pub const ONE_MEDIUM: HardMediumSoftScore = HardMediumSoftScore::of(0, 1, 0);

    /// One soft constraint penalty.
    pub const ONE_SOFT: HardMediumSoftScore = HardMediumSoftScore::of(0, 0, 1);

    /// Creates a new initialized HardMediumSoftScore.
    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        HardMediumSoftScore {
            init_score: 0,
            hard,
            medium,
            soft,
        }
    }

    /// Creates a HardMediumSoftScore with an explicit init score.
    #[inline]
    pub const fn of_uninitialized(init_score: i64, hard: i64, medium: i64, soft: i64) -> Self {
        HardMediumSoftScore {
            init_score,
            hard,
            medium,
            soft,
        }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the medium score component.
    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardMediumSoftScore {
    #[inline]
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        HardMediumSoftScore::of_uninitialized(init_score, self.hard, self.medium, self.soft)
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score == 0 && self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        HardMediumSoftScore::ZERO
    }

    #[inline]
    fn levels_size(&self) -> usize {
        3
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.medium, self.soft]
    }

    impl_score_scale!(HardMediumSoftScore { init_score, hard, medium, soft } => of_uninitialized);
}

impl_score_ops!(HardMediumSoftScore { init_score, hard, medium, soft } => of_uninitialized);

impl fmt::Debug for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardMediumSoftScore({}, {}, {}, {})",
            self.init_score, self.hard, self.medium, self.soft
        )
    }
}

impl fmt::Display for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}hard/{}medium/{}soft",
            init_prefix(self.init_score),
            self.hard,
            self.medium,
            self.soft
        )
    }
}

impl_score_parse!(
    HardMediumSoftScore { hard => "hard", medium => "medium", soft => "soft" } => of_uninitialized
);
