//! HardSoftScore - Two-level score with hard and soft constraints

use std::fmt;

use super::traits::{init_prefix, Score};

/// A score with separate hard and soft constraint levels.
///
/// Hard constraints must be satisfied for a solution to be feasible.
/// Soft constraints are optimization objectives.
///
/// When comparing scores:
/// 1. Init scores are compared first
/// 2. Hard scores are compared next
/// 3. Soft scores are only compared when hard scores are equal
///
/// # Examples
///
/// ```
/// use planloom_core::HardSoftScore;
///
/// let score1 = HardSoftScore::of(-1, -100);  // 1 hard constraint broken
/// let score2 = HardSoftScore::of(0, -200);   // Feasible but poor soft score
///
/// // Feasible solutions are always better than infeasible ones
/// assert!(score2 > score1);
///
/// let score3 = HardSoftScore::of(0, -50);    // Better soft score
/// assert!(score3 > score2);
///
/// // An unassigned entity outweighs any level
/// assert!(HardSoftScore::of_uninitialized(-1, 100, 100) < score1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    init_score: i64,
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore::of(0, 0);

    /// One hard constraint penalty.
    pub const ONE_HARD: HardSoftScore = HardSoftScore::of(1, 0);

    /// One soft constraint penalty.
    pub const ONE_SOFT: HardSoftScore = HardSoftScore::of(0, 1);

    /// Creates a new initialized HardSoftScore.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore {
            init_score: 0,
            hard,
            soft,
        }
    }

    /// Creates a HardSoftScore with an explicit init score.
    #[inline]
    pub const fn of_uninitialized(init_score: i64, hard: i64, soft: i64) -> Self {
        HardSoftScore {
            init_score,
            hard,
            soft,
        }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore::of(hard, 0)
    }

    /// Creates a score with only a soft component.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore::of(0, soft)
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardSoftScore {
    #[inline]
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        HardSoftScore::of_uninitialized(init_score, self.hard, self.soft)
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score == 0 && self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        HardSoftScore::ZERO
    }

    #[inline]
    fn levels_size(&self) -> usize {
        2
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.soft]
    }

    impl_score_scale!(HardSoftScore { init_score, hard, soft } => of_uninitialized);
}

impl_score_ops!(HardSoftScore { init_score, hard, soft } => of_uninitialized);

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardSoftScore({}, {}, {})",
            self.init_score, self.hard, self.soft
        )
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}hard/{}soft",
            init_prefix(self.init_score),
            self.hard,
            self.soft
        )
    }
}

impl_score_parse!(HardSoftScore { hard => "hard", soft => "soft" } => of_uninitialized);
