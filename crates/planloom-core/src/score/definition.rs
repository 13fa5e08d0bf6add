//! Score definitions: per score type policy for labels, feasibility,
//! bounds, parsing and holder construction.

use std::fmt::Debug;

use super::trend::{InitializingScoreTrend, InitializingScoreTrendLevel};
use super::{
    BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftScore, ParseableScore,
    Score, ScoreArithmeticError, ScoreParseError, SimpleScore,
};
use crate::constraint_match::ScoreHolder;

/// Policy object describing one score type.
///
/// The engine never inspects score levels directly; it asks the
/// definition for labels, feasibility and the optimistic/pessimistic
/// bounds used to prune partially initialized solutions.
pub trait ScoreDefinition: Send + Sync + Debug {
    /// The score type this definition describes.
    type Score: Score;

    /// Returns a human-readable name for every level, highest priority first.
    fn level_labels(&self) -> Vec<String>;

    /// Returns the number of levels.
    fn levels_size(&self) -> usize {
        self.level_labels().len()
    }

    /// Returns how many leading levels must be non-negative for feasibility.
    fn feasible_levels_size(&self) -> usize;

    /// Returns the label of the init score.
    fn init_label(&self) -> &'static str {
        "init score"
    }

    /// Returns the index of the level with the given label.
    fn find_level_label(&self, label: &str) -> Option<usize> {
        self.level_labels().iter().position(|l| l == label)
    }

    /// Returns the zero score of this type.
    fn zero_score(&self) -> Self::Score;

    /// Builds a score from raw level numbers.
    fn from_level_numbers(
        &self,
        init_score: i64,
        levels: &[i64],
    ) -> Result<Self::Score, ScoreArithmeticError>;

    /// Parses the canonical string form.
    fn parse_score(&self, text: &str) -> Result<Self::Score, ScoreParseError>;

    /// Formats a score in its canonical string form.
    fn format_score(&self, score: &Self::Score) -> String {
        score.to_string()
    }

    /// Returns true if `score` is initialized and its feasible levels are non-negative.
    fn is_feasible(&self, score: &Self::Score) -> bool {
        score.init_score() == 0
            && score
                .to_level_numbers()
                .iter()
                .take(self.feasible_levels_size())
                .all(|&level| level >= 0)
    }

    /// Greatest value a level can hold.
    fn level_max(&self, _level: usize) -> i64 {
        i64::MAX
    }

    /// Smallest value a level can hold.
    fn level_min(&self, _level: usize) -> i64 {
        i64::MIN
    }

    /// Returns the best score still reachable from `score`.
    ///
    /// Levels trending only down keep their current value; every other
    /// level is raised to [`ScoreDefinition::level_max`]. Score arithmetic
    /// saturates, so adding to an unbounded level keeps it at the maximum.
    fn build_optimistic_bound(
        &self,
        trend: &InitializingScoreTrend,
        score: &Self::Score,
    ) -> Result<Self::Score, ScoreArithmeticError> {
        let bound = bound_levels(trend, score, |index, level, trend_level| {
            if trend_level == InitializingScoreTrendLevel::OnlyDown {
                level
            } else {
                self.level_max(index)
            }
        })?;
        self.from_level_numbers(0, &bound)
    }

    /// Returns the worst score still reachable from `score`.
    ///
    /// Levels trending only up keep their current value; every other
    /// level is lowered to [`ScoreDefinition::level_min`].
    fn build_pessimistic_bound(
        &self,
        trend: &InitializingScoreTrend,
        score: &Self::Score,
    ) -> Result<Self::Score, ScoreArithmeticError> {
        let bound = bound_levels(trend, score, |index, level, trend_level| {
            if trend_level == InitializingScoreTrendLevel::OnlyUp {
                level
            } else {
                self.level_min(index)
            }
        })?;
        self.from_level_numbers(0, &bound)
    }

    /// Creates an empty score holder for one score calculation.
    fn build_score_holder(&self, constraint_match_enabled: bool) -> ScoreHolder<Self::Score> {
        ScoreHolder::new(self.zero_score(), constraint_match_enabled)
    }
}

fn bound_levels<Sc: Score>(
    trend: &InitializingScoreTrend,
    score: &Sc,
    pick: impl Fn(usize, i64, InitializingScoreTrendLevel) -> i64,
) -> Result<Vec<i64>, ScoreArithmeticError> {
    let levels = score.to_level_numbers();
    if trend.levels_size() != levels.len() {
        return Err(ScoreArithmeticError::LevelsSizeMismatch {
            expected: levels.len(),
            actual: trend.levels_size(),
        });
    }
    Ok(levels
        .iter()
        .zip(trend.levels())
        .enumerate()
        .map(|(index, (&level, &trend_level))| pick(index, level, trend_level))
        .collect())
}

fn expect_levels(levels: &[i64], expected: usize) -> Result<(), ScoreArithmeticError> {
    if levels.len() == expected {
        Ok(())
    } else {
        Err(ScoreArithmeticError::LevelsSizeMismatch {
            expected,
            actual: levels.len(),
        })
    }
}

/// Definition of [`SimpleScore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleScoreDefinition;

impl ScoreDefinition for SimpleScoreDefinition {
    type Score = SimpleScore;

    fn level_labels(&self) -> Vec<String> {
        vec!["score".to_string()]
    }

    fn feasible_levels_size(&self) -> usize {
        1
    }

    fn zero_score(&self) -> SimpleScore {
        SimpleScore::ZERO
    }

    fn from_level_numbers(
        &self,
        init_score: i64,
        levels: &[i64],
    ) -> Result<SimpleScore, ScoreArithmeticError> {
        expect_levels(levels, 1)?;
        Ok(SimpleScore::of_uninitialized(init_score, levels[0]))
    }

    fn parse_score(&self, text: &str) -> Result<SimpleScore, ScoreParseError> {
        SimpleScore::parse(text)
    }
}

/// Definition of [`HardSoftScore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HardSoftScoreDefinition;

impl ScoreDefinition for HardSoftScoreDefinition {
    type Score = HardSoftScore;

    fn level_labels(&self) -> Vec<String> {
        vec!["hard score".to_string(), "soft score".to_string()]
    }

    fn feasible_levels_size(&self) -> usize {
        1
    }

    fn zero_score(&self) -> HardSoftScore {
        HardSoftScore::ZERO
    }

    fn from_level_numbers(
        &self,
        init_score: i64,
        levels: &[i64],
    ) -> Result<HardSoftScore, ScoreArithmeticError> {
        expect_levels(levels, 2)?;
        Ok(HardSoftScore::of_uninitialized(
            init_score, levels[0], levels[1],
        ))
    }

    fn parse_score(&self, text: &str) -> Result<HardSoftScore, ScoreParseError> {
        HardSoftScore::parse(text)
    }
}

/// Definition of [`HardMediumSoftScore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HardMediumSoftScoreDefinition;

impl ScoreDefinition for HardMediumSoftScoreDefinition {
    type Score = HardMediumSoftScore;

    fn level_labels(&self) -> Vec<String> {
        vec![
            "hard score".to_string(),
            "medium score".to_string(),
            "soft score".to_string(),
        ]
    }

    fn feasible_levels_size(&self) -> usize {
        1
    }

    fn zero_score(&self) -> HardMediumSoftScore {
        HardMediumSoftScore::ZERO
    }

    fn from_level_numbers(
        &self,
        init_score: i64,
        levels: &[i64],
    ) -> Result<HardMediumSoftScore, ScoreArithmeticError> {
        expect_levels(levels, 3)?;
        Ok(HardMediumSoftScore::of_uninitialized(
            init_score, levels[0], levels[1], levels[2],
        ))
    }

    fn parse_score(&self, text: &str) -> Result<HardMediumSoftScore, ScoreParseError> {
        HardMediumSoftScore::parse(text)
    }
}

/// Definition of [`HardSoftDecimalScore`].
///
/// Level numbers are the scaled fixed-point representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardSoftDecimalScoreDefinition;

impl ScoreDefinition for HardSoftDecimalScoreDefinition {
    type Score = HardSoftDecimalScore;

    fn level_labels(&self) -> Vec<String> {
        vec!["hard score".to_string(), "soft score".to_string()]
    }

    fn feasible_levels_size(&self) -> usize {
        1
    }

    fn zero_score(&self) -> HardSoftDecimalScore {
        HardSoftDecimalScore::ZERO
    }

    fn from_level_numbers(
        &self,
        init_score: i64,
        levels: &[i64],
    ) -> Result<HardSoftDecimalScore, ScoreArithmeticError> {
        expect_levels(levels, 2)?;
        Ok(HardSoftDecimalScore::of_uninitialized_scaled(
            init_score, levels[0], levels[1],
        ))
    }

    fn parse_score(&self, text: &str) -> Result<HardSoftDecimalScore, ScoreParseError> {
        HardSoftDecimalScore::parse(text)
    }
}

/// Definition of [`BendableScore`] with a fixed level layout.
///
/// # Examples
///
/// ```
/// use planloom_core::{BendableScoreDefinition, ScoreDefinition};
///
/// let definition = BendableScoreDefinition::new(1, 2);
/// assert_eq!(definition.level_labels(), vec!["hard 0 score", "soft 0 score", "soft 1 score"]);
/// assert_eq!(definition.feasible_levels_size(), 1);
/// assert!(definition.parse_score("[0]hard/[-1/-2]soft").is_ok());
/// assert!(definition.parse_score("[0/0]hard/[-1/-2]soft").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BendableScoreDefinition {
    hard_levels_size: usize,
    soft_levels_size: usize,
}

impl BendableScoreDefinition {
    pub fn new(hard_levels_size: usize, soft_levels_size: usize) -> Self {
        Self {
            hard_levels_size,
            soft_levels_size,
        }
    }

    pub fn hard_levels_size(&self) -> usize {
        self.hard_levels_size
    }

    pub fn soft_levels_size(&self) -> usize {
        self.soft_levels_size
    }
}

impl ScoreDefinition for BendableScoreDefinition {
    type Score = BendableScore;

    fn level_labels(&self) -> Vec<String> {
        (0..self.hard_levels_size)
            .map(|i| format!("hard {} score", i))
            .chain((0..self.soft_levels_size).map(|i| format!("soft {} score", i)))
            .collect()
    }

    fn feasible_levels_size(&self) -> usize {
        self.hard_levels_size
    }

    fn zero_score(&self) -> BendableScore {
        BendableScore::zero_with_levels(self.hard_levels_size, self.soft_levels_size)
    }

    fn from_level_numbers(
        &self,
        init_score: i64,
        levels: &[i64],
    ) -> Result<BendableScore, ScoreArithmeticError> {
        expect_levels(levels, self.hard_levels_size + self.soft_levels_size)?;
        let (hard, soft) = levels.split_at(self.hard_levels_size);
        Ok(BendableScore::of_uninitialized(
            init_score,
            hard.to_vec(),
            soft.to_vec(),
        ))
    }

    fn parse_score(&self, text: &str) -> Result<BendableScore, ScoreParseError> {
        let score = BendableScore::parse(text)?;
        if score.hard_levels_size() != self.hard_levels_size
            || score.soft_levels_size() != self.soft_levels_size
        {
            return Err(ScoreParseError::new(format!(
                "BendableScore '{}' has {} hard and {} soft levels, expected {} and {}",
                text.trim(),
                score.hard_levels_size(),
                score.soft_levels_size(),
                self.hard_levels_size,
                self.soft_levels_size
            )));
        }
        Ok(score)
    }
}
