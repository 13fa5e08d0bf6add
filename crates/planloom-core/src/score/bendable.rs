//! BendableScore - Runtime-configurable multi-level score

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::traits::{
    check_divisor, floor_divide, floor_multiply, init_prefix, split_init_prefix, ParseableScore,
    Score, ScoreArithmeticError, ScoreParseError,
};

/// A score with a configurable number of hard and soft levels.
///
/// Unlike `HardSoftScore`, the number of levels is determined at runtime.
/// This is useful when the constraint structure varies between problem instances.
///
/// # Examples
///
/// ```
/// use planloom_core::{BendableScore, ParseableScore, Score};
///
/// // Create a score with 2 hard levels and 3 soft levels
/// let score = BendableScore::of(vec![-1, -2], vec![-10, -20, -30]);
///
/// assert_eq!(score.hard_levels_size(), 2);
/// assert_eq!(score.soft_levels_size(), 3);
/// assert!(!score.is_feasible());  // Negative hard scores
/// assert_eq!(score.to_string(), "[-1/-2]hard/[-10/-20/-30]soft");
/// assert_eq!(BendableScore::parse("[-1/-2]hard/[-10/-20/-30]soft").unwrap(), score);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BendableScore {
    init_score: i64,
    hard_scores: Vec<i64>,
    soft_scores: Vec<i64>,
}

impl BendableScore {
    /// Creates a new initialized BendableScore with the given hard and soft score vectors.
    pub fn of(hard_scores: Vec<i64>, soft_scores: Vec<i64>) -> Self {
        BendableScore::of_uninitialized(0, hard_scores, soft_scores)
    }

    /// Creates a BendableScore with an explicit init score.
    pub fn of_uninitialized(init_score: i64, hard_scores: Vec<i64>, soft_scores: Vec<i64>) -> Self {
        BendableScore {
            init_score,
            hard_scores,
            soft_scores,
        }
    }

    /// Creates a zero score with the specified number of levels.
    pub fn zero_with_levels(hard_levels: usize, soft_levels: usize) -> Self {
        BendableScore::of(vec![0; hard_levels], vec![0; soft_levels])
    }

    /// Returns the number of hard score levels.
    pub fn hard_levels_size(&self) -> usize {
        self.hard_scores.len()
    }

    /// Returns the number of soft score levels.
    pub fn soft_levels_size(&self) -> usize {
        self.soft_scores.len()
    }

    /// Returns the hard score at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn hard_score(&self, level: usize) -> i64 {
        self.hard_scores[level]
    }

    /// Returns the soft score at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn soft_score(&self, level: usize) -> i64 {
        self.soft_scores[level]
    }

    /// Returns all hard scores as a slice.
    pub fn hard_scores(&self) -> &[i64] {
        &self.hard_scores
    }

    /// Returns all soft scores as a slice.
    pub fn soft_scores(&self) -> &[i64] {
        &self.soft_scores
    }

    /// Creates a score with a single hard level penalty at the given index.
    pub fn one_hard(hard_levels: usize, soft_levels: usize, level: usize) -> Self {
        let mut score = BendableScore::zero_with_levels(hard_levels, soft_levels);
        score.hard_scores[level] = 1;
        score
    }

    /// Creates a score with a single soft level penalty at the given index.
    pub fn one_soft(hard_levels: usize, soft_levels: usize, level: usize) -> Self {
        let mut score = BendableScore::zero_with_levels(hard_levels, soft_levels);
        score.soft_scores[level] = 1;
        score
    }

    fn map_levels(&self, init_score: i64, f: impl Fn(i64) -> i64) -> Self {
        BendableScore {
            init_score,
            hard_scores: self.hard_scores.iter().map(|&s| f(s)).collect(),
            soft_scores: self.soft_scores.iter().map(|&s| f(s)).collect(),
        }
    }

    fn zip_levels(&self, other: &Self, f: impl Fn(i64, i64) -> i64) -> Self {
        self.ensure_compatible(other);
        BendableScore {
            init_score: f(self.init_score, other.init_score),
            hard_scores: self
                .hard_scores
                .iter()
                .zip(other.hard_scores.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            soft_scores: self
                .soft_scores
                .iter()
                .zip(other.soft_scores.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    fn ensure_compatible(&self, other: &Self) {
        assert_eq!(
            self.hard_scores.len(),
            other.hard_scores.len(),
            "Incompatible hard levels: {} vs {}",
            self.hard_scores.len(),
            other.hard_scores.len()
        );
        assert_eq!(
            self.soft_scores.len(),
            other.soft_scores.len(),
            "Incompatible soft levels: {} vs {}",
            self.soft_scores.len(),
            other.soft_scores.len()
        );
    }
}

impl Default for BendableScore {
    fn default() -> Self {
        // Default to 1 hard + 1 soft level (like HardSoftScore)
        BendableScore::zero_with_levels(1, 1)
    }
}

impl Score for BendableScore {
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        BendableScore {
            init_score,
            ..self.clone()
        }
    }

    fn is_feasible(&self) -> bool {
        self.init_score == 0 && self.hard_scores.iter().all(|&s| s >= 0)
    }

    fn zero() -> Self {
        BendableScore::default()
    }

    fn levels_size(&self) -> usize {
        self.hard_scores.len() + self.soft_scores.len()
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        let mut levels = self.hard_scores.clone();
        levels.extend(self.soft_scores.iter());
        levels
    }

    fn is_compatible_with(&self, other: &Self) -> bool {
        self.hard_scores.len() == other.hard_scores.len()
            && self.soft_scores.len() == other.soft_scores.len()
    }

    fn multiply(&self, multiplicand: f64) -> Self {
        self.map_levels(floor_multiply(self.init_score, multiplicand), |s| {
            floor_multiply(s, multiplicand)
        })
    }

    fn divide(&self, divisor: f64) -> Result<Self, ScoreArithmeticError> {
        check_divisor(divisor)?;
        Ok(self.map_levels(floor_divide(self.init_score, divisor), |s| {
            floor_divide(s, divisor)
        }))
    }

    fn abs(&self) -> Self {
        self.map_levels(self.init_score.saturating_abs(), i64::saturating_abs)
    }
}

impl Ord for BendableScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.init_score
            .cmp(&other.init_score)
            .then_with(|| self.hard_scores.cmp(&other.hard_scores))
            .then_with(|| self.soft_scores.cmp(&other.soft_scores))
    }
}

impl PartialOrd for BendableScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// # Panics
/// Panics if the level layouts differ; use [`Score::checked_add`] to get an error instead.
impl Add for BendableScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.zip_levels(&other, i64::saturating_add)
    }
}

/// # Panics
/// Panics if the level layouts differ; use [`Score::checked_sub`] to get an error instead.
impl Sub for BendableScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.zip_levels(&other, i64::saturating_sub)
    }
}

impl Neg for BendableScore {
    type Output = Self;

    fn neg(self) -> Self {
        self.map_levels(self.init_score.saturating_neg(), i64::saturating_neg)
    }
}

impl fmt::Debug for BendableScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BendableScore(init: {}, hard: {:?}, soft: {:?})",
            self.init_score, self.hard_scores, self.soft_scores
        )
    }
}

impl fmt::Display for BendableScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "[0/0]hard/[-10/-20/-30]soft"
        let hard_str: Vec<String> = self.hard_scores.iter().map(|s| s.to_string()).collect();
        let soft_str: Vec<String> = self.soft_scores.iter().map(|s| s.to_string()).collect();

        write!(
            f,
            "{}[{}]hard/[{}]soft",
            init_prefix(self.init_score),
            hard_str.join("/"),
            soft_str.join("/")
        )
    }
}

fn parse_bracketed(part: &str, suffix: &str) -> Result<Vec<i64>, ScoreParseError> {
    let part = part.trim();
    let inner = part
        .strip_suffix(suffix)
        .and_then(|p| p.strip_prefix('['))
        .and_then(|p| p.strip_suffix(']'))
        .ok_or_else(|| {
            ScoreParseError::new(format!(
                "{} part '{}' must look like '[...]{}'",
                suffix, part, suffix
            ))
        })?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split('/')
        .map(|v| {
            let v = v.trim();
            v.parse::<i64>().map_err(|e| {
                ScoreParseError::new(format!("Invalid {} score '{}': {}", suffix, v, e))
            })
        })
        .collect()
}

impl ParseableScore for BendableScore {
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let (init_score, levels) = split_init_prefix(s)?;

        // Format: "[0/0]hard/[-10/-20/-30]soft"
        let (hard_part, soft_part) = levels.split_once("hard/").ok_or_else(|| {
            ScoreParseError::new(format!(
                "Invalid BendableScore format '{}': expected '[...]hard/[...]soft'",
                s
            ))
        })?;

        let hard_scores = parse_bracketed(&format!("{}hard", hard_part), "hard")?;
        let soft_scores = parse_bracketed(soft_part, "soft")?;
        Ok(BendableScore::of_uninitialized(
            init_score,
            hard_scores,
            soft_scores,
        ))
    }

    fn to_string_repr(&self) -> String {
        self.to_string()
    }
}
