//! Initializing score trends used for bound computation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How a score level can move while uninitialized entities get assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializingScoreTrendLevel {
    /// The level may go up or down.
    Any,
    /// Assigning an entity never lowers the level.
    OnlyUp,
    /// Assigning an entity never raises the level.
    OnlyDown,
}

impl InitializingScoreTrendLevel {
    /// Returns the canonical upper snake case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InitializingScoreTrendLevel::Any => "ANY",
            InitializingScoreTrendLevel::OnlyUp => "ONLY_UP",
            InitializingScoreTrendLevel::OnlyDown => "ONLY_DOWN",
        }
    }
}

impl FromStr for InitializingScoreTrendLevel {
    type Err = TrendParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ANY" => Ok(InitializingScoreTrendLevel::Any),
            "ONLY_UP" => Ok(InitializingScoreTrendLevel::OnlyUp),
            "ONLY_DOWN" => Ok(InitializingScoreTrendLevel::OnlyDown),
            other => Err(TrendParseError::UnknownLevel(other.to_string())),
        }
    }
}

/// Error when parsing an initializing score trend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrendParseError {
    #[error("unknown initializing score trend level '{0}'")]
    UnknownLevel(String),

    #[error("initializing score trend has {actual} levels, expected {expected}")]
    LevelsSizeMismatch { expected: usize, actual: usize },
}

/// Per-level trend of a score as entities get initialized.
///
/// # Examples
///
/// ```
/// use planloom_core::{InitializingScoreTrend, InitializingScoreTrendLevel};
///
/// let trend = InitializingScoreTrend::parse("ONLY_DOWN", 2).unwrap();
/// assert_eq!(trend.levels(), &[InitializingScoreTrendLevel::OnlyDown; 2]);
///
/// let mixed = InitializingScoreTrend::parse("ONLY_DOWN/ANY", 2).unwrap();
/// assert_eq!(mixed.level(1), Some(InitializingScoreTrendLevel::Any));
/// assert!(InitializingScoreTrend::parse("ANY/ANY/ANY", 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitializingScoreTrend {
    levels: Vec<InitializingScoreTrendLevel>,
}

impl InitializingScoreTrend {
    /// Creates a trend from explicit levels.
    pub fn new(levels: Vec<InitializingScoreTrendLevel>) -> Self {
        Self { levels }
    }

    /// Creates a trend with the same level repeated `levels_size` times.
    pub fn uniform(level: InitializingScoreTrendLevel, levels_size: usize) -> Self {
        Self {
            levels: vec![level; levels_size],
        }
    }

    /// Parses `"ONLY_DOWN"` (applied to every level) or `"ANY/ONLY_UP/..."`.
    pub fn parse(text: &str, levels_size: usize) -> Result<Self, TrendParseError> {
        let tokens: Vec<&str> = text.split('/').collect();
        if tokens.len() == 1 {
            let level = tokens[0].parse()?;
            return Ok(Self::uniform(level, levels_size));
        }
        if tokens.len() != levels_size {
            return Err(TrendParseError::LevelsSizeMismatch {
                expected: levels_size,
                actual: tokens.len(),
            });
        }
        let levels = tokens
            .iter()
            .map(|t| t.parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    /// Returns the trend of every level.
    pub fn levels(&self) -> &[InitializingScoreTrendLevel] {
        &self.levels
    }

    /// Returns the trend of one level.
    pub fn level(&self, index: usize) -> Option<InitializingScoreTrendLevel> {
        self.levels.get(index).copied()
    }

    /// Returns the number of levels.
    pub fn levels_size(&self) -> usize {
        self.levels.len()
    }

    /// Returns true if every level can only go down.
    pub fn is_only_down(&self) -> bool {
        self.levels
            .iter()
            .all(|l| *l == InitializingScoreTrendLevel::OnlyDown)
    }
}

impl fmt::Display for InitializingScoreTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.levels.iter().map(|l| l.as_str()).collect();
        f.write_str(&parts.join("/"))
    }
}
