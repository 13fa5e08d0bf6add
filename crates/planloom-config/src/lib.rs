//! Configuration system for planloom.
//!
//! Load solver configuration from TOML or YAML to control termination,
//! phases, acceptors and statistics without code changes.
//!
//! # Examples
//!
//! ```
//! use planloom_config::{PhaseConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     environment_mode = "reproducible"
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [[phases]]
//!     type = "construction_heuristic"
//!     construction_heuristic_type = "best_fit"
//!
//!     [[phases]]
//!     type = "local_search"
//!     [phases.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert!(matches!(config.phases[1], PhaseConfig::LocalSearch(_)));
//! ```
//!
//! Fall back to the defaults when the file is missing:
//!
//! ```
//! use planloom_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use planloom_core::{InitializingScoreTrend, ScoreDefinition, ScoreParseError, TrendParseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of score levels charted by level-based statistics.
pub const DEFAULT_CHARTED_SCORE_LEVEL_SIZE: usize = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid score in configuration: {0}")]
    Score(#[from] ScoreParseError),

    #[error("Invalid initializing score trend: {0}")]
    Trend(#[from] TrendParseError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top level solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Seed for reproducible modes. Defaults to 0 when unset.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Absolute per-level difference tolerated by score corruption checks.
    #[serde(default)]
    pub score_corruption_tolerance: f64,

    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    #[serde(default)]
    pub score_director: ScoreDirectorConfig,

    #[serde(default)]
    pub phases: Vec<PhaseConfig>,

    #[serde(default)]
    pub statistic: StatisticConfig,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Rejects values that deserialize but cannot drive a solver.
    pub fn validate(&self) -> Result<()> {
        if self.score_corruption_tolerance.is_nan() || self.score_corruption_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "score_corruption_tolerance must be >= 0, got {}",
                self.score_corruption_tolerance
            )));
        }
        if self.statistic.charted_score_level_size == 0 {
            return Err(ConfigError::Invalid(
                "statistic.charted_score_level_size must be > 0".to_string(),
            ));
        }
        for phase in &self.phases {
            if let PhaseConfig::LocalSearch(local_search) = phase {
                local_search.validate()?;
            }
        }
        Ok(())
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_score_corruption_tolerance(mut self, tolerance: f64) -> Self {
        self.score_corruption_tolerance = tolerance;
        self
    }

    pub fn with_constraint_match_enabled(mut self, enabled: bool) -> Self {
        self.score_director.constraint_match_enabled = enabled;
        self
    }

    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_statistic(mut self, statistic: StatisticConfig) -> Self {
        self.statistic = statistic;
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// The random seed used by reproducible modes.
    pub fn effective_random_seed(&self) -> Option<u64> {
        if self.environment_mode.is_reproducible() {
            Some(self.random_seed.unwrap_or(0))
        } else {
            self.random_seed
        }
    }
}

/// Controls randomness and the score corruption assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeds the random generator from the operating system.
    NonReproducible,

    /// Seeds the random generator from `random_seed`.
    #[default]
    Reproducible,

    /// Reproducible, and checks the step score against a full recalculation.
    FastAssert,

    /// Like `FastAssert`, and also checks every evaluated move and undo.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_reproducible(&self) -> bool {
        !matches!(self, EnvironmentMode::NonReproducible)
    }

    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }

    pub fn is_fully_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// How several termination limits combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationComposition {
    /// Stop as soon as any limit is reached.
    #[default]
    Or,
    /// Stop once every limit is reached.
    And,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    pub seconds_spent_limit: Option<u64>,

    pub milliseconds_spent_limit: Option<u64>,

    /// Score string, parsed with the solver's score definition.
    pub best_score_limit: Option<String>,

    pub best_score_feasible: Option<bool>,

    pub step_count_limit: Option<u64>,

    pub unimproved_step_count_limit: Option<u64>,

    pub unimproved_seconds_spent_limit: Option<u64>,

    pub unimproved_milliseconds_spent_limit: Option<u64>,

    #[serde(default)]
    pub termination_composition: TerminationComposition,
}

impl TerminationConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.milliseconds_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        let millis = self.unimproved_seconds_spent_limit.unwrap_or(0) * 1000
            + self.unimproved_milliseconds_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    /// Parses `best_score_limit` with `definition`.
    pub fn best_score_limit<D: ScoreDefinition>(&self, definition: &D) -> Result<Option<D::Score>> {
        match &self.best_score_limit {
            Some(text) => Ok(Some(definition.parse_score(text)?)),
            None => Ok(None),
        }
    }

    /// Returns true when no limit is configured.
    pub fn is_empty(&self) -> bool {
        self.time_limit().is_none()
            && self.best_score_limit.is_none()
            && !self.best_score_feasible.unwrap_or(false)
            && self.step_count_limit.is_none()
            && self.unimproved_step_count_limit.is_none()
            && self.unimproved_time_limit().is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreDirectorConfig {
    #[serde(default)]
    pub constraint_match_enabled: bool,

    /// `"ONLY_DOWN"` for every level, or one token per level such as `"ONLY_DOWN/ANY"`.
    ///
    /// When set, construction heuristic steps end as soon as a candidate
    /// reaches the optimistic bound of the previous step score.
    pub initializing_score_trend: Option<String>,
}

impl ScoreDirectorConfig {
    pub fn initializing_score_trend(&self, levels_size: usize) -> Result<InitializingScoreTrend> {
        match &self.initializing_score_trend {
            Some(text) => Ok(InitializingScoreTrend::parse(text, levels_size)?),
            None => Ok(InitializingScoreTrend::uniform(
                planloom_core::InitializingScoreTrendLevel::Any,
                levels_size,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    ConstructionHeuristic(ConstructionHeuristicConfig),

    LocalSearch(LocalSearchConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    #[serde(default)]
    pub construction_heuristic_type: ConstructionHeuristicType,

    pub termination: Option<TerminationConfig>,
}

/// Which candidate value the construction heuristic assigns to each entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicType {
    /// The first doable value.
    #[default]
    FirstFit,

    /// The value with the best resulting score.
    BestFit,

    /// The first value with a feasible score, else the best one.
    FirstFeasible,

    /// The first value that does not lower the score, else the best one.
    FirstNonDeterioratingScore,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    pub acceptor: Option<AcceptorConfig>,

    pub forager: Option<ForagerConfig>,

    pub termination: Option<TerminationConfig>,
}

impl LocalSearchConfig {
    fn validate(&self) -> Result<()> {
        match &self.acceptor {
            Some(AcceptorConfig::LateAcceptance(la)) if la.late_acceptance_size == Some(0) => {
                Err(ConfigError::Invalid(
                    "late_acceptance_size must be > 0".to_string(),
                ))
            }
            Some(AcceptorConfig::EntityTabu(tabu)) if tabu.entity_tabu_size == Some(0) => Err(
                ConfigError::Invalid("entity_tabu_size must be > 0".to_string()),
            ),
            Some(AcceptorConfig::SimulatedAnnealing(sa))
                if sa
                    .decay_rate
                    .is_some_and(|rate| rate.is_nan() || rate <= 0.0 || rate > 1.0) =>
            {
                Err(ConfigError::Invalid(
                    "decay_rate must be in (0, 1]".to_string(),
                ))
            }
            _ => match &self.forager {
                Some(forager) if forager.accepted_count_limit == Some(0) => Err(
                    ConfigError::Invalid("accepted_count_limit must be > 0".to_string()),
                ),
                _ => Ok(()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    HillClimbing,

    EntityTabu(EntityTabuConfig),

    SimulatedAnnealing(SimulatedAnnealingConfig),

    LateAcceptance(LateAcceptanceConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EntityTabuConfig {
    pub entity_tabu_size: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Per-level starting temperature as a score string, e.g. `"0hard/10soft"`.
    pub starting_temperature: Option<String>,

    /// Factor applied to the temperature after every step.
    pub decay_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    pub late_acceptance_size: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ForagerConfig {
    pub accepted_count_limit: Option<usize>,

    #[serde(default)]
    pub pick_early_type: PickEarlyType,

    #[serde(default)]
    pub breaking_tie_randomly: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickEarlyType {
    /// Forage up to `accepted_count_limit` accepted moves.
    #[default]
    Never,

    /// Stop at the first accepted move.
    FirstAccepted,

    /// Stop at the first accepted move that beats the best score.
    FirstBestScoreImproving,
}

/// Settings for statistics recorded while solving.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatisticConfig {
    /// Score levels at or above this index are not charted.
    #[serde(default = "default_charted_score_level_size")]
    pub charted_score_level_size: usize,

    /// Whether the synthetic point repeated at the end of a local search
    /// phase is also written to CSV exports.
    #[serde(default)]
    pub export_trailing_point: bool,
}

fn default_charted_score_level_size() -> usize {
    DEFAULT_CHARTED_SCORE_LEVEL_SIZE
}

impl Default for StatisticConfig {
    fn default() -> Self {
        Self {
            charted_score_level_size: DEFAULT_CHARTED_SCORE_LEVEL_SIZE,
            export_trailing_point: false,
        }
    }
}

#[cfg(test)]
mod tests;
