//! planloom - a metaheuristic constraint solver in Rust
//!
//! A solve runs a construction heuristic that assigns every uninitialized
//! planning variable, then a local search that improves the result until a
//! termination condition is met.
//!
//! # Example
//!
//! ```rust
//! use planloom::prelude::*;
//!
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! assert_eq!(HardSoftScoreDefinition.parse_score("0hard/-100soft").unwrap(), score);
//! ```

// Score types
pub use planloom_core::score::{
    BendableScore, BendableScoreDefinition, HardMediumSoftScore, HardMediumSoftScoreDefinition,
    HardSoftDecimalScore, HardSoftDecimalScoreDefinition, HardSoftScore, HardSoftScoreDefinition,
    InitializingScoreTrend, InitializingScoreTrendLevel, LevelNumber, Score, ScoreDefinition,
    SimpleScore, SimpleScoreDefinition,
};

// Constraint match accounting
pub use planloom_core::{
    ConstraintJustification, ConstraintMatch, ConstraintMatchTotal, ConstraintRef, EntityRef,
    ScoreHolder,
};

// Domain traits
pub use planloom_core::{PlanningEntity, PlanningSolution};

// Score directors
pub use planloom_scoring::{
    ConstraintMatchScoreDirector, IncrementalScoreCalculator, IncrementalScoreDirector,
    ScoreDirector, SimpleScoreDirector,
};

pub use planloom_config::{EnvironmentMode, SolverConfig, StatisticConfig, TerminationConfig};

pub use planloom_solver::{
    build_solver, ListenerHandle, PhaseLifecycleListener, SolveResult, Solver, SolverError,
    StepScope,
};

pub use planloom_benchmark::{
    ConstraintMatchTotalBestScorePoint, ConstraintMatchTotalBestScoreStatistic,
};

#[cfg(feature = "console")]
pub use planloom_console as console;

mod run;
pub use run::{run_solver, BasicVariable};

pub mod prelude {
    pub use super::{
        BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftScore, Score,
        SimpleScore,
    };
    pub use super::{
        BendableScoreDefinition, HardMediumSoftScoreDefinition, HardSoftDecimalScoreDefinition,
        HardSoftScoreDefinition, ScoreDefinition, SimpleScoreDefinition,
    };
    pub use super::{ConstraintJustification, ConstraintRef, ScoreHolder};
    pub use super::{PlanningEntity, PlanningSolution};
    pub use super::{ScoreDirector, SimpleScoreDirector, SolverConfig};
    pub use super::{run_solver, BasicVariable};
}
