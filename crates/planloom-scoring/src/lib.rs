//! Score directors for planloom.
//!
//! A score director owns the working solution and recalculates its score on
//! demand. The solver only talks to it through [`ScoreDirector`]:
//!
//! - [`SimpleScoreDirector`] - full recalculation from a closure
//! - [`ConstraintMatchScoreDirector`] - full recalculation with constraint match totals
//! - [`IncrementalScoreDirector`] - delta updates through an [`IncrementalScoreCalculator`]
//! - [`RecordingScoreDirector`] - undo tracking wrapper used to evaluate moves

pub mod director;

pub use director::{
    ConstraintMatchScoreDirector, IncrementalScoreCalculator, IncrementalScoreDirector,
    RecordingScoreDirector, ScoreDirector, SimpleScoreDirector,
};
