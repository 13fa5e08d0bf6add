//! Score director implementations.
//!
//! The score director manages solution state and score calculation.
//!
//! # Score Director Types
//!
//! - [`SimpleScoreDirector`] - Full recalculation (baseline)
//! - [`ConstraintMatchScoreDirector`] - Full recalculation that explains the score
//! - [`IncrementalScoreDirector`] - Incremental scoring from variable change notifications
//! - [`RecordingScoreDirector`] - Automatic undo tracking wrapper

mod constraint_match;
mod incremental;
mod simple;
mod traits;

pub mod recording;



pub use constraint_match::ConstraintMatchScoreDirector;
pub use incremental::{IncrementalScoreCalculator, IncrementalScoreDirector};
pub use recording::RecordingScoreDirector;
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;
