//! Move trait definition.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

/// A move that modifies one or more planning variables.
///
/// Methods are generic over the score director so the same move runs
/// against a concrete director or a `RecordingScoreDirector`.
///
/// # Implementation Notes
/// - `do_move` must notify the director before and after every change
///   and register an undo closure for it
/// - `describe` is used in score corruption reports
pub trait Move<S: PlanningSolution>: Send + Sync + Debug {
    /// Returns true if this move changes the working solution.
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool;

    /// Executes this move, modifying the working solution.
    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D);

    /// Returns the descriptor index of the entity type this move affects.
    fn descriptor_index(&self) -> usize;

    /// Returns the entity indices involved in this move.
    fn entity_indices(&self) -> &[usize];

    /// Returns the variable name this move affects.
    fn variable_name(&self) -> &str;

    /// Human readable summary of the move.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}
