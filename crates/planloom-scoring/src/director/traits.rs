// Score director trait definition.

use planloom_core::domain::PlanningSolution;
use planloom_core::ConstraintMatchTotal;

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Maintaining the working solution
// - Calculating scores (incrementally when possible)
// - Notifying about variable changes for incremental updates
// - Exposing constraint match totals when constraint matching is enabled
//
// Every calculated score carries the init score of the working solution.
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    fn working_solution_mut(&mut self) -> &mut S;

    // Calculates and returns the current score.
    fn calculate_score(&mut self) -> S::Score;

    // Recalculates the score ignoring any incremental state.
    //
    // Used by score corruption assertions. Directors that always
    // recalculate fully can keep the default.
    fn calculate_score_from_scratch(&mut self) -> S::Score {
        self.calculate_score()
    }

    // Returns the score stored on the working solution by the last calculation.
    fn working_score(&self) -> Option<S::Score> {
        self.working_solution().score()
    }

    // Clones the working solution.
    fn clone_working_solution(&self) -> S;

    // Called before a planning variable is changed.
    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    // Called after a planning variable is changed.
    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    // Returns true if this score director supports incremental scoring.
    fn is_incremental(&self) -> bool {
        false
    }

    // Returns true if the last calculation recorded constraint matches.
    fn is_constraint_match_enabled(&self) -> bool {
        false
    }

    // Asks the director to record constraint matches from now on.
    //
    // Directors that cannot explain their score ignore the preference,
    // and keep answering false from `is_constraint_match_enabled`.
    fn set_constraint_match_enabled_preference(&mut self, _preference: bool) {}

    // Returns the constraint match totals of the last calculation.
    //
    // Empty unless `is_constraint_match_enabled` is true.
    fn constraint_match_totals(&self) -> &[ConstraintMatchTotal<S::Score>] {
        &[]
    }

    // Resets the score director state.
    fn reset(&mut self) {}

    // Registers a typed undo closure.
    //
    // Called by moves after applying changes to enable automatic undo.
    // The closure will be called in reverse order during `undo_changes()`.
    //
    // Default implementation does nothing (for non-recording directors).
    fn register_undo(&mut self, _undo: Box<dyn FnOnce(&mut S) + Send>) {
        // Default: no-op - only RecordingScoreDirector stores undo closures
    }
}
