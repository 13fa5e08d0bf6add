// Recording score director for move evaluation with undo.
//
// Moves register a typed undo closure for every variable they change.
// The solver evaluates a move like this:
//
// ```text
// let mut recording = RecordingScoreDirector::new(&mut inner);
// mov.do_move(&mut recording);
// let score = recording.calculate_score();
// recording.undo_changes();
// ```

use planloom_core::domain::PlanningSolution;
use planloom_core::ConstraintMatchTotal;

use super::ScoreDirector;

// A score director wrapper that stores typed undo closures.
//
// # Example
//
// ```
// use planloom_core::{PlanningSolution, SimpleScore};
// use planloom_scoring::{RecordingScoreDirector, ScoreDirector, SimpleScoreDirector};
//
// #[derive(Clone)]
// struct Solution { value: i64, score: Option<SimpleScore> }
//
// impl PlanningSolution for Solution {
//     type Score = SimpleScore;
//     fn score(&self) -> Option<Self::Score> { self.score }
//     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
// }
//
// let mut sd = SimpleScoreDirector::new(
//     Solution { value: 10, score: None },
//     |s: &Solution| SimpleScore::of(-s.value),
// );
//
// let mut recording = RecordingScoreDirector::new(&mut sd);
// let old_value = recording.working_solution().value;
// recording.before_variable_changed(0, 0, "value");
// recording.working_solution_mut().value = 20;
// recording.after_variable_changed(0, 0, "value");
// recording.register_undo(Box::new(move |s: &mut Solution| s.value = old_value));
// assert_eq!(recording.calculate_score(), SimpleScore::of(-20));
//
// recording.undo_changes();
// assert_eq!(recording.working_solution().value, 10);
// assert_eq!(recording.calculate_score(), SimpleScore::of(-10));
// ```
pub struct RecordingScoreDirector<'a, S: PlanningSolution> {
    inner: &'a mut dyn ScoreDirector<S>,
    undo_stack: Vec<Box<dyn FnOnce(&mut S) + Send>>,
    // (descriptor_index, entity_index) pairs touched since the last undo.
    modified_entities: Vec<(usize, usize)>,
}

impl<'a, S: PlanningSolution> RecordingScoreDirector<'a, S> {
    pub fn new(inner: &'a mut dyn ScoreDirector<S>) -> Self {
        Self {
            inner,
            undo_stack: Vec::with_capacity(8),
            modified_entities: Vec::with_capacity(4),
        }
    }

    // Undoes all recorded changes in reverse order.
    //
    // Every modified entity is announced before and after the restore,
    // so an incremental director retracts the moved state and inserts
    // the restored one.
    pub fn undo_changes(&mut self) {
        for &(descriptor_index, entity_index) in &self.modified_entities {
            self.inner
                .before_variable_changed(descriptor_index, entity_index, "");
        }

        while let Some(undo) = self.undo_stack.pop() {
            undo(self.inner.working_solution_mut());
        }

        for (descriptor_index, entity_index) in self.modified_entities.drain(..) {
            self.inner
                .after_variable_changed(descriptor_index, entity_index, "");
        }
    }

    // Drops recorded changes without undoing them.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.modified_entities.clear();
    }

    pub fn change_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    // Entities changed since the last undo, in first-touched order.
    pub fn modified_entities(&self) -> &[(usize, usize)] {
        &self.modified_entities
    }
}

impl<S: PlanningSolution> ScoreDirector<S> for RecordingScoreDirector<'_, S> {
    fn working_solution(&self) -> &S {
        self.inner.working_solution()
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.inner.working_solution_mut()
    }

    fn calculate_score(&mut self) -> S::Score {
        self.inner.calculate_score()
    }

    fn calculate_score_from_scratch(&mut self) -> S::Score {
        self.inner.calculate_score_from_scratch()
    }

    fn clone_working_solution(&self) -> S {
        self.inner.clone_working_solution()
    }

    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        self.inner
            .before_variable_changed(descriptor_index, entity_index, variable_name);
    }

    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) {
        self.inner
            .after_variable_changed(descriptor_index, entity_index, variable_name);

        let key = (descriptor_index, entity_index);
        if !self.modified_entities.contains(&key) {
            self.modified_entities.push(key);
        }
    }

    fn is_incremental(&self) -> bool {
        self.inner.is_incremental()
    }

    fn is_constraint_match_enabled(&self) -> bool {
        self.inner.is_constraint_match_enabled()
    }

    fn set_constraint_match_enabled_preference(&mut self, preference: bool) {
        self.inner.set_constraint_match_enabled_preference(preference);
    }

    fn constraint_match_totals(&self) -> &[ConstraintMatchTotal<S::Score>] {
        self.inner.constraint_match_totals()
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.clear();
    }

    fn register_undo(&mut self, undo: Box<dyn FnOnce(&mut S) + Send>) {
        self.undo_stack.push(undo);
    }
}
