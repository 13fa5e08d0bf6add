//! Incremental score director driven by a user calculator.

use planloom_core::domain::PlanningSolution;
use planloom_core::score::Score;

use super::traits::ScoreDirector;

/// Calculator that keeps its score up to date from variable change events.
///
/// The director calls `before_variable_changed` with the old state and
/// `after_variable_changed` with the new state of the same entity, so the
/// calculator can retract the old contribution and insert the new one.
pub trait IncrementalScoreCalculator<S: PlanningSolution>: Send {
    /// Rebuilds all internal state from `solution`.
    fn reset_working_solution(&mut self, solution: &S);

    fn before_variable_changed(&mut self, solution: &S, entity_index: usize);

    fn after_variable_changed(&mut self, solution: &S, entity_index: usize);

    /// Returns the score of the current state, without an init score.
    fn calculate_score(&self) -> S::Score;
}

/// A score director that delegates to an [`IncrementalScoreCalculator`].
///
/// [`ScoreDirector::calculate_score_from_scratch`] runs a clone of the
/// calculator over the whole solution, which is how corrupted incremental
/// state gets detected.
pub struct IncrementalScoreDirector<S: PlanningSolution, C> {
    working_solution: S,
    calculator: C,
    // Set when the solution is mutated outside a before/after pair.
    needs_reset: bool,
    in_change: bool,
}

impl<S, C> IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S> + Clone,
{
    pub fn new(solution: S, mut calculator: C) -> Self {
        calculator.reset_working_solution(&solution);
        Self {
            working_solution: solution,
            calculator,
            needs_reset: false,
            in_change: false,
        }
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    pub fn into_working_solution(self) -> S {
        self.working_solution
    }

    fn sync(&mut self) {
        if self.needs_reset {
            self.calculator.reset_working_solution(&self.working_solution);
            self.needs_reset = false;
        }
    }
}

impl<S, C> ScoreDirector<S> for IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S> + Clone,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        if !self.in_change {
            self.needs_reset = true;
        }
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        self.sync();
        let score = self
            .calculator
            .calculate_score()
            .with_init_score(self.working_solution.init_score());
        self.working_solution.set_score(Some(score.clone()));
        score
    }

    fn calculate_score_from_scratch(&mut self) -> S::Score {
        let mut fresh = self.calculator.clone();
        fresh.reset_working_solution(&self.working_solution);
        fresh
            .calculate_score()
            .with_init_score(self.working_solution.init_score())
    }

    fn clone_working_solution(&self) -> S {
        self.working_solution.clone()
    }

    fn before_variable_changed(
        &mut self,
        _descriptor_index: usize,
        entity_index: usize,
        _variable_name: &str,
    ) {
        self.sync();
        self.calculator
            .before_variable_changed(&self.working_solution, entity_index);
        self.in_change = true;
    }

    fn after_variable_changed(
        &mut self,
        _descriptor_index: usize,
        entity_index: usize,
        _variable_name: &str,
    ) {
        self.in_change = false;
        if self.needs_reset {
            self.sync();
        } else {
            self.calculator
                .after_variable_changed(&self.working_solution, entity_index);
        }
    }

    fn is_incremental(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.calculator.reset_working_solution(&self.working_solution);
        self.needs_reset = false;
        self.in_change = false;
    }
}
