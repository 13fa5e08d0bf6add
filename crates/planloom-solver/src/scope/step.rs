//! Step-level scopes handed to listeners after each step.

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::PhaseScope;

/// A finished construction heuristic step: one entity was visited.
#[derive(Debug)]
pub struct ConstructionHeuristicStepScope<'p, 'a, S: PlanningSolution, D: ScoreDirector<S>> {
    pub(crate) phase_scope: &'p PhaseScope<'a, S, D>,
    pub(crate) step_index: u64,
    pub(crate) step_score: S::Score,
    pub(crate) best_score_improved: bool,
    pub(crate) entity_index: usize,
    pub(crate) move_description: Option<String>,
}

impl<'p, 'a, S: PlanningSolution, D: ScoreDirector<S>> ConstructionHeuristicStepScope<'p, 'a, S, D> {
    /// Index of the visited entity.
    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    /// The assignment made, `None` if the entity stayed unassigned.
    pub fn move_description(&self) -> Option<&str> {
        self.move_description.as_deref()
    }
}

/// A finished local search step: one move was committed.
#[derive(Debug)]
pub struct LocalSearchStepScope<'p, 'a, S: PlanningSolution, D: ScoreDirector<S>> {
    pub(crate) phase_scope: &'p PhaseScope<'a, S, D>,
    pub(crate) step_index: u64,
    pub(crate) step_score: S::Score,
    pub(crate) best_score_improved: bool,
    pub(crate) move_description: String,
    pub(crate) accepted_move_count: usize,
}

impl<'p, 'a, S: PlanningSolution, D: ScoreDirector<S>> LocalSearchStepScope<'p, 'a, S, D> {
    pub fn move_description(&self) -> &str {
        &self.move_description
    }

    /// Moves the forager collected before picking the committed one.
    pub fn accepted_move_count(&self) -> usize {
        self.accepted_move_count
    }
}

/// A finished step of either phase kind.
#[derive(Debug)]
pub enum StepScope<'p, 'a, S: PlanningSolution, D: ScoreDirector<S>> {
    ConstructionHeuristic(ConstructionHeuristicStepScope<'p, 'a, S, D>),
    LocalSearch(LocalSearchStepScope<'p, 'a, S, D>),
}

impl<'p, 'a, S: PlanningSolution, D: ScoreDirector<S>> StepScope<'p, 'a, S, D> {
    pub fn phase_scope(&self) -> &'p PhaseScope<'a, S, D> {
        match self {
            StepScope::ConstructionHeuristic(step) => step.phase_scope,
            StepScope::LocalSearch(step) => step.phase_scope,
        }
    }

    /// Index of this step within its phase, starting at 0.
    pub fn step_index(&self) -> u64 {
        match self {
            StepScope::ConstructionHeuristic(step) => step.step_index,
            StepScope::LocalSearch(step) => step.step_index,
        }
    }

    pub fn step_score(&self) -> &S::Score {
        match self {
            StepScope::ConstructionHeuristic(step) => &step.step_score,
            StepScope::LocalSearch(step) => &step.step_score,
        }
    }

    /// True iff the step score strictly beat the previous best score.
    pub fn best_score_improved(&self) -> bool {
        match self {
            StepScope::ConstructionHeuristic(step) => step.best_score_improved,
            StepScope::LocalSearch(step) => step.best_score_improved,
        }
    }

    /// Milliseconds since the solve started.
    pub fn time_millis_spent(&self) -> u64 {
        self.phase_scope().time_millis_spent()
    }

    pub fn score_director(&self) -> &'p D {
        self.phase_scope().score_director()
    }

    pub fn is_local_search(&self) -> bool {
        matches!(self, StepScope::LocalSearch(_))
    }
}
