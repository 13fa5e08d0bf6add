//! Phase-level scope.

use std::fmt;
use std::time::{Duration, Instant};

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::{SolverScope, StepScope};
use crate::statistics::PhaseStatistics;
use crate::termination::Termination;

/// The algorithm a phase runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    ConstructionHeuristic,
    LocalSearch,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::ConstructionHeuristic => "ConstructionHeuristic",
            PhaseKind::LocalSearch => "LocalSearch",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope for a single phase of solving.
///
/// # Type Parameters
/// * `'a` - Lifetime of the solver scope reference
/// * `S` - The planning solution type
/// * `D` - The score director type
pub struct PhaseScope<'a, S: PlanningSolution, D: ScoreDirector<S>> {
    solver_scope: &'a mut SolverScope<S, D>,
    phase_index: usize,
    phase_kind: PhaseKind,
    starting_score: S::Score,
    last_step_score: S::Score,
    step_count: u64,
    start_time: Instant,
    last_improvement_step_count: u64,
    last_improvement_time: Instant,
    ended_early: bool,
    moves_evaluated_at_start: u64,
    moves_accepted_at_start: u64,
}

impl<'a, S: PlanningSolution, D: ScoreDirector<S>> PhaseScope<'a, S, D> {
    /// Creates a new phase scope and takes the next phase index.
    pub fn new(solver_scope: &'a mut SolverScope<S, D>, phase_kind: PhaseKind) -> Self {
        let phase_index = solver_scope.next_phase_index();
        let starting_score = solver_scope.calculate_score();
        let statistics = solver_scope.statistics();
        let moves_evaluated_at_start = statistics.current_moves_evaluated();
        let moves_accepted_at_start = statistics.current_moves_accepted();
        let now = Instant::now();
        Self {
            solver_scope,
            phase_index,
            phase_kind,
            last_step_score: starting_score.clone(),
            starting_score,
            step_count: 0,
            start_time: now,
            last_improvement_step_count: 0,
            last_improvement_time: now,
            ended_early: false,
            moves_evaluated_at_start,
            moves_accepted_at_start,
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase_kind
    }

    pub fn starting_score(&self) -> &S::Score {
        &self.starting_score
    }

    /// Score of the working solution after the last step.
    pub fn last_step_score(&self) -> &S::Score {
        &self.last_step_score
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.solver_scope.best_score()
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Milliseconds since the solve started.
    pub fn time_millis_spent(&self) -> u64 {
        self.solver_scope.time_millis_spent()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Steps of this phase since it last improved the best score.
    pub fn unimproved_step_count(&self) -> u64 {
        self.step_count - self.last_improvement_step_count
    }

    /// Time since this phase last improved the best score.
    pub fn unimproved_time(&self) -> Duration {
        self.last_improvement_time.elapsed()
    }

    /// True when the phase stopped because no move was accepted.
    pub fn ended_early(&self) -> bool {
        self.ended_early
    }

    pub(crate) fn mark_ended_early(&mut self) {
        self.ended_early = true;
    }

    /// Records a committed step and updates the best solution on strict
    /// improvement.
    ///
    /// Returns whether the best score improved.
    pub(crate) fn complete_step(&mut self, step_score: &S::Score) -> bool {
        self.step_count += 1;
        self.solver_scope.increment_step_count();
        self.last_step_score = step_score.clone();
        let improved = self.solver_scope.update_best_solution(step_score);
        if improved {
            self.last_improvement_step_count = self.step_count;
            self.last_improvement_time = Instant::now();
        }
        improved
    }

    pub fn solver_scope(&self) -> &SolverScope<S, D> {
        self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope<S, D> {
        self.solver_scope
    }

    pub fn score_director(&self) -> &D {
        self.solver_scope.score_director()
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        self.solver_scope.score_director_mut()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.solver_scope.calculate_score()
    }

    /// Returns true if the solver or this phase must stop before the next step.
    pub fn is_terminated(&self, phase_termination: Option<&dyn Termination<S, D>>) -> bool {
        self.solver_scope.is_terminated()
            || phase_termination.is_some_and(|t| t.is_phase_terminated(self))
    }

    pub fn fire_phase_started(&self) {
        for listener in self.solver_scope.listeners() {
            listener.phase_started(self);
        }
    }

    pub fn fire_step_ended(&self, step_scope: &StepScope<'_, 'a, S, D>) {
        for listener in self.solver_scope.listeners() {
            listener.step_ended(step_scope);
        }
    }

    pub fn fire_phase_ended(&self) {
        for listener in self.solver_scope.listeners() {
            listener.phase_ended(self);
        }
    }

    /// Summarises this phase.
    pub fn to_statistics(&self) -> PhaseStatistics<S::Score> {
        let statistics = self.solver_scope.statistics();
        PhaseStatistics {
            phase_index: self.phase_index,
            phase_type: self.phase_kind.as_str(),
            duration: self.elapsed(),
            step_count: self.step_count,
            moves_evaluated: statistics.current_moves_evaluated() - self.moves_evaluated_at_start,
            moves_accepted: statistics.current_moves_accepted() - self.moves_accepted_at_start,
            starting_score: Some(self.starting_score.clone()),
            ending_score: self.solver_scope.best_score().cloned(),
            ended_early: self.ended_early,
        }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> fmt::Debug for PhaseScope<'_, S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseScope")
            .field("phase_index", &self.phase_index)
            .field("phase_kind", &self.phase_kind)
            .field("step_count", &self.step_count)
            .field("last_step_score", &self.last_step_score)
            .finish()
    }
}
