//! Best score terminations.

use planloom_core::domain::PlanningSolution;
use planloom_core::score::Score;
use planloom_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when the best score reaches or exceeds a limit.
///
/// The best solution must also be initialized.
#[derive(Debug, Clone)]
pub struct BestScoreTermination<Sc: Score> {
    best_score_limit: Sc,
}

impl<Sc: Score> BestScoreTermination<Sc> {
    pub fn new(best_score_limit: Sc) -> Self {
        Self { best_score_limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for BestScoreTermination<S::Score> {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.best_score().is_some_and(|best| {
            best.is_solution_initialized() && *best >= self.best_score_limit
        })
    }
}

/// Terminates once the best score is feasible.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestScoreFeasibleTermination;

impl BestScoreFeasibleTermination {
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for BestScoreFeasibleTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.best_score().is_some_and(|best| best.is_feasible())
    }
}
