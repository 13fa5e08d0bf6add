//! Step count termination.

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Terminates after a number of steps.
///
/// Counts all steps of the solve at solver level and the steps of the
/// current phase at phase level.
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    step_count_limit: u64,
}

impl StepCountTermination {
    pub fn new(step_count_limit: u64) -> Self {
        Self { step_count_limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for StepCountTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.total_step_count() >= self.step_count_limit
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        phase_scope.step_count() >= self.step_count_limit
    }
}
