//! Terminations on a stalled best score.

use std::time::Duration;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Terminates after a number of steps without a best score improvement.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedStepCountTermination {
    step_count_limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(step_count_limit: u64) -> Self {
        Self { step_count_limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D>
    for UnimprovedStepCountTermination
{
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.unimproved_step_count() >= self.step_count_limit
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        phase_scope.unimproved_step_count() >= self.step_count_limit
    }
}

/// Terminates after a period without a best score improvement.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for UnimprovedTimeTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.unimproved_time() >= self.limit
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        phase_scope.unimproved_time() >= self.limit
    }
}
