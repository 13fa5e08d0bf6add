//! Termination conditions for solver and phases.
//!
//! Terminations are consulted between steps and between phases, never in
//! the middle of a step. Reaching one is a normal exit: the solve returns
//! the best solution found so far.

mod best_score;
mod composite;
mod external;
mod step_count;
mod time;
mod unimproved;


use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope};

pub use best_score::{BestScoreFeasibleTermination, BestScoreTermination};
pub use composite::{AndTermination, OrTermination};
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::{UnimprovedStepCountTermination, UnimprovedTimeTermination};

/// Trait for determining when to stop solving.
///
/// Solver-level checks measure the whole solve. Phase-level checks
/// measure the current phase and default to the solver-level answer.
pub trait Termination<S: PlanningSolution, D: ScoreDirector<S>>: Send + Sync + Debug {
    /// Returns true if the solve should stop.
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool;

    /// Returns true if the current phase should stop.
    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        self.is_solver_terminated(phase_scope.solver_scope())
    }
}

impl<S, D, T> Termination<S, D> for Box<T>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    T: Termination<S, D> + ?Sized,
{
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        (**self).is_solver_terminated(solver_scope)
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        (**self).is_phase_terminated(phase_scope)
    }
}
