//! Solver phases.
//!
//! A solve runs its phases in order. The construction heuristic assigns
//! values to uninitialized entities, local search then improves the
//! initialized solution step by step.

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use crate::error::Result;
use crate::scope::SolverScope;

/// A phase of the solving process.
pub trait Phase<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    /// Runs the phase against the solver scope.
    ///
    /// Returns an error only for conditions that must abort the whole
    /// solve, such as score corruption.
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

impl<S, D> Phase<S, D> for Box<dyn Phase<S, D>>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        (**self).solve(solver_scope)
    }

    fn phase_type_name(&self) -> &'static str {
        (**self).phase_type_name()
    }
}

/// Steps per second.
pub(crate) fn speed(steps: u64, elapsed: std::time::Duration) -> u64 {
    crate::statistics::per_second(steps, elapsed)
}
