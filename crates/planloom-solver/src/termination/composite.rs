//! Composite terminations.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

type BoxedTermination<S, D> = Box<dyn Termination<S, D>>;

/// Terminates when any child terminates. Never terminates when empty.
pub struct OrTermination<S: PlanningSolution, D: ScoreDirector<S>> {
    terminations: Vec<BoxedTermination<S, D>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> OrTermination<S, D> {
    pub fn new(terminations: Vec<BoxedTermination<S, D>>) -> Self {
        Self { terminations }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Debug for OrTermination<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OrTermination").field(&self.terminations).finish()
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for OrTermination<S, D> {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        self.terminations
            .iter()
            .any(|t| t.is_solver_terminated(solver_scope))
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        self.terminations
            .iter()
            .any(|t| t.is_phase_terminated(phase_scope))
    }
}

/// Terminates when every child terminates. Never terminates when empty.
pub struct AndTermination<S: PlanningSolution, D: ScoreDirector<S>> {
    terminations: Vec<BoxedTermination<S, D>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> AndTermination<S, D> {
    pub fn new(terminations: Vec<BoxedTermination<S, D>>) -> Self {
        Self { terminations }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Debug for AndTermination<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AndTermination").field(&self.terminations).finish()
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for AndTermination<S, D> {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        !self.terminations.is_empty()
            && self
                .terminations
                .iter()
                .all(|t| t.is_solver_terminated(solver_scope))
    }

    fn is_phase_terminated(&self, phase_scope: &PhaseScope<'_, S, D>) -> bool {
        !self.terminations.is_empty()
            && self
                .terminations
                .iter()
                .all(|t| t.is_phase_terminated(phase_scope))
    }
}
