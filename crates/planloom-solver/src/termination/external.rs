//! Termination requested from outside the solving thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates once the shared flag is set.
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn flag(&self) -> &Arc<AtomicBool> {
        &self.flag
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for ExternalTermination {
    fn is_solver_terminated(&self, _solver_scope: &SolverScope<S, D>) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
