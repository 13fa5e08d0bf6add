//! Hill climbing acceptor.

use planloom_core::domain::PlanningSolution;
use rand::rngs::StdRng;

use super::{Acceptor, MoveScope};

/// Accepts moves that are not worse than the last step.
///
/// Sideways moves are accepted so the search can cross plateaus.
///
/// # Example
///
/// ```
/// use planloom_solver::phase::localsearch::HillClimbingAcceptor;
///
/// let acceptor = HillClimbingAcceptor::new();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution> Acceptor<S> for HillClimbingAcceptor {
    fn is_accepted(&mut self, move_scope: &MoveScope<'_, S::Score>, _rng: &mut StdRng) -> bool {
        move_scope.score >= move_scope.last_step_score
    }
}
