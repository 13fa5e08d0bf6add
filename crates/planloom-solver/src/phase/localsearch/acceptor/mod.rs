//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether an evaluated move may be handed to the forager,
//! comparing its score with the last step score and the best score.

mod entity_tabu;
mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use rand::rngs::StdRng;

pub use entity_tabu::EntityTabuAcceptor;
pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;

/// What an acceptor sees of one evaluated move.
#[derive(Debug, Clone, Copy)]
pub struct MoveScope<'m, Sc> {
    /// Entities the move changes.
    pub entity_indices: &'m [usize],
    /// Score of the working solution with the move applied.
    pub score: &'m Sc,
    pub last_step_score: &'m Sc,
    pub best_score: &'m Sc,
}

/// Trait for accepting or rejecting moves in local search.
///
/// Acceptors implement different strategies for escaping local optima,
/// such as late acceptance, simulated annealing or tabu search.
pub trait Acceptor<S: PlanningSolution>: Send + Debug {
    /// Returns true if the move may be picked by the forager.
    fn is_accepted(&mut self, move_scope: &MoveScope<'_, S::Score>, rng: &mut StdRng) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &S::Score) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called when a step starts.
    fn step_started(&mut self) {}

    /// Called when a step commits a move.
    fn step_ended(&mut self, _step_score: &S::Score, _entity_indices: &[usize]) {}
}

impl<S: PlanningSolution> Acceptor<S> for Box<dyn Acceptor<S>> {
    fn is_accepted(&mut self, move_scope: &MoveScope<'_, S::Score>, rng: &mut StdRng) -> bool {
        (**self).is_accepted(move_scope, rng)
    }

    fn phase_started(&mut self, initial_score: &S::Score) {
        (**self).phase_started(initial_score)
    }

    fn phase_ended(&mut self) {
        (**self).phase_ended()
    }

    fn step_started(&mut self) {
        (**self).step_started()
    }

    fn step_ended(&mut self, step_score: &S::Score, entity_indices: &[usize]) {
        (**self).step_ended(step_score, entity_indices)
    }
}
