//! Entity tabu acceptor.

use std::collections::VecDeque;
use std::fmt::Debug;

use planloom_config::ConfigError;
use planloom_core::domain::PlanningSolution;
use rand::rngs::StdRng;

use super::{Acceptor, MoveScope};
use crate::error::Result;

/// Forbids moves that touch an entity changed in one of the last
/// `entity_tabu_size` steps.
///
/// A tabu move is still accepted when its score beats the best score
/// (aspiration).
///
/// # Example
///
/// ```
/// use planloom_solver::phase::localsearch::EntityTabuAcceptor;
///
/// let acceptor = EntityTabuAcceptor::new(7);
/// assert!(!acceptor.is_entity_tabu(3));
/// ```
#[derive(Clone)]
pub struct EntityTabuAcceptor {
    entity_tabu_size: usize,
    tabu_entities: VecDeque<usize>,
}

impl EntityTabuAcceptor {
    /// # Panics
    ///
    /// Panics if `entity_tabu_size` is 0.
    pub fn new(entity_tabu_size: usize) -> Self {
        assert!(entity_tabu_size > 0, "entity_tabu_size must be > 0, got 0");
        Self {
            entity_tabu_size,
            tabu_entities: VecDeque::with_capacity(entity_tabu_size),
        }
    }

    /// Like [`EntityTabuAcceptor::new`], but rejects a zero size.
    pub fn try_new(entity_tabu_size: usize) -> Result<Self> {
        if entity_tabu_size == 0 {
            let message = "entity_tabu_size must be > 0".to_string();
            return Err(ConfigError::Invalid(message).into());
        }
        Ok(Self::new(entity_tabu_size))
    }

    pub fn is_entity_tabu(&self, entity_index: usize) -> bool {
        self.tabu_entities.contains(&entity_index)
    }
}

impl Debug for EntityTabuAcceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityTabuAcceptor")
            .field("entity_tabu_size", &self.entity_tabu_size)
            .field("tabu_list_len", &self.tabu_entities.len())
            .finish()
    }
}

impl Default for EntityTabuAcceptor {
    fn default() -> Self {
        Self::new(7)
    }
}

impl<S: PlanningSolution> Acceptor<S> for EntityTabuAcceptor {
    fn is_accepted(&mut self, move_scope: &MoveScope<'_, S::Score>, _rng: &mut StdRng) -> bool {
        let tabu = move_scope
            .entity_indices
            .iter()
            .any(|&index| self.is_entity_tabu(index));
        !tabu || move_scope.score > move_scope.best_score
    }

    fn phase_started(&mut self, _initial_score: &S::Score) {
        self.tabu_entities.clear();
    }

    fn phase_ended(&mut self) {
        self.tabu_entities.clear();
    }

    fn step_ended(&mut self, _step_score: &S::Score, entity_indices: &[usize]) {
        for &index in entity_indices {
            self.tabu_entities.retain(|&tabu| tabu != index);
            if self.tabu_entities.len() >= self.entity_tabu_size {
                self.tabu_entities.pop_front();
            }
            self.tabu_entities.push_back(index);
        }
    }
}
