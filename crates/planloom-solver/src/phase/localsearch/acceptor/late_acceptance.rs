//! Late acceptance acceptor.

use std::fmt::Debug;

use planloom_config::ConfigError;
use planloom_core::domain::PlanningSolution;
use rand::rngs::StdRng;

use super::{Acceptor, MoveScope};
use crate::error::Result;

/// Accepts moves that are not worse than the step score from
/// `late_acceptance_size` steps ago, or not worse than the last step.
///
/// The history is filled with the phase's initial score.
pub struct LateAcceptanceAcceptor<S: PlanningSolution> {
    late_acceptance_size: usize,
    score_history: Vec<S::Score>,
    current_index: usize,
}

impl<S: PlanningSolution> LateAcceptanceAcceptor<S> {
    /// # Panics
    ///
    /// Panics if `late_acceptance_size` is 0.
    pub fn new(late_acceptance_size: usize) -> Self {
        assert!(late_acceptance_size > 0, "late_acceptance_size must be > 0");
        Self {
            late_acceptance_size,
            score_history: Vec::with_capacity(late_acceptance_size),
            current_index: 0,
        }
    }

    /// Like [`LateAcceptanceAcceptor::new`], but rejects a zero size.
    pub fn try_new(late_acceptance_size: usize) -> Result<Self> {
        if late_acceptance_size == 0 {
            let message = "late_acceptance_size must be > 0".to_string();
            return Err(ConfigError::Invalid(message).into());
        }
        Ok(Self::new(late_acceptance_size))
    }

    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
    }
}

impl<S: PlanningSolution> Clone for LateAcceptanceAcceptor<S> {
    fn clone(&self) -> Self {
        Self {
            late_acceptance_size: self.late_acceptance_size,
            score_history: self.score_history.clone(),
            current_index: self.current_index,
        }
    }
}

impl<S: PlanningSolution> Debug for LateAcceptanceAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LateAcceptanceAcceptor")
            .field("late_acceptance_size", &self.late_acceptance_size)
            .field("current_index", &self.current_index)
            .finish()
    }
}

impl<S: PlanningSolution> Default for LateAcceptanceAcceptor<S> {
    fn default() -> Self {
        Self::new(400)
    }
}

impl<S: PlanningSolution> Acceptor<S> for LateAcceptanceAcceptor<S> {
    fn is_accepted(&mut self, move_scope: &MoveScope<'_, S::Score>, _rng: &mut StdRng) -> bool {
        if move_scope.score >= move_scope.last_step_score {
            return true;
        }
        self.score_history
            .get(self.current_index)
            .is_some_and(|late| move_scope.score >= late)
    }

    fn phase_started(&mut self, initial_score: &S::Score) {
        self.score_history = vec![initial_score.clone(); self.late_acceptance_size];
        self.current_index = 0;
    }

    fn phase_ended(&mut self) {
        self.score_history.clear();
    }

    fn step_ended(&mut self, step_score: &S::Score, _entity_indices: &[usize]) {
        if let Some(slot) = self.score_history.get_mut(self.current_index) {
            *slot = step_score.clone();
        }
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
