//! Phase lifecycle listeners and their registration handles.

use std::fmt::Debug;
use std::sync::Arc;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope, StepScope};

/// Receives lifecycle events on the solving thread.
///
/// Events of one phase arrive in order: `phase_started`, any number of
/// `step_ended`, then `phase_ended`. Scopes are read-only snapshots valid
/// for the duration of the callback. Implementations keep their own
/// state behind interior mutability and must not block.
pub trait PhaseLifecycleListener<S: PlanningSolution, D: ScoreDirector<S>>:
    Send + Sync + Debug
{
    fn solving_started(&self, _solver_scope: &SolverScope<S, D>) {}

    fn phase_started(&self, _phase_scope: &PhaseScope<'_, S, D>) {}

    fn step_ended(&self, _step_scope: &StepScope<'_, '_, S, D>) {}

    fn phase_ended(&self, _phase_scope: &PhaseScope<'_, S, D>) {}

    fn solving_ended(&self, _solver_scope: &SolverScope<S, D>) {}
}

/// Identifies one listener registration on a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Ordered listener registrations.
///
/// Listeners fire in registration order. Removing a handle twice is a
/// no-op that returns false.
pub struct ListenerRegistry<S: PlanningSolution, D: ScoreDirector<S>> {
    next_id: u64,
    entries: Vec<(ListenerHandle, Arc<dyn PhaseLifecycleListener<S, D>>)>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> ListenerRegistry<S, D> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: Arc<dyn PhaseLifecycleListener<S, D>>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push((handle, listener));
        handle
    }

    pub fn remove(&mut self, handle: ListenerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registered listeners in firing order.
    pub fn snapshot(&self) -> Vec<Arc<dyn PhaseLifecycleListener<S, D>>> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Default for ListenerRegistry<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Debug for ListenerRegistry<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(handle, listener)| (handle, listener)))
            .finish()
    }
}
