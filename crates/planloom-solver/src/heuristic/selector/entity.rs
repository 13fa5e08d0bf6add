//! Entity selectors for iterating over planning entities

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

/// A reference to an entity within a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityReference {
    /// Index of the entity descriptor.
    pub descriptor_index: usize,
    /// Index of the entity within its collection.
    pub entity_index: usize,
}

impl EntityReference {
    /// Creates a new entity reference.
    pub fn new(descriptor_index: usize, entity_index: usize) -> Self {
        Self {
            descriptor_index,
            entity_index,
        }
    }
}

/// Trait for selecting entities from a planning solution.
pub trait EntitySelector<S: PlanningSolution>: Send + Debug {
    /// Returns the selected entities in selection order.
    fn select_entities(&self, score_director: &dyn ScoreDirector<S>) -> Vec<EntityReference>;

    /// Returns true if the entity must not be changed.
    fn is_pinned(&self, _score_director: &dyn ScoreDirector<S>, _entity_index: usize) -> bool {
        false
    }
}

/// An entity selector over one entity collection of the solution.
///
/// Pinned entities are skipped when a pinning function is configured.
pub struct FromSolutionEntitySelector<S> {
    descriptor_index: usize,
    entity_count: fn(&S) -> usize,
    pinning: Option<fn(&S, usize) -> bool>,
}

impl<S> FromSolutionEntitySelector<S> {
    pub fn new(descriptor_index: usize, entity_count: fn(&S) -> usize) -> Self {
        Self {
            descriptor_index,
            entity_count,
            pinning: None,
        }
    }

    /// Skips entities for which `pinning` returns true.
    pub fn with_pinning(mut self, pinning: fn(&S, usize) -> bool) -> Self {
        self.pinning = Some(pinning);
        self
    }
}

impl<S> Clone for FromSolutionEntitySelector<S> {
    fn clone(&self) -> Self {
        Self {
            descriptor_index: self.descriptor_index,
            entity_count: self.entity_count,
            pinning: self.pinning,
        }
    }
}

impl<S> Debug for FromSolutionEntitySelector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromSolutionEntitySelector")
            .field("descriptor_index", &self.descriptor_index)
            .field("skip_pinned", &self.pinning.is_some())
            .finish()
    }
}

impl<S: PlanningSolution> EntitySelector<S> for FromSolutionEntitySelector<S> {
    fn select_entities(&self, score_director: &dyn ScoreDirector<S>) -> Vec<EntityReference> {
        let solution = score_director.working_solution();
        let count = (self.entity_count)(solution);
        (0..count)
            .filter(|&idx| !self.pinning.is_some_and(|pinned| pinned(solution, idx)))
            .map(|idx| EntityReference::new(self.descriptor_index, idx))
            .collect()
    }

    fn is_pinned(&self, score_director: &dyn ScoreDirector<S>, entity_index: usize) -> bool {
        self.pinning
            .is_some_and(|pinned| pinned(score_director.working_solution(), entity_index))
    }
}
