//! Entity placers for construction heuristic
//!
//! Placers decide which entities the construction heuristic visits and
//! generate candidate moves for each of them.

use std::fmt::Debug;
use std::marker::PhantomData;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use crate::heuristic::r#move::{ChangeMove, Move};
use crate::heuristic::selector::{EntityReference, EntitySelector, ValueSelector};

/// The candidate moves for one entity.
pub struct Placement<S, M> {
    pub entity_ref: EntityReference,
    pub moves: Vec<M>,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, M> Placement<S, M> {
    pub fn new(entity_ref: EntityReference, moves: Vec<M>) -> Self {
        Self {
            entity_ref,
            moves,
            _phantom: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl<S, M> Debug for Placement<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Placement")
            .field("entity_ref", &self.entity_ref)
            .field("move_count", &self.moves.len())
            .finish()
    }
}

/// Trait for placing entities during construction.
pub trait EntityPlacer<S: PlanningSolution, M: Move<S>>: Send + Debug {
    /// Returns the entities to visit, decided once when the phase starts.
    fn select_entities(&self, score_director: &dyn ScoreDirector<S>) -> Vec<EntityReference>;

    /// Readies an entity for placement right before its step.
    fn prepare_entity(&self, _score_director: &mut dyn ScoreDirector<S>, _entity_ref: EntityReference) {}

    /// Builds the candidate moves for an entity.
    fn build_placement(
        &self,
        score_director: &dyn ScoreDirector<S>,
        entity_ref: EntityReference,
    ) -> Placement<S, M>;
}

/// Places the entities of one variable in selection order.
///
/// Pinned entities are excluded by the entity selector. An entity is visited when it is not pinned and either has no value or
/// carries a value while requesting reinitialization. A reinitialized
/// entity is unassigned before it is placed again. An entity requesting
/// reinitialization that has no value is left alone.
pub struct QueuedEntityPlacer<S, V, ES, VS> {
    entity_selector: ES,
    value_selector: VS,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    descriptor_index: usize,
    variable_name: &'static str,
    reinitialize_filter: Option<fn(&S, usize) -> bool>,
}

impl<S, V, ES, VS> QueuedEntityPlacer<S, V, ES, VS> {
    pub fn new(
        entity_selector: ES,
        value_selector: VS,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        descriptor_index: usize,
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_selector,
            value_selector,
            getter,
            setter,
            descriptor_index,
            variable_name,
            reinitialize_filter: None,
        }
    }

    /// Sets the domain signal that asks for an entity to be placed again.
    pub fn with_reinitialize_filter(mut self, filter: fn(&S, usize) -> bool) -> Self {
        self.reinitialize_filter = Some(filter);
        self
    }

    fn is_reinitialize_requested(&self, solution: &S, entity_index: usize) -> bool {
        self.reinitialize_filter
            .is_some_and(|requested| requested(solution, entity_index))
    }
}

impl<S, V, ES: Clone, VS: Clone> Clone for QueuedEntityPlacer<S, V, ES, VS> {
    fn clone(&self) -> Self {
        Self {
            entity_selector: self.entity_selector.clone(),
            value_selector: self.value_selector.clone(),
            getter: self.getter,
            setter: self.setter,
            descriptor_index: self.descriptor_index,
            variable_name: self.variable_name,
            reinitialize_filter: self.reinitialize_filter,
        }
    }
}

impl<S, V, ES: Debug, VS: Debug> Debug for QueuedEntityPlacer<S, V, ES, VS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedEntityPlacer")
            .field("entity_selector", &self.entity_selector)
            .field("value_selector", &self.value_selector)
            .field("variable_name", &self.variable_name)
            .field("reinitialize", &self.reinitialize_filter.is_some())
            .finish()
    }
}

impl<S, V, ES, VS> EntityPlacer<S, ChangeMove<S, V>> for QueuedEntityPlacer<S, V, ES, VS>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    fn select_entities(&self, score_director: &dyn ScoreDirector<S>) -> Vec<EntityReference> {
        let solution = score_director.working_solution();
        self.entity_selector
            .select_entities(score_director)
            .into_iter()
            .filter(|entity_ref| {
                let idx = entity_ref.entity_index;
                let assigned = (self.getter)(solution, idx).is_some();
                assigned == self.is_reinitialize_requested(solution, idx)
            })
            .collect()
    }

    fn prepare_entity(&self, score_director: &mut dyn ScoreDirector<S>, entity_ref: EntityReference) {
        let idx = entity_ref.entity_index;
        if (self.getter)(score_director.working_solution(), idx).is_none() {
            return;
        }
        score_director.before_variable_changed(self.descriptor_index, idx, self.variable_name);
        (self.setter)(score_director.working_solution_mut(), idx, None);
        score_director.after_variable_changed(self.descriptor_index, idx, self.variable_name);
    }

    fn build_placement(
        &self,
        score_director: &dyn ScoreDirector<S>,
        entity_ref: EntityReference,
    ) -> Placement<S, ChangeMove<S, V>> {
        let moves = self
            .value_selector
            .select_values(score_director, entity_ref.entity_index)
            .into_iter()
            .map(|value| {
                ChangeMove::new(
                    entity_ref.entity_index,
                    Some(value),
                    self.getter,
                    self.setter,
                    self.variable_name,
                    self.descriptor_index,
                )
            })
            .collect();
        Placement::new(entity_ref, moves)
    }
}
