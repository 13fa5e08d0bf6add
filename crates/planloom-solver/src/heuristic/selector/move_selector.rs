//! Move selectors generating the candidates of a local search step.

use std::fmt::Debug;
use std::marker::PhantomData;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;
use rand::rngs::StdRng;

use super::{EntitySelector, SelectionOrder, ValueSelector};
use crate::heuristic::r#move::{ChangeMove, EitherMove, Move, SwapMove};

/// Trait for generating the candidate moves of one step.
pub trait MoveSelector<S: PlanningSolution, M: Move<S>>: Send + Debug {
    /// Returns every candidate move for the current working solution.
    ///
    /// `rng` is the solver's random generator, used for random selection order.
    fn select_moves(&self, score_director: &dyn ScoreDirector<S>, rng: &mut StdRng) -> Vec<M>;
}

/// Generates one `ChangeMove` per (movable entity, candidate value) pair.
pub struct ChangeMoveSelector<S, V, ES, VS> {
    entity_selector: ES,
    value_selector: VS,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    descriptor_index: usize,
    variable_name: &'static str,
    selection_order: SelectionOrder,
    _phantom: PhantomData<fn() -> V>,
}

impl<S, V, ES, VS> ChangeMoveSelector<S, V, ES, VS> {
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
            selection_order: SelectionOrder::Original,
            _phantom: PhantomData,
        }
    }

    pub fn with_selection_order(mut self, selection_order: SelectionOrder) -> Self {
        self.selection_order = selection_order;
        self
    }
}

impl<S, V, ES: Clone, VS: Clone> Clone for ChangeMoveSelector<S, V, ES, VS> {
    fn clone(&self) -> Self {
        Self {
            entity_selector: self.entity_selector.clone(),
            value_selector: self.value_selector.clone(),
            getter: self.getter,
            setter: self.setter,
            descriptor_index: self.descriptor_index,
            variable_name: self.variable_name,
            selection_order: self.selection_order,
            _phantom: PhantomData,
        }
    }
}

impl<S, V, ES: Debug, VS: Debug> Debug for ChangeMoveSelector<S, V, ES, VS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMoveSelector")
            .field("entity_selector", &self.entity_selector)
            .field("value_selector", &self.value_selector)
            .field("variable_name", &self.variable_name)
            .field("selection_order", &self.selection_order)
            .finish()
    }
}

impl<S, V, ES, VS> MoveSelector<S, ChangeMove<S, V>> for ChangeMoveSelector<S, V, ES, VS>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
    ES: EntitySelector<S>,
    VS: ValueSelector<S, V>,
{
    fn select_moves(
        &self,
        score_director: &dyn ScoreDirector<S>,
        rng: &mut StdRng,
    ) -> Vec<ChangeMove<S, V>> {
        let mut moves = Vec::new();
        for entity_ref in self.entity_selector.select_entities(score_director) {
            for value in self
                .value_selector
                .select_values(score_director, entity_ref.entity_index)
            {
                moves.push(ChangeMove::new(
                    entity_ref.entity_index,
                    Some(value),
                    self.getter,
                    self.setter,
                    self.variable_name,
                    self.descriptor_index,
                ));
            }
        }
        self.selection_order.apply(&mut moves, rng);
        moves
    }
}

/// Generates one `SwapMove` per unordered pair of movable entities.
pub struct SwapMoveSelector<S, V, ES> {
    entity_selector: ES,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    descriptor_index: usize,
    variable_name: &'static str,
    selection_order: SelectionOrder,
}

impl<S, V, ES> SwapMoveSelector<S, V, ES> {
    pub fn new(
        entity_selector: ES,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        descriptor_index: usize,
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_selector,
            getter,
            setter,
            descriptor_index,
            variable_name,
            selection_order: SelectionOrder::Original,
        }
    }

    pub fn with_selection_order(mut self, selection_order: SelectionOrder) -> Self {
        self.selection_order = selection_order;
        self
    }
}

impl<S, V, ES: Clone> Clone for SwapMoveSelector<S, V, ES> {
    fn clone(&self) -> Self {
        Self {
            entity_selector: self.entity_selector.clone(),
            getter: self.getter,
            setter: self.setter,
            descriptor_index: self.descriptor_index,
            variable_name: self.variable_name,
            selection_order: self.selection_order,
        }
    }
}

impl<S, V, ES: Debug> Debug for SwapMoveSelector<S, V, ES> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapMoveSelector")
            .field("entity_selector", &self.entity_selector)
            .field("variable_name", &self.variable_name)
            .field("selection_order", &self.selection_order)
            .finish()
    }
}

impl<S, V, ES> MoveSelector<S, SwapMove<S, V>> for SwapMoveSelector<S, V, ES>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
    ES: EntitySelector<S>,
{
    fn select_moves(
        &self,
        score_director: &dyn ScoreDirector<S>,
        rng: &mut StdRng,
    ) -> Vec<SwapMove<S, V>> {
        let entities = self.entity_selector.select_entities(score_director);
        let mut moves = Vec::new();
        for (i, left) in entities.iter().enumerate() {
            for right in &entities[i + 1..] {
                moves.push(SwapMove::new(
                    left.entity_index,
                    right.entity_index,
                    self.getter,
                    self.setter,
                    self.variable_name,
                    self.descriptor_index,
                ));
            }
        }
        self.selection_order.apply(&mut moves, rng);
        moves
    }
}

/// Concatenates the moves of two selectors.
#[derive(Debug, Clone)]
pub struct UnionMoveSelector<A, B> {
    first: A,
    second: B,
}

impl<A, B> UnionMoveSelector<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<S, MA, MB, A, B> MoveSelector<S, EitherMove<MA, MB>> for UnionMoveSelector<A, B>
where
    S: PlanningSolution,
    MA: Move<S>,
    MB: Move<S>,
    A: MoveSelector<S, MA>,
    B: MoveSelector<S, MB>,
{
    fn select_moves(
        &self,
        score_director: &dyn ScoreDirector<S>,
        rng: &mut StdRng,
    ) -> Vec<EitherMove<MA, MB>> {
        let mut moves: Vec<EitherMove<MA, MB>> = self
            .first
            .select_moves(score_director, rng)
            .into_iter()
            .map(EitherMove::Left)
            .collect();
        moves.extend(
            self.second
                .select_moves(score_director, rng)
                .into_iter()
                .map(EitherMove::Right),
        );
        moves
    }
}
