//! Value selectors for planning variables.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

/// Trait for selecting candidate values for one entity's variable.
pub trait ValueSelector<S: PlanningSolution, V>: Send + Debug {
    /// Returns the candidate values for the entity at `entity_index`.
    fn select_values(&self, score_director: &dyn ScoreDirector<S>, entity_index: usize) -> Vec<V>;
}

/// A value selector over a fixed list of values.
#[derive(Debug, Clone)]
pub struct StaticValueSelector<V> {
    values: Vec<V>,
}

impl<V> StaticValueSelector<V> {
    pub fn new(values: Vec<V>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }
}

impl<S, V> ValueSelector<S, V> for StaticValueSelector<V>
where
    S: PlanningSolution,
    V: Clone + Send + Debug,
{
    fn select_values(&self, _score_director: &dyn ScoreDirector<S>, _entity_index: usize) -> Vec<V> {
        self.values.clone()
    }
}

/// A value selector that reads the value range from the working solution.
pub struct FromSolutionValueSelector<S, V> {
    value_range: fn(&S) -> Vec<V>,
}

impl<S, V> FromSolutionValueSelector<S, V> {
    pub fn new(value_range: fn(&S) -> Vec<V>) -> Self {
        Self { value_range }
    }
}

impl<S, V> Clone for FromSolutionValueSelector<S, V> {
    fn clone(&self) -> Self {
        Self {
            value_range: self.value_range,
        }
    }
}

impl<S, V> Debug for FromSolutionValueSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromSolutionValueSelector").finish()
    }
}

impl<S, V> ValueSelector<S, V> for FromSolutionValueSelector<S, V>
where
    S: PlanningSolution,
    V: Send,
{
    fn select_values(&self, score_director: &dyn ScoreDirector<S>, _entity_index: usize) -> Vec<V> {
        (self.value_range)(score_director.working_solution())
    }
}
