//! ChangeMove - assigns a value to a planning variable.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::Move;

/// A move that assigns a value to an entity's variable.
///
/// Stores typed function pointers to read and write the variable, so no
/// value is ever boxed or downcast.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `V` - The variable value type
#[derive(Clone, Copy)]
pub struct ChangeMove<S, V> {
    entity_index: usize,
    to_value: Option<V>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
    descriptor_index: usize,
}

impl<S, V: Debug> Debug for ChangeMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMove")
            .field("entity_index", &self.entity_index)
            .field("variable_name", &self.variable_name)
            .field("to_value", &self.to_value)
            .finish()
    }
}

impl<S, V> ChangeMove<S, V> {
    /// Creates a new change move.
    ///
    /// `to_value` of `None` unassigns the variable.
    pub fn new(
        entity_index: usize,
        to_value: Option<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
        descriptor_index: usize,
    ) -> Self {
        Self {
            entity_index,
            to_value,
            getter,
            setter,
            variable_name,
            descriptor_index,
        }
    }

    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    pub fn to_value(&self) -> Option<&V> {
        self.to_value.as_ref()
    }
}

impl<S, V> Move<S> for ChangeMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let current = (self.getter)(score_director.working_solution(), self.entity_index);
        current != self.to_value
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let old_value = (self.getter)(score_director.working_solution(), self.entity_index);

        score_director.before_variable_changed(
            self.descriptor_index,
            self.entity_index,
            self.variable_name,
        );
        (self.setter)(
            score_director.working_solution_mut(),
            self.entity_index,
            self.to_value.clone(),
        );
        score_director.after_variable_changed(
            self.descriptor_index,
            self.entity_index,
            self.variable_name,
        );

        let setter = self.setter;
        let idx = self.entity_index;
        score_director.register_undo(Box::new(move |s: &mut S| {
            setter(s, idx, old_value);
        }));
    }

    fn descriptor_index(&self) -> usize {
        self.descriptor_index
    }

    fn entity_indices(&self) -> &[usize] {
        std::slice::from_ref(&self.entity_index)
    }

    fn variable_name(&self) -> &str {
        self.variable_name
    }

    fn describe(&self) -> String {
        match &self.to_value {
            Some(value) => format!(
                "{}[{}] -> {:?}",
                self.variable_name, self.entity_index, value
            ),
            None => format!("{}[{}] -> null", self.variable_name, self.entity_index),
        }
    }
}
