//! SwapMove - exchanges values between two entities.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::Move;

/// A move that swaps the values of one variable between two entities.
///
/// # Example
/// ```
/// use planloom_solver::heuristic::r#move::{Move, SwapMove};
/// use planloom_scoring::{ScoreDirector, SimpleScoreDirector};
/// use planloom_core::{PlanningSolution, SimpleScore};
///
/// #[derive(Clone)]
/// struct Sol { values: Vec<Option<i32>>, score: Option<SimpleScore> }
///
/// impl PlanningSolution for Sol {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// fn get_v(s: &Sol, idx: usize) -> Option<i32> { s.values.get(idx).copied().flatten() }
/// fn set_v(s: &mut Sol, idx: usize, v: Option<i32>) { if let Some(x) = s.values.get_mut(idx) { *x = v; } }
///
/// let mut director = SimpleScoreDirector::new(
///     Sol { values: vec![Some(1), Some(2)], score: None },
///     |_: &Sol| SimpleScore::ZERO,
/// );
/// let swap = SwapMove::new(0, 1, get_v, set_v, "value", 0);
/// assert!(swap.is_doable(&director));
/// swap.do_move(&mut director);
/// assert_eq!(director.working_solution().values, vec![Some(2), Some(1)]);
/// ```
pub struct SwapMove<S, V> {
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
    descriptor_index: usize,
    // [left, right]
    indices: [usize; 2],
}

impl<S, V> Clone for SwapMove<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for SwapMove<S, V> {}

impl<S, V> Debug for SwapMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapMove")
            .field("left_entity_index", &self.indices[0])
            .field("right_entity_index", &self.indices[1])
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V> SwapMove<S, V> {
    pub fn new(
        left_entity_index: usize,
        right_entity_index: usize,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
        descriptor_index: usize,
    ) -> Self {
        Self {
            getter,
            setter,
            variable_name,
            descriptor_index,
            indices: [left_entity_index, right_entity_index],
        }
    }

    pub fn left_entity_index(&self) -> usize {
        self.indices[0]
    }

    pub fn right_entity_index(&self) -> usize {
        self.indices[1]
    }
}

impl<S, V> Move<S> for SwapMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let [left, right] = self.indices;
        if left == right {
            return false;
        }
        let solution = score_director.working_solution();
        (self.getter)(solution, left) != (self.getter)(solution, right)
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let [left, right] = self.indices;
        let left_value = (self.getter)(score_director.working_solution(), left);
        let right_value = (self.getter)(score_director.working_solution(), right);

        score_director.before_variable_changed(self.descriptor_index, left, self.variable_name);
        score_director.before_variable_changed(self.descriptor_index, right, self.variable_name);
        (self.setter)(score_director.working_solution_mut(), left, right_value.clone());
        (self.setter)(score_director.working_solution_mut(), right, left_value.clone());
        score_director.after_variable_changed(self.descriptor_index, left, self.variable_name);
        score_director.after_variable_changed(self.descriptor_index, right, self.variable_name);

        let setter = self.setter;
        score_director.register_undo(Box::new(move |s: &mut S| {
            setter(s, left, left_value);
            setter(s, right, right_value);
        }));
    }

    fn descriptor_index(&self) -> usize {
        self.descriptor_index
    }

    fn entity_indices(&self) -> &[usize] {
        &self.indices
    }

    fn variable_name(&self) -> &str {
        self.variable_name
    }

    fn describe(&self) -> String {
        format!(
            "{var}[{}] <-> {var}[{}]",
            self.indices[0],
            self.indices[1],
            var = self.variable_name
        )
    }
}
