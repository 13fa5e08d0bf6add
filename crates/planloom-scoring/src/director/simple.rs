//! Simple score director with full recalculation.

use planloom_core::domain::PlanningSolution;
use planloom_core::score::Score;
use tracing::debug;

use super::traits::ScoreDirector;

/// A simple score director that recalculates the full score each time.
///
/// The calculator is stored as a concrete generic type parameter, not as `Arc<dyn Fn>`.
/// It cannot explain its score, so constraint matching is never enabled.
///
/// # Example
///
/// ```
/// use planloom_core::{PlanningSolution, SimpleScore};
/// use planloom_scoring::{ScoreDirector, SimpleScoreDirector};
///
/// #[derive(Clone)]
/// struct Solution { values: Vec<Option<i64>>, score: Option<SimpleScore> }
///
/// impl PlanningSolution for Solution {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
///     fn uninitialized_entity_count(&self) -> usize {
///         self.values.iter().filter(|v| v.is_none()).count()
///     }
/// }
///
/// let mut director = SimpleScoreDirector::new(
///     Solution { values: vec![Some(-3), None], score: None },
///     |s: &Solution| SimpleScore::of(s.values.iter().flatten().sum()),
/// );
/// assert_eq!(director.calculate_score(), SimpleScore::of_uninitialized(-1, -3));
/// ```
pub struct SimpleScoreDirector<S: PlanningSolution, C> {
    working_solution: S,
    score_calculator: C,
    score_dirty: bool,
    cached_score: Option<S::Score>,
}

impl<S, C> SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send,
{
    /// Creates a new SimpleScoreDirector.
    pub fn new(solution: S, score_calculator: C) -> Self {
        SimpleScoreDirector {
            working_solution: solution,
            score_calculator,
            score_dirty: true,
            cached_score: None,
        }
    }

    /// Consumes the director and returns its working solution.
    pub fn into_working_solution(self) -> S {
        self.working_solution
    }

    fn mark_dirty(&mut self) {
        self.score_dirty = true;
    }
}

impl<S, C> ScoreDirector<S> for SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.mark_dirty();
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if !self.score_dirty {
            if let Some(ref score) = self.cached_score {
                return score.clone();
            }
        }
        let score = (self.score_calculator)(&self.working_solution)
            .with_init_score(self.working_solution.init_score());
        self.working_solution.set_score(Some(score.clone()));
        self.cached_score = Some(score.clone());
        self.score_dirty = false;
        score
    }

    fn clone_working_solution(&self) -> S {
        self.working_solution.clone()
    }

    fn before_variable_changed(
        &mut self,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
        self.mark_dirty();
    }

    fn after_variable_changed(
        &mut self,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
        // Already marked dirty in before_variable_changed
    }

    fn set_constraint_match_enabled_preference(&mut self, preference: bool) {
        if preference {
            debug!(
                event = "constraint_match_unsupported",
                director = "SimpleScoreDirector"
            );
        }
    }

    fn reset(&mut self) {
        self.mark_dirty();
        self.cached_score = None;
    }
}
