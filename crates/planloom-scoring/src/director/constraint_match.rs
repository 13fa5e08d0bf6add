//! Score director that explains its score through constraint matches.

use planloom_core::domain::PlanningSolution;
use planloom_core::score::{Score, ScoreDefinition};
use planloom_core::{ConstraintMatchTotal, ScoreHolder};

use super::traits::ScoreDirector;

/// A full-recalculation score director whose calculator reports every
/// score impact to a [`ScoreHolder`].
///
/// The holder is rebuilt from scratch on each calculation, so the
/// constraint match totals always describe the current working solution.
/// Constraint matching is off until it is requested through
/// [`ScoreDirector::set_constraint_match_enabled_preference`].
///
/// # Example
///
/// ```
/// use planloom_core::{ConstraintJustification, ConstraintRef, HardSoftScore, HardSoftScoreDefinition, PlanningSolution};
/// use planloom_scoring::{ConstraintMatchScoreDirector, ScoreDirector};
///
/// #[derive(Clone)]
/// struct Plan { loads: Vec<i64>, score: Option<HardSoftScore> }
///
/// impl PlanningSolution for Plan {
///     type Score = HardSoftScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// let overload = ConstraintRef::new("plan", "overload");
/// let mut director = ConstraintMatchScoreDirector::new(
///     Plan { loads: vec![3, 12, 15], score: None },
///     HardSoftScoreDefinition,
///     move |plan: &Plan, holder: &mut planloom_core::ScoreHolder<HardSoftScore>| {
///         for load in plan.loads.iter().filter(|l| **l > 10) {
///             holder.penalize(&overload, HardSoftScore::of_hard(load - 10), ConstraintJustification::default);
///         }
///     },
/// );
/// director.set_constraint_match_enabled_preference(true);
///
/// assert_eq!(director.calculate_score(), HardSoftScore::of(-7, 0));
/// assert_eq!(director.constraint_match_totals()[0].constraint_match_count(), 2);
/// ```
pub struct ConstraintMatchScoreDirector<S, D, C>
where
    S: PlanningSolution,
    D: ScoreDefinition<Score = S::Score>,
{
    working_solution: S,
    score_definition: D,
    score_calculator: C,
    constraint_match_enabled: bool,
    holder: Option<ScoreHolder<S::Score>>,
}

impl<S, D, C> ConstraintMatchScoreDirector<S, D, C>
where
    S: PlanningSolution,
    D: ScoreDefinition<Score = S::Score>,
    C: Fn(&S, &mut ScoreHolder<S::Score>) + Send,
{
    pub fn new(solution: S, score_definition: D, score_calculator: C) -> Self {
        Self {
            working_solution: solution,
            score_definition,
            score_calculator,
            constraint_match_enabled: false,
            holder: None,
        }
    }

    /// Returns the score definition used to build holders.
    pub fn score_definition(&self) -> &D {
        &self.score_definition
    }

    /// Consumes the director and returns its working solution.
    pub fn into_working_solution(self) -> S {
        self.working_solution
    }
}

impl<S, D, C> ScoreDirector<S> for ConstraintMatchScoreDirector<S, D, C>
where
    S: PlanningSolution,
    D: ScoreDefinition<Score = S::Score>,
    C: Fn(&S, &mut ScoreHolder<S::Score>) + Send,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.holder = None;
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if let Some(holder) = &self.holder {
            return holder.extract_score(self.working_solution.init_score());
        }
        let mut holder = self
            .score_definition
            .build_score_holder(self.constraint_match_enabled);
        (self.score_calculator)(&self.working_solution, &mut holder);
        let score = holder.extract_score(self.working_solution.init_score());
        self.working_solution.set_score(Some(score.clone()));
        self.holder = Some(holder);
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
        self.holder = None;
    }

    fn after_variable_changed(
        &mut self,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
    }

    fn is_constraint_match_enabled(&self) -> bool {
        self.constraint_match_enabled
    }

    fn set_constraint_match_enabled_preference(&mut self, preference: bool) {
        if self.constraint_match_enabled != preference {
            self.constraint_match_enabled = preference;
            self.holder = None;
        }
    }

    fn constraint_match_totals(&self) -> &[ConstraintMatchTotal<S::Score>] {
        match &self.holder {
            Some(holder) => holder.constraint_match_totals(),
            None => &[],
        }
    }

    fn reset(&mut self) {
        self.holder = None;
    }
}

impl<S, D, C> std::fmt::Debug for ConstraintMatchScoreDirector<S, D, C>
where
    S: PlanningSolution,
    D: ScoreDefinition<Score = S::Score>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintMatchScoreDirector")
            .field("score_definition", &self.score_definition)
            .field("constraint_match_enabled", &self.constraint_match_enabled)
            .field(
                "score",
                &self.holder.as_ref().map(|h| h.extract_score(0).to_string()),
            )
            .finish()
    }
}
