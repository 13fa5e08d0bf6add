//! Foragers for the construction heuristic
//!
//! A forager receives the scores of one entity's candidate moves in order
//! and picks the move to commit.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_core::score::{InitializingScoreTrend, Score, ScoreDefinition};

/// Trait for picking the value assigned in one construction step.
pub trait ConstructionForager<S: PlanningSolution>: Send + Debug {
    /// Resets the forager for a new entity.
    fn step_started(&mut self, last_step_score: &S::Score);

    /// Offers the score of the candidate at `move_index`.
    fn add_move_score(&mut self, move_index: usize, score: S::Score);

    /// Returns true if no further candidates need evaluating.
    fn is_quit_early(&self) -> bool {
        false
    }

    /// Returns the picked candidate, `None` if nothing was offered.
    fn pick_move_index(&mut self) -> Option<(usize, S::Score)>;
}

impl<S: PlanningSolution> ConstructionForager<S> for Box<dyn ConstructionForager<S>> {
    fn step_started(&mut self, last_step_score: &S::Score) {
        (**self).step_started(last_step_score)
    }

    fn add_move_score(&mut self, move_index: usize, score: S::Score) {
        (**self).add_move_score(move_index, score)
    }

    fn is_quit_early(&self) -> bool {
        (**self).is_quit_early()
    }

    fn pick_move_index(&mut self) -> Option<(usize, S::Score)> {
        (**self).pick_move_index()
    }
}

/// Keeps the first strictly best candidate.
fn keep_best<Sc: Score>(best: &mut Option<(usize, Sc)>, move_index: usize, score: Sc) {
    let better = match best {
        None => true,
        Some((_, best_score)) => score > *best_score,
    };
    if better {
        *best = Some((move_index, score));
    }
}

/// Picks the first candidate.
#[derive(Clone)]
pub struct FirstFitForager<S: PlanningSolution> {
    picked: Option<(usize, S::Score)>,
}

impl<S: PlanningSolution> FirstFitForager<S> {
    pub fn new() -> Self {
        Self { picked: None }
    }
}

impl<S: PlanningSolution> Default for FirstFitForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for FirstFitForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstFitForager").finish()
    }
}

impl<S: PlanningSolution> ConstructionForager<S> for FirstFitForager<S> {
    fn step_started(&mut self, _last_step_score: &S::Score) {
        self.picked = None;
    }

    fn add_move_score(&mut self, move_index: usize, score: S::Score) {
        if self.picked.is_none() {
            self.picked = Some((move_index, score));
        }
    }

    fn is_quit_early(&self) -> bool {
        self.picked.is_some()
    }

    fn pick_move_index(&mut self) -> Option<(usize, S::Score)> {
        self.picked.take()
    }
}

/// Picks the candidate with the best score, the first one on ties.
#[derive(Clone)]
pub struct BestFitForager<S: PlanningSolution> {
    best: Option<(usize, S::Score)>,
}

impl<S: PlanningSolution> BestFitForager<S> {
    pub fn new() -> Self {
        Self { best: None }
    }
}

impl<S: PlanningSolution> Default for BestFitForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for BestFitForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestFitForager").finish()
    }
}

impl<S: PlanningSolution> ConstructionForager<S> for BestFitForager<S> {
    fn step_started(&mut self, _last_step_score: &S::Score) {
        self.best = None;
    }

    fn add_move_score(&mut self, move_index: usize, score: S::Score) {
        keep_best(&mut self.best, move_index, score);
    }

    fn pick_move_index(&mut self) -> Option<(usize, S::Score)> {
        self.best.take()
    }
}

/// Picks the first candidate whose levels are feasible, else the best.
///
/// Feasibility ignores the init score, which stays negative while other
/// entities are unassigned.
#[derive(Clone)]
pub struct FirstFeasibleForager<S: PlanningSolution> {
    best: Option<(usize, S::Score)>,
    feasible: Option<(usize, S::Score)>,
}

impl<S: PlanningSolution> FirstFeasibleForager<S> {
    pub fn new() -> Self {
        Self {
            best: None,
            feasible: None,
        }
    }
}

impl<S: PlanningSolution> Default for FirstFeasibleForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for FirstFeasibleForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstFeasibleForager").finish()
    }
}

impl<S: PlanningSolution> ConstructionForager<S> for FirstFeasibleForager<S> {
    fn step_started(&mut self, _last_step_score: &S::Score) {
        self.best = None;
        self.feasible = None;
    }

    fn add_move_score(&mut self, move_index: usize, score: S::Score) {
        if self.feasible.is_none() && score.with_init_score(0).is_feasible() {
            self.feasible = Some((move_index, score.clone()));
        }
        keep_best(&mut self.best, move_index, score);
    }

    fn is_quit_early(&self) -> bool {
        self.feasible.is_some()
    }

    fn pick_move_index(&mut self) -> Option<(usize, S::Score)> {
        let best = self.best.take();
        self.feasible.take().or(best)
    }
}

/// Picks the first candidate that does not lower the score of the
/// previous step, else the best.
///
/// The comparison ignores the init score.
#[derive(Clone)]
pub struct FirstNonDeterioratingScoreForager<S: PlanningSolution> {
    last_step_score: Option<S::Score>,
    best: Option<(usize, S::Score)>,
    non_deteriorating: Option<(usize, S::Score)>,
}

impl<S: PlanningSolution> FirstNonDeterioratingScoreForager<S> {
    pub fn new() -> Self {
        Self {
            last_step_score: None,
            best: None,
            non_deteriorating: None,
        }
    }
}

impl<S: PlanningSolution> Default for FirstNonDeterioratingScoreForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for FirstNonDeterioratingScoreForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstNonDeterioratingScoreForager").finish()
    }
}

impl<S: PlanningSolution> ConstructionForager<S> for FirstNonDeterioratingScoreForager<S> {
    fn step_started(&mut self, last_step_score: &S::Score) {
        self.last_step_score = Some(last_step_score.with_init_score(0));
        self.best = None;
        self.non_deteriorating = None;
    }

    fn add_move_score(&mut self, move_index: usize, score: S::Score) {
        let not_worse = self
            .last_step_score
            .as_ref()
            .is_some_and(|last| score.with_init_score(0) >= *last);
        if self.non_deteriorating.is_none() && not_worse {
            self.non_deteriorating = Some((move_index, score.clone()));
        }
        keep_best(&mut self.best, move_index, score);
    }

    fn is_quit_early(&self) -> bool {
        self.non_deteriorating.is_some()
    }

    fn pick_move_index(&mut self) -> Option<(usize, S::Score)> {
        let best = self.best.take();
        self.non_deteriorating.take().or(best)
    }
}

/// Quits a step once a candidate reaches the optimistic bound of the
/// previous step score, then lets `inner` pick.
///
/// The bound comes from the configured initializing score trend: levels
/// that only go down while initializing keep their value, others are
/// unbounded.
pub struct OptimisticBoundForager<S: PlanningSolution, Def> {
    inner: Box<dyn ConstructionForager<S>>,
    definition: Def,
    trend: InitializingScoreTrend,
    bound: Option<S::Score>,
    bound_reached: bool,
}

impl<S, Def> OptimisticBoundForager<S, Def>
where
    S: PlanningSolution,
    Def: ScoreDefinition<Score = S::Score>,
{
    pub fn new(
        inner: Box<dyn ConstructionForager<S>>,
        definition: Def,
        trend: InitializingScoreTrend,
    ) -> Self {
        Self {
            inner,
            definition,
            trend,
            bound: None,
            bound_reached: false,
        }
    }
}

impl<S: PlanningSolution, Def> Debug for OptimisticBoundForager<S, Def> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimisticBoundForager")
            .field("inner", &self.inner)
            .field("trend", &self.trend)
            .finish()
    }
}

impl<S, Def> ConstructionForager<S> for OptimisticBoundForager<S, Def>
where
    S: PlanningSolution,
    Def: ScoreDefinition<Score = S::Score>,
{
    fn step_started(&mut self, last_step_score: &S::Score) {
        self.inner.step_started(last_step_score);
        // A shape mismatch leaves the step unbounded.
        self.bound = self
            .definition
            .build_optimistic_bound(&self.trend, &last_step_score.with_init_score(0))
            .ok();
        self.bound_reached = false;
    }

    fn add_move_score(&mut self, move_index: usize, score: S::Score) {
        if !self.bound_reached {
            self.bound_reached = self
                .bound
                .as_ref()
                .is_some_and(|bound| score.with_init_score(0) >= *bound);
        }
        self.inner.add_move_score(move_index, score);
    }

    fn is_quit_early(&self) -> bool {
        self.bound_reached || self.inner.is_quit_early()
    }

    fn pick_move_index(&mut self) -> Option<(usize, S::Score)> {
        self.inner.pick_move_index()
    }
}
