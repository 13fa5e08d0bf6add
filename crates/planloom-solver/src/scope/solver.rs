//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use planloom_config::EnvironmentMode;
use planloom_core::domain::PlanningSolution;
use planloom_scoring::{RecordingScoreDirector, ScoreDirector};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assertion::assert_score_not_corrupted;
use crate::error::Result;
use crate::heuristic::r#move::Move;
use crate::listener::PhaseLifecycleListener;
use crate::statistics::StatisticsCollector;
use crate::termination::Termination;

/// State shared by every phase of one solve.
///
/// Owns the score director, the best solution found so far and the
/// random generator. Phases borrow it mutably through a `PhaseScope`.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    best_solution: Option<S>,
    best_score: Option<S::Score>,
    rng: StdRng,
    start_time: Instant,
    total_step_count: u64,
    phase_count: usize,
    last_improvement_time: Instant,
    last_improvement_step_count: u64,
    environment_mode: EnvironmentMode,
    score_corruption_tolerance: f64,
    statistics: Arc<StatisticsCollector<S::Score>>,
    listeners: Vec<Arc<dyn PhaseLifecycleListener<S, D>>>,
    termination: Option<Arc<dyn Termination<S, D>>>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    /// Creates a scope with an operating system seeded random generator.
    pub fn new(score_director: D) -> Self {
        Self::with_rng(score_director, StdRng::from_os_rng())
    }

    /// Creates a scope with a reproducible random generator.
    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self::with_rng(score_director, StdRng::seed_from_u64(seed))
    }

    fn with_rng(score_director: D, rng: StdRng) -> Self {
        let now = Instant::now();
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            rng,
            start_time: now,
            total_step_count: 0,
            phase_count: 0,
            last_improvement_time: now,
            last_improvement_step_count: 0,
            environment_mode: EnvironmentMode::NonReproducible,
            score_corruption_tolerance: 0.0,
            statistics: Arc::new(StatisticsCollector::new()),
            listeners: Vec::new(),
            termination: None,
            terminate_early_flag: None,
        }
    }

    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    pub fn with_score_corruption_tolerance(mut self, tolerance: f64) -> Self {
        self.score_corruption_tolerance = tolerance;
        self
    }

    pub fn with_termination(mut self, termination: Arc<dyn Termination<S, D>>) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn with_listeners(mut self, listeners: Vec<Arc<dyn PhaseLifecycleListener<S, D>>>) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn with_terminate_early_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = Some(flag);
        self
    }

    /// Resets the clocks and records the initial best solution.
    pub fn start_solving(&mut self) {
        let now = Instant::now();
        self.start_time = now;
        self.last_improvement_time = now;
        self.total_step_count = 0;
        self.last_improvement_step_count = 0;

        let score = self.calculate_score();
        self.best_solution = Some(self.score_director.clone_working_solution());
        self.best_score = Some(score.clone());
        self.statistics.record_improvement(score);
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn time_millis_spent(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    /// Calculates the working score and counts the calculation.
    pub fn calculate_score(&mut self) -> S::Score {
        self.statistics.record_score_calculation();
        self.score_director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best_score.as_ref()
    }

    /// Replaces the best solution with the working solution if `score` is
    /// strictly better than the best score.
    ///
    /// Returns true when the best solution was replaced.
    pub fn update_best_solution(&mut self, score: &S::Score) -> bool {
        let improved = match &self.best_score {
            None => true,
            Some(best) => score > best,
        };
        if improved {
            self.best_solution = Some(self.score_director.clone_working_solution());
            self.best_score = Some(score.clone());
            self.last_improvement_time = Instant::now();
            self.last_improvement_step_count = self.total_step_count;
            self.statistics.record_improvement(score.clone());
        }
        improved
    }

    /// Scores `m` without keeping its changes.
    ///
    /// Under `FullAssert` the resulting score is checked against a full
    /// recalculation, and the score after undoing against the score
    /// before the move.
    pub fn evaluate_move<M: Move<S>>(&mut self, m: &M) -> Result<S::Score> {
        let fully_asserted = self.environment_mode.is_fully_asserted();
        let before = fully_asserted.then(|| self.score_director.calculate_score());

        let (score, from_scratch) = {
            let mut recording = RecordingScoreDirector::new(&mut self.score_director);
            m.do_move(&mut recording);
            let score = recording.calculate_score();
            let from_scratch = fully_asserted.then(|| recording.calculate_score_from_scratch());
            recording.undo_changes();
            (score, from_scratch)
        };
        self.statistics.record_score_calculation();

        if let Some(from_scratch) = from_scratch {
            assert_score_not_corrupted(
                &score,
                &from_scratch,
                self.score_corruption_tolerance,
                || m.describe(),
                &self.score_director,
            )?;
        }
        if let Some(before) = before {
            let after_undo = self.score_director.calculate_score();
            assert_score_not_corrupted(
                &after_undo,
                &before,
                self.score_corruption_tolerance,
                || format!("undo of {}", m.describe()),
                &self.score_director,
            )?;
        }
        Ok(score)
    }

    /// Under `FastAssert` or stricter, checks the working score of a
    /// committed step against a full recalculation.
    pub fn assert_step_score(
        &mut self,
        step_score: &S::Score,
        step_description: impl FnOnce() -> String,
    ) -> Result<()> {
        if !self.environment_mode.is_asserted() {
            return Ok(());
        }
        let from_scratch = self.score_director.calculate_score_from_scratch();
        assert_score_not_corrupted(
            step_score,
            &from_scratch,
            self.score_corruption_tolerance,
            step_description,
            &self.score_director,
        )
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Borrows the score director and the random generator together, for
    /// selectors that read the solution while drawing random numbers.
    pub fn score_director_and_rng(&mut self) -> (&D, &mut StdRng) {
        (&self.score_director, &mut self.rng)
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.statistics.record_step();
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Steps taken since the best score last improved.
    pub fn unimproved_step_count(&self) -> u64 {
        self.total_step_count - self.last_improvement_step_count
    }

    /// Time spent since the best score last improved.
    pub fn unimproved_time(&self) -> Duration {
        self.last_improvement_time.elapsed()
    }

    pub(crate) fn next_phase_index(&mut self) -> usize {
        let index = self.phase_count;
        self.phase_count += 1;
        index
    }

    pub fn statistics(&self) -> &Arc<StatisticsCollector<S::Score>> {
        &self.statistics
    }

    pub fn listeners(&self) -> &[Arc<dyn PhaseLifecycleListener<S, D>>] {
        &self.listeners
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Returns true if solving must stop before the next step or phase.
    pub fn is_terminated(&self) -> bool {
        self.is_terminate_early()
            || self
                .termination
                .as_ref()
                .is_some_and(|t| t.is_solver_terminated(self))
    }

    pub fn fire_solving_started(&self) {
        for listener in &self.listeners {
            listener.solving_started(self);
        }
    }

    pub fn fire_solving_ended(&self) {
        for listener in &self.listeners {
            listener.solving_ended(self);
        }
    }

    /// Returns the best solution, falling back to the working solution.
    pub fn take_best_or_working_solution(self) -> S {
        match self.best_solution {
            Some(best) => best,
            None => self.score_director.clone_working_solution(),
        }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> std::fmt::Debug for SolverScope<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverScope")
            .field("best_score", &self.best_score)
            .field("total_step_count", &self.total_step_count)
            .field("environment_mode", &self.environment_mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
