//! Solver implementation.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use planloom_config::{EnvironmentMode, SolverConfig};
use planloom_core::domain::PlanningSolution;
use planloom_core::score::Score;
use planloom_scoring::ScoreDirector;
use tracing::{debug, info};

use crate::error::Result;
use crate::listener::{ListenerHandle, ListenerRegistry, PhaseLifecycleListener};
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::statistics::SolverStatistics;
use crate::termination::Termination;

/// Outcome of one solve.
#[derive(Debug, Clone)]
pub struct SolveResult<S: PlanningSolution> {
    /// The best solution found.
    pub solution: S,
    pub score: S::Score,
    pub statistics: SolverStatistics<S::Score>,
    /// True when the solve stopped on the early termination flag.
    pub terminated_early: bool,
}

impl<S: PlanningSolution> SolveResult<S> {
    pub fn duration(&self) -> Duration {
        self.statistics.total_duration
    }
}

/// Runs its phases in order on a working solution.
///
/// Termination is checked before every phase and, inside each phase,
/// before every step. Lifecycle listeners can be added and removed
/// between solves through the handles returned on registration.
///
/// # Example
///
/// ```
/// use planloom_core::domain::PlanningSolution;
/// use planloom_core::score::Score;
/// use planloom_core::score::SimpleScore;
/// use planloom_scoring::{ScoreDirector, SimpleScoreDirector};
/// use planloom_solver::error::Result;
/// use planloom_solver::phase::Phase;
/// use planloom_solver::scope::SolverScope;
/// use planloom_solver::solver::Solver;
///
/// #[derive(Clone, Debug)]
/// struct MySolution { score: Option<SimpleScore> }
///
/// impl PlanningSolution for MySolution {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// #[derive(Debug)]
/// struct NoOpPhase;
///
/// impl<S: PlanningSolution, D: ScoreDirector<S>> Phase<S, D> for NoOpPhase {
///     fn solve(&mut self, _: &mut SolverScope<S, D>) -> Result<()> { Ok(()) }
///     fn phase_type_name(&self) -> &'static str { "NoOp" }
/// }
///
/// type MyDirector = SimpleScoreDirector<MySolution, fn(&MySolution) -> SimpleScore>;
///
/// let mut solver: Solver<MySolution, MyDirector> = Solver::new().with_phase(NoOpPhase);
/// let director = SimpleScoreDirector::new(
///     MySolution { score: None },
///     (|_: &MySolution| SimpleScore::of(-1)) as fn(&MySolution) -> SimpleScore,
/// );
/// let result = solver.solve(director).unwrap();
/// assert_eq!(result.score, SimpleScore::of(-1));
/// ```
pub struct Solver<S: PlanningSolution, D: ScoreDirector<S>> {
    phases: Vec<Box<dyn Phase<S, D>>>,
    termination: Option<Arc<dyn Termination<S, D>>>,
    listeners: ListenerRegistry<S, D>,
    constraint_match_enabled_preference: bool,
    environment_mode: EnvironmentMode,
    random_seed: Option<u64>,
    score_corruption_tolerance: f64,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Solver<S, D> {
    /// Creates a solver without phases in `Reproducible` mode.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            termination: None,
            listeners: ListenerRegistry::new(),
            constraint_match_enabled_preference: false,
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            score_corruption_tolerance: 0.0,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            solving: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Takes the environment settings of `config`.
    ///
    /// Phases and termination are built separately, see
    /// [`crate::builder::build_solver`].
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new()
            .with_environment_mode(config.environment_mode)
            .with_random_seed(config.random_seed)
            .with_score_corruption_tolerance(config.score_corruption_tolerance)
            .with_constraint_match_enabled(config.score_director.constraint_match_enabled)
    }

    pub fn with_phase<P: Phase<S, D> + 'static>(mut self, phase: P) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    pub fn with_boxed_phase(mut self, phase: Box<dyn Phase<S, D>>) -> Self {
        self.phases.push(phase);
        self
    }

    /// Sets the solver-level termination.
    pub fn with_termination<T: Termination<S, D> + 'static>(mut self, termination: T) -> Self {
        self.termination = Some(Arc::new(termination));
        self
    }

    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    pub fn with_random_seed(mut self, random_seed: Option<u64>) -> Self {
        self.random_seed = random_seed;
        self
    }

    pub fn with_score_corruption_tolerance(mut self, tolerance: f64) -> Self {
        self.score_corruption_tolerance = tolerance;
        self
    }

    pub fn with_constraint_match_enabled(mut self, enabled: bool) -> Self {
        self.constraint_match_enabled_preference = enabled;
        self
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    /// Registers a listener; listeners fire in registration order.
    pub fn add_phase_lifecycle_listener(
        &mut self,
        listener: Arc<dyn PhaseLifecycleListener<S, D>>,
    ) -> ListenerHandle {
        self.listeners.add(listener)
    }

    /// Unregisters a listener. Returns false if `handle` is not registered.
    pub fn remove_phase_lifecycle_listener(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(handle)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Asks the score director to keep constraint match totals.
    pub fn set_constraint_match_enabled_preference(&mut self, enabled: bool) {
        self.constraint_match_enabled_preference = enabled;
    }

    pub fn is_constraint_match_enabled_preference(&self) -> bool {
        self.constraint_match_enabled_preference
    }

    /// The flag polled by [`Solver::terminate_early`], shareable with
    /// other threads.
    pub fn terminate_early_flag(&self) -> Arc<AtomicBool> {
        self.terminate_early_flag.clone()
    }

    /// Requests early termination of the solving process.
    ///
    /// Returns false if the solver is not solving.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Solves the working solution owned by `score_director`.
    ///
    /// Returns the best solution found. Fails only on conditions that
    /// make the result meaningless, such as score corruption.
    pub fn solve(&mut self, mut score_director: D) -> Result<SolveResult<S>> {
        self.solving.store(true, Ordering::SeqCst);
        self.terminate_early_flag.store(false, Ordering::SeqCst);

        score_director.set_constraint_match_enabled_preference(self.constraint_match_enabled_preference);

        let seed = if self.environment_mode.is_reproducible() {
            Some(self.random_seed.unwrap_or(0))
        } else {
            self.random_seed
        };
        let mut solver_scope = match seed {
            Some(seed) => SolverScope::with_seed(score_director, seed),
            None => SolverScope::new(score_director),
        }
        .with_environment_mode(self.environment_mode)
        .with_score_corruption_tolerance(self.score_corruption_tolerance)
        .with_listeners(self.listeners.snapshot())
        .with_terminate_early_flag(self.terminate_early_flag.clone());
        if let Some(termination) = &self.termination {
            solver_scope = solver_scope.with_termination(termination.clone());
        }

        info!(
            event = "solve_start",
            phases = self.phases.len(),
            environment_mode = ?self.environment_mode,
            random_seed = ?seed,
        );
        solver_scope.start_solving();
        solver_scope.fire_solving_started();

        let outcome = self.run_phases(&mut solver_scope);
        self.solving.store(false, Ordering::SeqCst);
        outcome?;

        solver_scope.fire_solving_ended();

        let terminated_early = solver_scope.is_terminate_early();
        let statistics = solver_scope.statistics().snapshot();
        let score = solver_scope
            .best_score()
            .cloned()
            .unwrap_or_else(S::Score::zero);
        let solution = solver_scope.take_best_or_working_solution();

        info!(
            event = "solve_end",
            score = %score,
            steps = statistics.total_step_count,
            moves_evaluated = statistics.total_moves_evaluated,
            duration_ms = statistics.total_duration.as_millis() as u64,
            terminated_early = terminated_early,
        );

        Ok(SolveResult {
            solution,
            score,
            statistics,
            terminated_early,
        })
    }

    fn run_phases(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        for (index, phase) in self.phases.iter_mut().enumerate() {
            if solver_scope.is_terminated() {
                debug!(event = "phase_skipped", phase_index = index, phase = phase.phase_type_name());
                break;
            }
            phase.solve(solver_scope)?;
        }
        Ok(())
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Default for Solver<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Debug for Solver<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("phases", &self.phases)
            .field("termination", &self.termination)
            .field("listeners", &self.listeners)
            .field("environment_mode", &self.environment_mode)
            .finish()
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
