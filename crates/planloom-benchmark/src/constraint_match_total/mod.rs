//! Constraint match total best score statistic.
//!
//! Records the weight of every constraint match total each time a local
//! search step improves the best score. At the end of each local search
//! phase the last point is repeated at the phase's final time so a chart
//! shows a flat line until the solver stopped. That trailing point stays
//! in [`ConstraintMatchTotalBestScoreStatistic::points`] but is written to
//! CSV only when [`StatisticConfig::export_trailing_point`] is set.

mod point;
mod series;


use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use planloom_config::StatisticConfig;
use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;
use planloom_solver::{ListenerHandle, PhaseKind, PhaseLifecycleListener, PhaseScope, Solver, StepScope};
use tracing::warn;

use crate::error::Result;

pub use point::{read_csv, write_csv, ConstraintMatchTotalBestScorePoint};
pub use series::{series_by_level, ConstraintWeightSeries, LevelSeries};

const STATISTIC_NAME: &str = "constraintMatchTotalBestScore";

/// Collects [`ConstraintMatchTotalBestScorePoint`]s from a solver.
///
/// # Example
///
/// ```
/// use planloom_benchmark::ConstraintMatchTotalBestScoreStatistic;
/// use planloom_config::StatisticConfig;
/// use planloom_core::SimpleScore;
/// use planloom_scoring::SimpleScoreDirector;
/// use planloom_solver::Solver;
/// # use planloom_core::PlanningSolution;
/// # #[derive(Clone, Debug)]
/// # struct Plan { score: Option<SimpleScore> }
/// # impl PlanningSolution for Plan {
/// #     type Score = SimpleScore;
/// #     fn score(&self) -> Option<Self::Score> { self.score }
/// #     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// # }
///
/// let mut solver = Solver::<Plan, SimpleScoreDirector<Plan, fn(&Plan) -> SimpleScore>>::new();
/// let mut statistic = ConstraintMatchTotalBestScoreStatistic::new(&StatisticConfig::default());
///
/// statistic.open(&mut solver);
/// assert!(solver.is_constraint_match_enabled_preference());
/// assert_eq!(solver.listener_count(), 1);
///
/// assert!(statistic.close(&mut solver));
/// assert_eq!(solver.listener_count(), 0);
/// ```
#[derive(Debug)]
pub struct ConstraintMatchTotalBestScoreStatistic {
    listener: Arc<ConstraintMatchTotalBestScoreListener>,
    handle: Option<ListenerHandle>,
    charted_score_level_size: usize,
    export_trailing_point: bool,
}

impl ConstraintMatchTotalBestScoreStatistic {
    pub fn new(config: &StatisticConfig) -> Self {
        Self {
            listener: Arc::new(ConstraintMatchTotalBestScoreListener::default()),
            handle: None,
            charted_score_level_size: config.charted_score_level_size,
            export_trailing_point: config.export_trailing_point,
        }
    }

    /// Asks `solver` for constraint matches and starts listening to it.
    pub fn open<S, D>(&mut self, solver: &mut Solver<S, D>)
    where
        S: PlanningSolution,
        D: ScoreDirector<S> + 'static,
    {
        solver.set_constraint_match_enabled_preference(true);
        if let Some(previous) = self.handle.take() {
            solver.remove_phase_lifecycle_listener(previous);
        }
        let listener: Arc<dyn PhaseLifecycleListener<S, D>> = self.listener.clone();
        self.handle = Some(solver.add_phase_lifecycle_listener(listener));
    }

    /// Stops listening to `solver`. Returns false if the statistic was not
    /// open on it.
    pub fn close<S, D>(&mut self, solver: &mut Solver<S, D>) -> bool
    where
        S: PlanningSolution,
        D: ScoreDirector<S>,
    {
        match self.handle.take() {
            Some(handle) => solver.remove_phase_lifecycle_listener(handle),
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Every recorded point, trailing points included.
    pub fn points(&self) -> Vec<ConstraintMatchTotalBestScorePoint> {
        self.listener.state().points.clone()
    }

    /// The points written to CSV.
    pub fn csv_points(&self) -> Vec<ConstraintMatchTotalBestScorePoint> {
        self.listener
            .state()
            .points
            .iter()
            .filter(|point| self.export_trailing_point || !point.trailing)
            .cloned()
            .collect()
    }

    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        write_csv(&self.listener.state().points, self.export_trailing_point, writer)
    }

    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<()> {
        point::write_csv_file(
            &self.listener.state().points,
            self.export_trailing_point,
            path.as_ref(),
        )
    }

    /// Replaces the recorded points with the ones in a CSV file.
    pub fn read_csv_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let points = point::read_csv_file(path.as_ref())?;
        self.listener.state().points = points;
        Ok(())
    }

    /// The chartable series, one entry per score level.
    pub fn series_by_level(&self) -> Vec<LevelSeries> {
        series_by_level(&self.listener.state().points, self.charted_score_level_size)
    }
}

impl Default for ConstraintMatchTotalBestScoreStatistic {
    fn default() -> Self {
        Self::new(&StatisticConfig::default())
    }
}

#[derive(Debug, Default)]
struct ListenerState {
    constraint_match_enabled: bool,
    points: Vec<ConstraintMatchTotalBestScorePoint>,
}

#[derive(Debug, Default)]
struct ConstraintMatchTotalBestScoreListener {
    state: Mutex<ListenerState>,
}

impl ConstraintMatchTotalBestScoreListener {
    fn state(&self) -> MutexGuard<'_, ListenerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, D> PhaseLifecycleListener<S, D> for ConstraintMatchTotalBestScoreListener
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    fn phase_started(&self, phase_scope: &PhaseScope<'_, S, D>) {
        let enabled = phase_scope.score_director().is_constraint_match_enabled();
        self.state().constraint_match_enabled = enabled;
        if !enabled {
            warn!(
                event = "unsupported_feature",
                statistic = STATISTIC_NAME,
                phase_index = phase_scope.phase_index(),
                "statistic cannot function properly because constraint matches are not supported on the score director"
            );
        }
    }

    fn step_ended(&self, step_scope: &StepScope<'_, '_, S, D>) {
        let StepScope::LocalSearch(_) = step_scope else {
            return;
        };
        let mut state = self.state();
        if !state.constraint_match_enabled || !step_scope.best_score_improved() {
            return;
        }
        let time_millis_spent = step_scope.time_millis_spent();
        for total in step_scope.score_director().constraint_match_totals() {
            state.points.push(ConstraintMatchTotalBestScorePoint {
                time_millis_spent,
                constraint_package: total.constraint_package().to_string(),
                constraint_name: total.constraint_name().to_string(),
                score_level: total.score_level(),
                constraint_match_count: total.constraint_match_count(),
                weight_total: total.weight_total().to_f64(),
                trailing: false,
            });
        }
    }

    fn phase_ended(&self, phase_scope: &PhaseScope<'_, S, D>) {
        if phase_scope.phase_kind() != PhaseKind::LocalSearch {
            return;
        }
        let mut state = self.state();
        if !state.constraint_match_enabled {
            return;
        }
        let time_millis_spent = phase_scope.time_millis_spent();
        if let Some(last) = state.points.last() {
            let trailing = last.trailing_at(time_millis_spent);
            state.points.push(trailing);
        }
    }
}
