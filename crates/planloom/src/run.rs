//! Solver entry point for solutions with one basic planning variable.

use std::fmt::Debug;

use planloom_config::SolverConfig;
use planloom_core::domain::PlanningSolution;
use planloom_core::score::ScoreDefinition;
use planloom_scoring::ScoreDirector;
use planloom_solver::{
    build_solver, ChangeMoveSelector, FromSolutionEntitySelector, FromSolutionValueSelector,
    QueuedEntityPlacer, Result, SolveResult,
};

/// Accessors of one basic planning variable.
pub struct BasicVariable<S, V> {
    variable_name: &'static str,
    descriptor_index: usize,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    entity_count: fn(&S) -> usize,
    value_range: fn(&S) -> Vec<V>,
    pinning: Option<fn(&S, usize) -> bool>,
    reinitialize_filter: Option<fn(&S, usize) -> bool>,
}

impl<S, V> BasicVariable<S, V> {
    pub fn new(
        variable_name: &'static str,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        entity_count: fn(&S) -> usize,
        value_range: fn(&S) -> Vec<V>,
    ) -> Self {
        Self {
            variable_name,
            descriptor_index: 0,
            getter,
            setter,
            entity_count,
            value_range,
            pinning: None,
            reinitialize_filter: None,
        }
    }

    pub fn with_descriptor_index(mut self, descriptor_index: usize) -> Self {
        self.descriptor_index = descriptor_index;
        self
    }

    /// Entities for which `pinning` returns true are never changed.
    pub fn with_pinning(mut self, pinning: fn(&S, usize) -> bool) -> Self {
        self.pinning = Some(pinning);
        self
    }

    /// Assigned entities for which `filter` returns true are placed again
    /// by the construction heuristic.
    pub fn with_reinitialize_filter(mut self, filter: fn(&S, usize) -> bool) -> Self {
        self.reinitialize_filter = Some(filter);
        self
    }

    fn entity_selector(&self) -> FromSolutionEntitySelector<S> {
        let selector = FromSolutionEntitySelector::new(self.descriptor_index, self.entity_count);
        match self.pinning {
            Some(pinning) => selector.with_pinning(pinning),
            None => selector,
        }
    }
}

/// Builds a solver from `config` for `variable` and solves the solution
/// owned by `score_director`.
///
/// An empty phase list runs a first fit construction heuristic followed
/// by late acceptance local search.
pub fn run_solver<S, V, D, Def>(
    config: &SolverConfig,
    definition: &Def,
    variable: &BasicVariable<S, V>,
    score_director: D,
) -> Result<SolveResult<S>>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
    D: ScoreDirector<S> + 'static,
    Def: ScoreDefinition<Score = S::Score> + Clone + 'static,
{
    #[cfg(feature = "console")]
    planloom_console::init();

    let mut placer = QueuedEntityPlacer::new(
        variable.entity_selector(),
        FromSolutionValueSelector::new(variable.value_range),
        variable.getter,
        variable.setter,
        variable.descriptor_index,
        variable.variable_name,
    );
    if let Some(filter) = variable.reinitialize_filter {
        placer = placer.with_reinitialize_filter(filter);
    }
    let move_selector = ChangeMoveSelector::new(
        variable.entity_selector(),
        FromSolutionValueSelector::new(variable.value_range),
        variable.getter,
        variable.setter,
        variable.descriptor_index,
        variable.variable_name,
    );

    let mut solver = build_solver(config, definition, placer, move_selector)?;
    solver.solve(score_director)
}

#[cfg(test)]
mod tests {
    use planloom_config::TerminationConfig;
    use planloom_core::{Score, SimpleScore, SimpleScoreDefinition};
    use planloom_scoring::SimpleScoreDirector;
    use planloom_test::nqueens::{
        calculate_conflicts, get_queen_row, queen_count, row_range, set_queen_row,
    };
    use planloom_test::scenario::{
        calculate_shared_values, entity_count, get_value, is_pinned, is_reinitialize_requested,
        pinned_scenario, set_value, value_range,
    };
    use planloom_test::{NQueensSolution, TestdataSolution};

    use super::*;

    fn queens() -> BasicVariable<NQueensSolution, i64> {
        BasicVariable::new("row", get_queen_row, set_queen_row, queen_count, row_range)
    }

    #[test]
    fn test_run_solver_with_default_phases() {
        let config = SolverConfig::new().with_termination(TerminationConfig {
            step_count_limit: Some(60),
            ..Default::default()
        });
        let director = SimpleScoreDirector::new(
            NQueensSolution::uninitialized(5),
            calculate_conflicts as fn(&NQueensSolution) -> SimpleScore,
        );

        let result = run_solver(&config, &SimpleScoreDefinition, &queens(), director).unwrap();
        assert!(result.solution.rows().iter().all(Option::is_some));
        assert_eq!(result.statistics.phase_count(), 2);
    }

    #[test]
    fn test_run_solver_respects_pinning_and_reinitialize() {
        let variable = BasicVariable::new("value", get_value, set_value, entity_count, value_range)
            .with_pinning(is_pinned)
            .with_reinitialize_filter(is_reinitialize_requested);
        let config = SolverConfig::new().with_termination(TerminationConfig {
            step_count_limit: Some(10),
            ..Default::default()
        });
        let director = SimpleScoreDirector::new(
            pinned_scenario(),
            calculate_shared_values as fn(&TestdataSolution) -> SimpleScore,
        );

        let result = run_solver(&config, &SimpleScoreDefinition, &variable, director).unwrap();
        assert!(result.solution.value_of("e1").is_some());
        assert_eq!(result.solution.value_of("e2"), Some("v2"));
        assert_eq!(result.solution.value_of("e3"), None);
        assert_eq!(result.score.init_score(), -1);
    }
}
