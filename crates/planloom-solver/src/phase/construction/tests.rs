//! Tests for the construction heuristic.

use planloom_core::{
    InitializingScoreTrend, InitializingScoreTrendLevel, PlanningSolution, Score, SimpleScore,
    SimpleScoreDefinition,
};
use planloom_scoring::{ScoreDirector, SimpleScoreDirector};
use planloom_test::nqueens::{calculate_conflicts, get_queen_row, queen_count, set_queen_row};
use planloom_test::scenario::{
    calculate_shared_values, entity_count, fully_initialized_scenario, get_value,
    is_pinned, is_reinitialize_requested, pinned_scenario, preassigned_movable_scenario,
    reinitialize_scenario, set_value, value_range,
};
use planloom_test::{NQueensSolution, TestdataSolution};

use super::*;
use crate::heuristic::selector::{
    FromSolutionEntitySelector, FromSolutionValueSelector, StaticValueSelector,
};
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::StepCountTermination;

type Calculator<S> = fn(&S) -> SimpleScore;
type TestdataDirector = SimpleScoreDirector<TestdataSolution, Calculator<TestdataSolution>>;
type QueensDirector = SimpleScoreDirector<NQueensSolution, Calculator<NQueensSolution>>;

type TestdataPlacer = QueuedEntityPlacer<
    TestdataSolution,
    usize,
    FromSolutionEntitySelector<TestdataSolution>,
    FromSolutionValueSelector<TestdataSolution, usize>,
>;

fn testdata_placer() -> TestdataPlacer {
    QueuedEntityPlacer::new(
        FromSolutionEntitySelector::new(0, entity_count).with_pinning(is_pinned),
        FromSolutionValueSelector::new(value_range),
        get_value,
        set_value,
        0,
        "value",
    )
    .with_reinitialize_filter(is_reinitialize_requested)
}

fn testdata_scope(solution: TestdataSolution) -> SolverScope<TestdataSolution, TestdataDirector> {
    let director = SimpleScoreDirector::new(
        solution,
        calculate_shared_values as Calculator<TestdataSolution>,
    );
    let mut scope = SolverScope::with_seed(director, 0);
    scope.start_solving();
    scope
}

fn solve_testdata(solution: TestdataSolution) -> TestdataSolution {
    let mut scope = testdata_scope(solution);
    let mut phase = ConstructionHeuristicPhase::new(testdata_placer(), FirstFitForager::new());
    phase.solve(&mut scope).unwrap();
    scope.score_director().clone_working_solution()
}

fn queens_scope(n: usize) -> SolverScope<NQueensSolution, QueensDirector> {
    let director = SimpleScoreDirector::new(
        NQueensSolution::uninitialized(n),
        calculate_conflicts as Calculator<NQueensSolution>,
    );
    let mut scope = SolverScope::with_seed(director, 0);
    scope.start_solving();
    scope
}

fn queens_placer(
    n: i64,
) -> QueuedEntityPlacer<
    NQueensSolution,
    i64,
    FromSolutionEntitySelector<NQueensSolution>,
    StaticValueSelector<i64>,
> {
    QueuedEntityPlacer::new(
        FromSolutionEntitySelector::new(0, queen_count),
        StaticValueSelector::new((0..n).collect()),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    )
}

// ============================================================================
// Placement rules
// ============================================================================

#[test]
fn test_preassigned_movable_values_are_kept() {
    let solution = solve_testdata(preassigned_movable_scenario());

    assert_eq!(solution.init_score(), 0);
    assert!(solution.value_of("e1").is_some());
    assert_eq!(solution.value_of("e2"), Some("v2"));
    assert_eq!(solution.value_of("e3"), Some("v1"));
}

#[test]
fn test_pinned_entities_are_left_untouched() {
    let solution = solve_testdata(pinned_scenario());

    assert!(solution.value_of("e1").is_some());
    assert_eq!(solution.value_of("e2"), Some("v2"));
    assert_eq!(solution.value_of("e3"), None);
    assert_eq!(solution.init_score(), -1);
}

#[test]
fn test_reinitialize_requested_entities_are_placed_again() {
    let solution = solve_testdata(reinitialize_scenario());

    assert!(solution.value_of("e1").is_some());
    assert_eq!(solution.value_of("e2"), Some("v2"));
    assert!(solution.value_of("e3").is_some());
    assert_eq!(solution.value_of("e4"), None);
    assert_eq!(solution.init_score(), -1);
}

#[test]
fn test_fully_initialized_solution_is_unchanged() {
    let original = fully_initialized_scenario();
    let mut scope = testdata_scope(original.clone());
    let mut phase = ConstructionHeuristicPhase::new(testdata_placer(), BestFitForager::new());
    phase.solve(&mut scope).unwrap();

    let solution = scope.score_director().clone_working_solution();
    assert_eq!(solution.entities, original.entities);
    assert_eq!(solution.init_score(), 0);
    assert_eq!(scope.total_step_count(), 0);
}

#[test]
fn test_reinitialized_entity_counts_as_step() {
    let mut scope = testdata_scope(reinitialize_scenario());
    let mut phase = ConstructionHeuristicPhase::new(testdata_placer(), BestFitForager::new());
    phase.solve(&mut scope).unwrap();

    // e1 and e3
    assert_eq!(scope.total_step_count(), 2);
    let best = scope.best_score().copied().unwrap();
    assert_eq!(best.init_score(), -1);
}

#[test]
fn test_best_fit_avoids_shared_values() {
    let mut scope = testdata_scope(preassigned_movable_scenario());
    let mut phase = ConstructionHeuristicPhase::new(testdata_placer(), BestFitForager::new());
    phase.solve(&mut scope).unwrap();

    let solution = scope.score_director().clone_working_solution();
    assert_eq!(solution.value_of("e1"), Some("v3"));
    assert_eq!(scope.best_score(), Some(&SimpleScore::of(0)));
}

// ============================================================================
// N-Queens
// ============================================================================

#[test]
fn test_first_fit_assigns_every_queen() {
    let mut scope = queens_scope(4);
    let mut phase = ConstructionHeuristicPhase::new(queens_placer(4), FirstFitForager::new());
    phase.solve(&mut scope).unwrap();

    let score = scope.calculate_score();
    assert!(score.is_solution_initialized());
    assert_eq!(scope.total_step_count(), 4);
    assert!(scope.working_solution().rows().iter().all(Option::is_some));
}

#[test]
fn test_best_fit_is_never_worse_than_first_fit() {
    let mut first_scope = queens_scope(6);
    ConstructionHeuristicPhase::new(queens_placer(6), FirstFitForager::new())
        .solve(&mut first_scope)
        .unwrap();

    let mut best_scope = queens_scope(6);
    ConstructionHeuristicPhase::new(queens_placer(6), BestFitForager::new())
        .solve(&mut best_scope)
        .unwrap();

    assert!(best_scope.calculate_score() >= first_scope.calculate_score());
}

#[test]
fn test_best_score_tracks_improving_steps() {
    let mut scope = queens_scope(4);
    let starting = scope.best_score().copied().unwrap();
    ConstructionHeuristicPhase::new(queens_placer(4), BestFitForager::new())
        .solve(&mut scope)
        .unwrap();

    let best = scope.best_score().copied().unwrap();
    assert!(best > starting);
    assert_eq!(best, scope.calculate_score());
}

#[test]
fn test_phase_termination_stops_placement() {
    let mut scope = queens_scope(8);
    let mut phase = ConstructionHeuristicPhase::new(queens_placer(8), FirstFitForager::new())
        .with_termination(Box::new(StepCountTermination::new(3)));
    phase.solve(&mut scope).unwrap();

    assert_eq!(scope.total_step_count(), 3);
    assert_eq!(scope.calculate_score().init_score(), -5);
}

#[test]
fn test_empty_value_range_leaves_entities_unassigned() {
    let mut scope = queens_scope(3);
    let placer = QueuedEntityPlacer::new(
        FromSolutionEntitySelector::new(0, queen_count),
        StaticValueSelector::new(Vec::<i64>::new()),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    );
    ConstructionHeuristicPhase::new(placer, BestFitForager::new())
        .solve(&mut scope)
        .unwrap();

    assert_eq!(scope.total_step_count(), 3);
    assert_eq!(scope.calculate_score().init_score(), -3);
}

#[test]
fn test_phase_statistics_are_recorded() {
    let mut scope = queens_scope(4);
    ConstructionHeuristicPhase::new(queens_placer(4), BestFitForager::new())
        .solve(&mut scope)
        .unwrap();

    let stats = scope.statistics().snapshot();
    assert_eq!(stats.phase_count(), 1);
    let phase = &stats.phase_statistics[0];
    assert_eq!(phase.phase_type, "ConstructionHeuristic");
    assert_eq!(phase.step_count, 4);
    // 4 rows per queen with best fit
    assert_eq!(phase.moves_evaluated, 16);
    assert!(!phase.ended_early);
}

// ============================================================================
// Optimistic Bound Tests
// ============================================================================

fn only_down() -> InitializingScoreTrend {
    InitializingScoreTrend::uniform(InitializingScoreTrendLevel::OnlyDown, 1)
}

#[test]
fn test_optimistic_bound_quits_when_candidate_keeps_last_score() {
    let mut forager = OptimisticBoundForager::<NQueensSolution, _>::new(
        Box::new(BestFitForager::new()),
        SimpleScoreDefinition,
        only_down(),
    );
    forager.step_started(&SimpleScore::of_uninitialized(-3, -2));
    forager.add_move_score(0, SimpleScore::of_uninitialized(-2, -4));
    assert!(!forager.is_quit_early());
    forager.add_move_score(1, SimpleScore::of_uninitialized(-2, -2));
    assert!(forager.is_quit_early());
    assert_eq!(
        forager.pick_move_index(),
        Some((1, SimpleScore::of_uninitialized(-2, -2)))
    );

    forager.step_started(&SimpleScore::of_uninitialized(-2, -2));
    assert!(!forager.is_quit_early());
}

#[test]
fn test_any_trend_never_quits_early() {
    let mut forager = OptimisticBoundForager::<NQueensSolution, _>::new(
        Box::new(BestFitForager::new()),
        SimpleScoreDefinition,
        InitializingScoreTrend::uniform(InitializingScoreTrendLevel::Any, 1),
    );
    forager.step_started(&SimpleScore::of_uninitialized(-3, 0));
    forager.add_move_score(0, SimpleScore::of_uninitialized(-2, 0));
    assert!(!forager.is_quit_early());
}

#[test]
fn test_optimistic_bound_matches_best_fit_with_fewer_moves() {
    let mut best_scope = queens_scope(6);
    ConstructionHeuristicPhase::new(queens_placer(6), BestFitForager::new())
        .solve(&mut best_scope)
        .unwrap();

    let mut bounded_scope = queens_scope(6);
    let forager = OptimisticBoundForager::<NQueensSolution, _>::new(
        Box::new(BestFitForager::new()),
        SimpleScoreDefinition,
        only_down(),
    );
    ConstructionHeuristicPhase::new(queens_placer(6), forager)
        .solve(&mut bounded_scope)
        .unwrap();

    assert_eq!(
        bounded_scope.working_solution().rows(),
        best_scope.working_solution().rows()
    );
    let best_moves = best_scope.statistics().snapshot().total_moves_evaluated;
    let bounded_moves = bounded_scope.statistics().snapshot().total_moves_evaluated;
    assert!(bounded_moves < best_moves);
}
