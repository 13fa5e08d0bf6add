//! Tests for the local search phase.

use std::sync::{Arc, Mutex};

use planloom_core::SimpleScore;
use planloom_scoring::SimpleScoreDirector;
use planloom_test::nqueens::{calculate_conflicts, get_queen_row, queen_count, set_queen_row};
use planloom_test::NQueensSolution;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::heuristic::r#move::ChangeMove;
use crate::heuristic::selector::{
    ChangeMoveSelector, FromSolutionEntitySelector, SelectionOrder, StaticValueSelector,
};
use crate::listener::PhaseLifecycleListener;
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope, StepScope};
use crate::termination::StepCountTermination;

type Director = SimpleScoreDirector<NQueensSolution, fn(&NQueensSolution) -> SimpleScore>;
type QueenMove = ChangeMove<NQueensSolution, i64>;
type QueenSelector = ChangeMoveSelector<
    NQueensSolution,
    i64,
    FromSolutionEntitySelector<NQueensSolution>,
    StaticValueSelector<i64>,
>;
type QueenPhase<A, Fo> = LocalSearchPhase<NQueensSolution, Director, QueenMove, QueenSelector, A, Fo>;

fn solver_scope(rows: &[i64], seed: u64) -> SolverScope<NQueensSolution, Director> {
    let director = SimpleScoreDirector::new(
        NQueensSolution::with_rows(rows),
        calculate_conflicts as fn(&NQueensSolution) -> SimpleScore,
    );
    let mut scope = SolverScope::with_seed(director, seed);
    scope.start_solving();
    scope
}

fn change_selector(n: i64) -> QueenSelector {
    ChangeMoveSelector::new(
        FromSolutionEntitySelector::new(0, queen_count),
        StaticValueSelector::new((0..n).collect()),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    )
}

fn queen_phase<A, Fo>(selector: QueenSelector, acceptor: A, forager: Fo, steps: u64) -> QueenPhase<A, Fo>
where
    A: Acceptor<NQueensSolution>,
    Fo: LocalSearchForager<NQueensSolution>,
{
    LocalSearchPhase::new(selector, acceptor, forager)
        .with_termination(Box::new(StepCountTermination::new(steps)))
}

#[derive(Debug, Clone, PartialEq)]
struct RecordedStep {
    description: String,
    score: SimpleScore,
    improved: bool,
    previous_best: SimpleScore,
    best_after: SimpleScore,
}

#[derive(Debug, Default)]
struct StepRecorder {
    best: Mutex<Option<SimpleScore>>,
    steps: Mutex<Vec<RecordedStep>>,
}

impl StepRecorder {
    fn steps(&self) -> Vec<RecordedStep> {
        self.steps.lock().unwrap().clone()
    }
}

impl PhaseLifecycleListener<NQueensSolution, Director> for StepRecorder {
    fn phase_started(&self, phase_scope: &PhaseScope<'_, NQueensSolution, Director>) {
        *self.best.lock().unwrap() = phase_scope.best_score().copied();
    }

    fn step_ended(&self, step_scope: &StepScope<'_, '_, NQueensSolution, Director>) {
        let StepScope::LocalSearch(step) = step_scope else {
            return;
        };
        let mut best = self.best.lock().unwrap();
        let previous_best = best.unwrap();
        let best_after = step_scope.phase_scope().best_score().copied().unwrap();
        self.steps.lock().unwrap().push(RecordedStep {
            description: step.move_description().to_string(),
            score: *step_scope.step_score(),
            improved: step_scope.best_score_improved(),
            previous_best,
            best_after,
        });
        *best = Some(best_after);
    }
}

fn recorded_scope(
    rows: &[i64],
    seed: u64,
) -> (SolverScope<NQueensSolution, Director>, Arc<StepRecorder>) {
    let recorder = Arc::new(StepRecorder::default());
    let listener: Arc<dyn PhaseLifecycleListener<NQueensSolution, Director>> = recorder.clone();
    let director = SimpleScoreDirector::new(
        NQueensSolution::with_rows(rows),
        calculate_conflicts as fn(&NQueensSolution) -> SimpleScore,
    );
    let mut scope = SolverScope::with_seed(director, seed).with_listeners(vec![listener]);
    scope.start_solving();
    (scope, recorder)
}

// ============================================================================
// Step contract
// ============================================================================

#[test]
fn test_hill_climbing_improves_score() {
    let mut scope = solver_scope(&[0, 0, 0, 0, 0, 0], 0);
    let starting = scope.best_score().copied().unwrap();
    let mut phase = queen_phase(
        change_selector(6),
        HillClimbingAcceptor::new(),
        AcceptedCountForager::new(usize::MAX),
        10,
    );
    phase.solve(&mut scope).unwrap();

    let best = scope.best_score().copied().unwrap();
    assert!(best > starting);
    assert_eq!(scope.best_solution().unwrap().score, Some(best));
}

#[test]
fn test_best_replaced_only_on_strict_improvement() {
    let (mut scope, recorder) = recorded_scope(&[0, 1, 2, 3, 4, 5, 6, 7], 3);
    let mut phase = queen_phase(
        change_selector(8).with_selection_order(SelectionOrder::Random),
        LateAcceptanceAcceptor::new(5),
        FirstAcceptedForager::new(),
        60,
    );
    phase.solve(&mut scope).unwrap();

    let steps = recorder.steps();
    assert!(!steps.is_empty());
    for step in &steps {
        assert_eq!(step.improved, step.score > step.previous_best, "{step:?}");
        if step.improved {
            assert_eq!(step.best_after, step.score);
        } else {
            assert_eq!(step.best_after, step.previous_best);
        }
    }
    // Committed steps that do not improve still move the working solution
    assert!(steps.iter().any(|step| !step.improved));
}

#[test]
fn test_same_seed_gives_same_steps() {
    let run = |seed: u64| {
        let (mut scope, recorder) = recorded_scope(&[0, 0, 0, 0, 0, 0, 0, 0], seed);
        let mut phase = queen_phase(
            change_selector(8).with_selection_order(SelectionOrder::Random),
            SimulatedAnnealingAcceptor::new(SimpleScore::of(2), 0.95),
            AcceptedCountForager::new(3).with_breaking_tie_randomly(true),
            40,
        );
        phase.solve(&mut scope).unwrap();
        (recorder.steps(), scope.best_score().copied())
    };

    let (first_steps, first_best) = run(42);
    let (second_steps, second_best) = run(42);
    assert_eq!(first_steps, second_steps);
    assert_eq!(first_best, second_best);
}

#[test]
fn test_step_count_termination_limits_steps() {
    let mut scope = solver_scope(&[0, 1, 2, 3, 4, 5, 6, 7], 0);
    let mut phase = queen_phase(
        change_selector(8),
        EntityTabuAcceptor::new(3),
        FirstAcceptedForager::new(),
        5,
    );
    phase.solve(&mut scope).unwrap();

    assert_eq!(scope.total_step_count(), 5);
    let stats = scope.statistics().snapshot();
    assert_eq!(stats.phase_statistics[0].step_count, 5);
    assert!(!stats.phase_statistics[0].ended_early);
}

// ============================================================================
// Ending early
// ============================================================================

#[test]
fn test_phase_ends_early_at_strict_local_optimum() {
    // A 4 queens solution: every single change creates a conflict
    let mut scope = solver_scope(&[1, 3, 0, 2], 0);
    let mut phase = queen_phase(
        change_selector(4),
        HillClimbingAcceptor::new(),
        AcceptedCountForager::new(usize::MAX),
        100,
    );
    phase.solve(&mut scope).unwrap();

    assert_eq!(scope.total_step_count(), 0);
    assert_eq!(scope.best_score(), Some(&SimpleScore::of(0)));
    let stats = scope.statistics().snapshot();
    assert!(stats.phase_statistics[0].ended_early);
    assert_eq!(stats.phase_statistics[0].moves_accepted, 0);
}

#[test]
fn test_phase_ends_early_without_candidates() {
    let mut scope = solver_scope(&[0, 0], 0);
    let selector = ChangeMoveSelector::new(
        FromSolutionEntitySelector::new(0, queen_count),
        StaticValueSelector::new(Vec::<i64>::new()),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    );
    let mut phase: QueenPhase<_, _> =
        LocalSearchPhase::new(selector, HillClimbingAcceptor::new(), FirstAcceptedForager::new());
    phase.solve(&mut scope).unwrap();

    assert_eq!(scope.total_step_count(), 0);
    assert!(scope.statistics().snapshot().phase_statistics[0].ended_early);
}

// ============================================================================
// Foragers
// ============================================================================

#[test]
fn test_accepted_count_forager_picks_best_of_collected() {
    let mut forager = AcceptedCountForager::<NQueensSolution>::new(3);
    let mut rng = StdRng::seed_from_u64(0);
    let zero = SimpleScore::of(0);
    forager.step_started(&zero, &zero);
    forager.add_move_index(4, SimpleScore::of(-3));
    forager.add_move_index(7, SimpleScore::of(-1));
    assert!(!forager.is_quit_early());
    forager.add_move_index(9, SimpleScore::of(-1));
    assert!(forager.is_quit_early());
    assert_eq!(forager.accepted_count(), 3);

    assert_eq!(forager.pick_move_index(&mut rng), Some((7, SimpleScore::of(-1))));
}

#[test]
fn test_accepted_count_forager_random_tie_break_picks_a_best() {
    let mut forager = AcceptedCountForager::<NQueensSolution>::new(10).with_breaking_tie_randomly(true);
    let mut rng = StdRng::seed_from_u64(7);
    let zero = SimpleScore::of(0);
    for _ in 0..10 {
        forager.step_started(&zero, &zero);
        forager.add_move_index(0, SimpleScore::of(-2));
        forager.add_move_index(1, SimpleScore::of(-1));
        forager.add_move_index(2, SimpleScore::of(-1));
        let (index, score) = forager.pick_move_index(&mut rng).unwrap();
        assert!(index == 1 || index == 2);
        assert_eq!(score, SimpleScore::of(-1));
    }
}

#[test]
fn test_first_accepted_forager_quits_immediately() {
    let mut forager = FirstAcceptedForager::<NQueensSolution>::new();
    let mut rng = StdRng::seed_from_u64(0);
    let zero = SimpleScore::of(0);
    forager.step_started(&zero, &zero);
    assert_eq!(forager.pick_move_index(&mut rng), None);

    forager.add_move_index(2, SimpleScore::of(-4));
    assert!(forager.is_quit_early());
    assert_eq!(forager.pick_move_index(&mut rng), Some((2, SimpleScore::of(-4))));
}

#[test]
fn test_first_best_score_improving_forager() {
    let mut forager = FirstBestScoreImprovingForager::<NQueensSolution>::new();
    let mut rng = StdRng::seed_from_u64(0);
    let best = SimpleScore::of(-2);
    let last = SimpleScore::of(-5);

    forager.step_started(&best, &last);
    forager.add_move_index(0, SimpleScore::of(-4));
    forager.add_move_index(1, SimpleScore::of(-3));
    assert!(!forager.is_quit_early());
    assert_eq!(forager.pick_move_index(&mut rng), Some((1, SimpleScore::of(-3))));

    forager.step_started(&best, &last);
    forager.add_move_index(0, SimpleScore::of(-4));
    forager.add_move_index(1, SimpleScore::of(-1));
    assert!(forager.is_quit_early());
    assert_eq!(forager.pick_move_index(&mut rng), Some((1, SimpleScore::of(-1))));
}
