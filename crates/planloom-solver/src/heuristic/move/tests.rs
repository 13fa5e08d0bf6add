//! Tests for change, swap and either moves.

use planloom_core::{Score, SimpleScore};
use planloom_scoring::{RecordingScoreDirector, ScoreDirector, SimpleScoreDirector};
use planloom_test::nqueens::{calculate_conflicts, get_queen_row, set_queen_row};
use planloom_test::NQueensSolution;

use super::{ChangeMove, EitherMove, Move, SwapMove};

type NQueensDirector = SimpleScoreDirector<NQueensSolution, fn(&NQueensSolution) -> SimpleScore>;

fn director(rows: &[Option<i64>]) -> NQueensDirector {
    SimpleScoreDirector::new(
        NQueensSolution::with_optional_rows(rows),
        calculate_conflicts as fn(&NQueensSolution) -> SimpleScore,
    )
}

fn change(idx: usize, to: Option<i64>) -> ChangeMove<NQueensSolution, i64> {
    ChangeMove::new(idx, to, get_queen_row, set_queen_row, "row", 0)
}

fn swap(left: usize, right: usize) -> SwapMove<NQueensSolution, i64> {
    SwapMove::new(left, right, get_queen_row, set_queen_row, "row", 0)
}

// ============================================================================
// ChangeMove
// ============================================================================

#[test]
fn test_change_move_is_doable_only_for_new_value() {
    let director = director(&[Some(0), Some(1)]);
    assert!(!change(0, Some(0)).is_doable(&director));
    assert!(change(0, Some(2)).is_doable(&director));
    assert!(change(0, None).is_doable(&director));
}

#[test]
fn test_change_move_assigns_and_undoes() {
    let mut director = director(&[Some(0), Some(1), None]);
    let before = director.calculate_score();

    {
        let mut recording = RecordingScoreDirector::new(&mut director);
        change(2, Some(3)).do_move(&mut recording);
        assert_eq!(get_queen_row(recording.working_solution(), 2), Some(3));
        assert_eq!(recording.calculate_score().init_score(), 0);
        recording.undo_changes();
    }

    assert_eq!(get_queen_row(director.working_solution(), 2), None);
    assert_eq!(director.calculate_score(), before);
}

#[test]
fn test_change_move_metadata() {
    let m = change(1, Some(4));
    assert_eq!(m.entity_indices(), &[1]);
    assert_eq!(m.variable_name(), "row");
    assert_eq!(m.descriptor_index(), 0);
    assert_eq!(m.describe(), "row[1] -> 4");
    assert_eq!(change(1, None).describe(), "row[1] -> null");
}

// ============================================================================
// SwapMove
// ============================================================================

#[test]
fn test_swap_move_requires_distinct_values() {
    let director = director(&[Some(2), Some(2), Some(0)]);
    assert!(!swap(0, 1).is_doable(&director));
    assert!(!swap(2, 2).is_doable(&director));
    assert!(swap(0, 2).is_doable(&director));
}

#[test]
fn test_swap_move_exchanges_and_undoes() {
    let mut director = director(&[Some(0), Some(3)]);

    {
        let mut recording = RecordingScoreDirector::new(&mut director);
        swap(0, 1).do_move(&mut recording);
        assert_eq!(recording.working_solution().rows(), vec![Some(3), Some(0)]);
        recording.undo_changes();
    }

    assert_eq!(director.working_solution().rows(), vec![Some(0), Some(3)]);
}

#[test]
fn test_swap_move_describe_names_both_entities() {
    let m = swap(0, 3);
    assert_eq!(m.entity_indices(), &[0, 3]);
    assert_eq!(m.describe(), "row[0] <-> row[3]");
}

// ============================================================================
// EitherMove
// ============================================================================

#[test]
fn test_either_move_delegates() {
    let mut director = director(&[Some(0), Some(1)]);
    let left: EitherMove<_, SwapMove<NQueensSolution, i64>> = EitherMove::Left(change(0, Some(2)));
    let right: EitherMove<ChangeMove<NQueensSolution, i64>, _> = EitherMove::Right(swap(0, 1));

    assert!(left.is_doable(&director));
    assert_eq!(right.entity_indices(), &[0, 1]);
    assert_eq!(left.describe(), "row[0] -> 2");

    left.do_move(&mut director);
    assert_eq!(director.working_solution().rows(), vec![Some(2), Some(1)]);
    right.do_move(&mut director);
    assert_eq!(director.working_solution().rows(), vec![Some(1), Some(2)]);
}
