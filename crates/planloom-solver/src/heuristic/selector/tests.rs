//! Tests for entity, value and move selectors.

use planloom_scoring::{ScoreDirector, SimpleScoreDirector};
use planloom_test::nqueens::{self, get_queen_row, queen_count, set_queen_row};
use planloom_test::scenario::{self, entity_count, get_value, is_pinned, set_value};
use planloom_test::{NQueensSolution, TestdataSolution};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::heuristic::r#move::Move;

fn nqueens_director(rows: &[i64]) -> impl ScoreDirector<NQueensSolution> {
    SimpleScoreDirector::new(
        NQueensSolution::with_rows(rows),
        nqueens::calculate_conflicts,
    )
}

fn pinned_director() -> impl ScoreDirector<TestdataSolution> {
    SimpleScoreDirector::new(
        scenario::pinned_scenario(),
        scenario::calculate_shared_values,
    )
}

fn row_selector(
    values: Vec<i64>,
) -> ChangeMoveSelector<
    NQueensSolution,
    i64,
    FromSolutionEntitySelector<NQueensSolution>,
    StaticValueSelector<i64>,
> {
    ChangeMoveSelector::new(
        FromSolutionEntitySelector::new(0, queen_count),
        StaticValueSelector::new(values),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    )
}

// ============================================================================
// Entity selectors
// ============================================================================

#[test]
fn test_entity_selector_yields_every_entity_in_order() {
    let director = nqueens_director(&[0, 1, 2]);
    let selector = FromSolutionEntitySelector::new(0, queen_count);
    let refs = selector.select_entities(&director);
    assert_eq!(
        refs,
        vec![
            EntityReference::new(0, 0),
            EntityReference::new(0, 1),
            EntityReference::new(0, 2),
        ]
    );
}

#[test]
fn test_entity_selector_skips_pinned_entities() {
    let director = pinned_director();
    let selector = FromSolutionEntitySelector::new(0, entity_count).with_pinning(is_pinned);
    let indices: Vec<usize> = selector
        .select_entities(&director)
        .into_iter()
        .map(|r| r.entity_index)
        .collect();
    assert_eq!(indices, vec![0]);
    assert!(selector.is_pinned(&director, 1));
    assert!(!selector.is_pinned(&director, 0));
}

// ============================================================================
// Value selectors
// ============================================================================

#[test]
fn test_static_value_selector_returns_all_values() {
    let director = nqueens_director(&[0, 1]);
    let selector = StaticValueSelector::new(vec![3i64, 1, 2]);
    assert_eq!(
        ValueSelector::<NQueensSolution, i64>::select_values(&selector, &director, 0),
        vec![3, 1, 2]
    );
}

#[test]
fn test_from_solution_value_selector_reads_range() {
    let director = nqueens_director(&[0, 1, 2, 3]);
    let selector = FromSolutionValueSelector::new(nqueens::row_range);
    assert_eq!(selector.select_values(&director, 0), vec![0, 1, 2, 3]);
}

// ============================================================================
// Move selectors
// ============================================================================

#[test]
fn test_change_move_selector_generates_entity_value_product() {
    let director = nqueens_director(&[0, 1]);
    let mut rng = StdRng::seed_from_u64(0);
    let moves = row_selector(vec![0, 1, 2]).select_moves(&director, &mut rng);
    assert_eq!(moves.len(), 6);
    let descriptions: Vec<String> = moves.iter().map(|m| m.describe()).collect();
    assert_eq!(descriptions[0], "row[0] -> 0");
    assert_eq!(descriptions[5], "row[1] -> 2");
}

#[test]
fn test_change_move_selector_random_order_is_seeded() {
    let director = nqueens_director(&[0, 1, 2, 3]);
    let selector = row_selector(vec![0, 1, 2, 3]).with_selection_order(SelectionOrder::Random);

    let describe = |seed: u64| -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        selector
            .select_moves(&director, &mut rng)
            .iter()
            .map(|m| m.describe())
            .collect()
    };

    let first = describe(7);
    assert_eq!(first, describe(7));
    assert_eq!(first.len(), 16);

    let mut sorted = first.clone();
    sorted.sort();
    let mut original: Vec<String> = row_selector(vec![0, 1, 2, 3])
        .select_moves(&director, &mut StdRng::seed_from_u64(7))
        .iter()
        .map(|m| m.describe())
        .collect();
    original.sort();
    assert_eq!(sorted, original);
}

#[test]
fn test_change_move_selector_skips_pinned_entities() {
    let director = pinned_director();
    let selector = ChangeMoveSelector::new(
        FromSolutionEntitySelector::new(0, entity_count).with_pinning(is_pinned),
        FromSolutionValueSelector::new(scenario::value_range),
        get_value,
        set_value,
        0,
        "value",
    );
    let moves = selector.select_moves(&director, &mut StdRng::seed_from_u64(0));
    assert_eq!(moves.len(), 3);
    assert!(moves.iter().all(|m| m.entity_indices() == [0]));
}

#[test]
fn test_swap_move_selector_generates_unordered_pairs() {
    let director = nqueens_director(&[0, 1, 2]);
    let selector = SwapMoveSelector::new(
        FromSolutionEntitySelector::new(0, queen_count),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    );
    let moves = selector.select_moves(&director, &mut StdRng::seed_from_u64(0));
    let pairs: Vec<&[usize]> = moves.iter().map(|m| m.entity_indices()).collect();
    assert_eq!(pairs, vec![&[0usize, 1][..], &[0, 2][..], &[1, 2][..]]);
}

#[test]
fn test_union_move_selector_concatenates() {
    let director = nqueens_director(&[0, 1]);
    let swaps = SwapMoveSelector::new(
        FromSolutionEntitySelector::new(0, queen_count),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    );
    let union = UnionMoveSelector::new(row_selector(vec![5]), swaps);
    let moves = union.select_moves(&director, &mut StdRng::seed_from_u64(0));
    let descriptions: Vec<String> = moves.iter().map(|m| m.describe()).collect();
    assert_eq!(
        descriptions,
        vec!["row[0] -> 5", "row[1] -> 5", "row[0] <-> row[1]"]
    );
}

