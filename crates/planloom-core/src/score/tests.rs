//! Tests for score types.

use super::*;

mod hard_medium_soft_score;
mod properties;

// ============================================================================
// Shared Behaviour Tests
// ============================================================================

#[test]
fn test_init_score_dominates_levels() {
    let uninitialized = HardSoftScore::of_uninitialized(-1, 100, 100);
    let infeasible = HardSoftScore::of(-100, -100);
    assert!(uninitialized < infeasible);
    assert!(!uninitialized.is_feasible());
    assert!(!uninitialized.is_solution_initialized());
}

#[test]
fn test_with_init_score_keeps_levels() {
    let score = HardMediumSoftScore::of(-1, -2, -3).with_init_score(-4);
    assert_eq!(score.init_score(), -4);
    assert_eq!(score.to_level_numbers(), vec![-1, -2, -3]);
}

#[test]
fn test_level_number_mismatch() {
    let err = LevelNumber::Integer(1)
        .checked_add(LevelNumber::Decimal(rust_decimal::Decimal::ONE))
        .unwrap_err();
    assert_eq!(
        err,
        ScoreArithmeticError::LevelTypeMismatch {
            left: "integer",
            right: "decimal"
        }
    );
}
