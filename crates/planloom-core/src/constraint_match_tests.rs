//! Tests for constraint match accounting

use super::constraint::ConstraintRef;
use super::constraint_match::*;
use super::score::{BendableScore, HardSoftDecimalScore, HardSoftScore, LevelNumber};
use rust_decimal::Decimal;

#[derive(Clone, Debug, PartialEq)]
struct Shift {
    id: u32,
}

// ============================================================================
// EntityRef / ConstraintJustification
// ============================================================================

#[test]
fn test_entity_ref_downcast() {
    let shift = Shift { id: 7 };
    let entity = EntityRef::new(&shift);
    assert_eq!(entity.short_type_name(), "Shift");
    assert_eq!(entity.as_entity::<Shift>(), Some(&shift));
    assert!(entity.as_entity::<u32>().is_none());
}

#[test]
fn test_justification_description() {
    let justification = ConstraintJustification::new(vec![
        EntityRef::with_display(&Shift { id: 1 }, "shift 1".to_string()),
        EntityRef::with_display(&Shift { id: 2 }, "shift 2".to_string()),
    ]);
    assert_eq!(justification.description, "shift 1, shift 2");
    assert_eq!(ConstraintJustification::new(Vec::new()).description, "No entities");
}

// ============================================================================
// ConstraintMatchTotal
// ============================================================================

#[test]
fn test_total_weight_at_score_level() {
    let mut total = ConstraintMatchTotal::new(ConstraintRef::new("pkg", "soft"), 1, HardSoftScore::ZERO);
    total.add_constraint_match(ConstraintJustification::default(), HardSoftScore::of(0, -4));
    assert_eq!(total.constraint_package(), "pkg");
    assert_eq!(total.constraint_name(), "soft");
    assert_eq!(total.constraint_match_count(), 1);
    assert_eq!(total.weight_total(), LevelNumber::Integer(-4));
    assert_eq!(total.constraint_matches()[0].constraint_name(), "soft");
}

#[test]
fn test_total_decimal_weight() {
    let mut total = ConstraintMatchTotal::new(
        ConstraintRef::new("pkg", "cost"),
        1,
        HardSoftDecimalScore::ZERO,
    );
    total.add_constraint_match(
        ConstraintJustification::default(),
        HardSoftDecimalScore::of_scaled(0, -150000),
    );
    assert_eq!(total.weight_total(), LevelNumber::Decimal(Decimal::new(-15, 1)));
}

#[test]
#[should_panic(expected = "Incompatible hard levels")]
fn test_total_rejects_mismatched_levels() {
    let mut total = ConstraintMatchTotal::new(
        ConstraintRef::new("pkg", "c"),
        0,
        BendableScore::zero_with_levels(1, 1),
    );
    total.add_constraint_match(
        ConstraintJustification::default(),
        BendableScore::of(vec![-1, 0], vec![0]),
    );
}

#[test]
fn test_score_level_of_first_non_zero_level() {
    assert_eq!(score_level_of(&HardSoftScore::of(-1, -1)), 0);
    assert_eq!(score_level_of(&HardSoftScore::of(0, -1)), 1);
    assert_eq!(score_level_of(&HardSoftScore::ZERO), 0);
}

// ============================================================================
// ScoreHolder
// ============================================================================

#[test]
fn test_holder_groups_in_insertion_order() {
    let a = ConstraintRef::new("pkg", "a");
    let b = ConstraintRef::new("pkg", "b");
    let mut holder = ScoreHolder::new(HardSoftScore::ZERO, true);

    holder.penalize(&b, HardSoftScore::of_soft(1), ConstraintJustification::default);
    holder.penalize(&a, HardSoftScore::of_hard(2), ConstraintJustification::default);
    holder.reward(&b, HardSoftScore::of_soft(3), ConstraintJustification::default);

    let totals = holder.constraint_match_totals();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].constraint_ref(), &b);
    assert_eq!(totals[0].constraint_match_count(), 2);
    assert_eq!(totals[0].weight_total(), LevelNumber::Integer(2));
    assert_eq!(totals[1].constraint_ref(), &a);
    assert_eq!(holder.extract_score(0), HardSoftScore::of(-2, 2));
}

#[test]
fn test_holder_disabled_skips_justification() {
    let c = ConstraintRef::new("pkg", "c");
    let mut holder = ScoreHolder::new(HardSoftScore::ZERO, false);
    holder.penalize(&c, HardSoftScore::of_hard(1), || {
        panic!("justification built while matching disabled")
    });
    assert!(holder.constraint_match_totals().is_empty());
    assert_eq!(holder.extract_score(-1), HardSoftScore::of_uninitialized(-1, -1, 0));
}

#[test]
fn test_holder_registered_constraint_without_matches() {
    let c = ConstraintRef::new("pkg", "unused");
    let mut holder = ScoreHolder::new(HardSoftScore::ZERO, true);
    holder.register_constraint(&c, 1);
    holder.register_constraint(&c, 1);
    let totals = holder.into_constraint_match_totals();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].score_level(), 1);
    assert_eq!(totals[0].constraint_match_count(), 0);
    assert_eq!(totals[0].weight_total(), LevelNumber::Integer(0));
}
