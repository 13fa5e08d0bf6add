//! Property tests for the score algebra.

use crate::score::*;
use proptest::prelude::*;

prop_compose! {
    fn arb_simple()(init in -5i64..=0, score in any::<i64>()) -> SimpleScore {
        SimpleScore::of_uninitialized(init, score)
    }
}

prop_compose! {
    fn arb_hard_medium_soft()(init in -5i64..=0, hard in -1_000_000i64..1_000_000, medium in -1_000_000i64..1_000_000, soft in -1_000_000i64..1_000_000) -> HardMediumSoftScore {
        HardMediumSoftScore::of_uninitialized(init, hard, medium, soft)
    }
}

prop_compose! {
    fn arb_hard_soft()(init in -5i64..=0, hard in -1_000_000i64..1_000_000, soft in -1_000_000i64..1_000_000) -> HardSoftScore {
        HardSoftScore::of_uninitialized(init, hard, soft)
    }
}

prop_compose! {
    fn arb_decimal()(init in -5i64..=0, hard in -1_000_000_000i64..1_000_000_000, soft in -1_000_000_000i64..1_000_000_000) -> HardSoftDecimalScore {
        HardSoftDecimalScore::of_uninitialized_scaled(init, hard, soft)
    }
}

prop_compose! {
    fn arb_bendable()(init in -5i64..=0, hard in prop::collection::vec(-1000i64..1000, 2), soft in prop::collection::vec(-1000i64..1000, 3)) -> BendableScore {
        BendableScore::of_uninitialized(init, hard, soft)
    }
}

fn arb_trend_level() -> impl Strategy<Value = InitializingScoreTrendLevel> {
    prop_oneof![
        Just(InitializingScoreTrendLevel::Any),
        Just(InitializingScoreTrendLevel::OnlyUp),
        Just(InitializingScoreTrendLevel::OnlyDown),
    ]
}

proptest! {
    #[test]
    fn prop_add_then_subtract_is_identity(a in arb_hard_soft(), b in arb_hard_soft()) {
        prop_assert_eq!((a + b) - b, a);
    }

    #[test]
    fn prop_order_is_total_and_antisymmetric(a in arb_hard_soft(), b in arb_hard_soft()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, a.cmp(&b) == std::cmp::Ordering::Equal);
    }

    #[test]
    fn prop_init_score_compared_first(a in arb_hard_soft(), b in arb_hard_soft()) {
        if a.init_score() < b.init_score() {
            prop_assert!(a < b);
        }
    }

    #[test]
    fn prop_hard_soft_round_trip(a in arb_hard_soft()) {
        prop_assert_eq!(HardSoftScore::parse(&a.to_string()).unwrap(), a);
    }

    #[test]
    fn prop_decimal_round_trip(a in arb_decimal()) {
        prop_assert_eq!(HardSoftDecimalScore::parse(&a.to_string()).unwrap(), a);
    }

    #[test]
    fn prop_bendable_round_trip(a in arb_bendable()) {
        prop_assert_eq!(BendableScore::parse(&a.to_string()).unwrap(), a.clone());
        prop_assert_eq!(a.checked_add(&a).unwrap().checked_sub(&a).unwrap(), a);
    }

    #[test]
    fn prop_simple_round_trip(a in arb_simple()) {
        prop_assert_eq!(SimpleScore::parse(&a.to_string()).unwrap(), a);
    }

    #[test]
    fn prop_hard_medium_soft_round_trip(a in arb_hard_medium_soft()) {
        prop_assert_eq!(HardMediumSoftScore::parse(&a.to_string()).unwrap(), a);
    }

    #[test]
    fn prop_hard_medium_soft_add_then_subtract_is_identity(a in arb_hard_medium_soft(), b in arb_hard_medium_soft()) {
        prop_assert_eq!((a + b) - b, a);
    }

    #[test]
    fn prop_bendable_add_then_subtract_is_identity(a in arb_bendable(), b in arb_bendable()) {
        prop_assert_eq!((a.clone() + b.clone()) - b, a);
    }

    #[test]
    fn prop_bendable_order_is_total_and_antisymmetric(a in arb_bendable(), b in arb_bendable()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, a.cmp(&b) == std::cmp::Ordering::Equal);
        if a.init_score() < b.init_score() {
            prop_assert!(a < b);
        }
    }

    #[test]
    fn prop_scale_by_one_is_identity(a in arb_simple()) {
        prop_assert_eq!(a.multiply(1.0), a);
        prop_assert_eq!(a.divide(1.0).unwrap(), a);
    }

    #[test]
    fn prop_uninitialized_never_feasible(a in arb_hard_soft()) {
        if a.init_score() < 0 {
            prop_assert!(!a.is_feasible());
            prop_assert!(!HardSoftScoreDefinition.is_feasible(&a));
        }
    }

    #[test]
    fn prop_bounds_respect_trend(a in arb_hard_soft(), levels in prop::collection::vec(arb_trend_level(), 2)) {
        let trend = InitializingScoreTrend::new(levels.clone());
        let optimistic = HardSoftScoreDefinition.build_optimistic_bound(&trend, &a).unwrap();
        let pessimistic = HardSoftScoreDefinition.build_pessimistic_bound(&trend, &a).unwrap();
        let current = a.to_level_numbers();
        for (i, level) in levels.iter().enumerate() {
            match level {
                InitializingScoreTrendLevel::OnlyDown => {
                    prop_assert!(optimistic.to_level_numbers()[i] <= current[i]);
                }
                InitializingScoreTrendLevel::OnlyUp => {
                    prop_assert!(pessimistic.to_level_numbers()[i] >= current[i]);
                }
                InitializingScoreTrendLevel::Any => {}
            }
        }
        prop_assert!(optimistic >= pessimistic);
    }
}
