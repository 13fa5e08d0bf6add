//! Score corruption assertion.

use std::fmt::Write;

use planloom_core::domain::PlanningSolution;
use planloom_core::score::{LevelNumber, Score};
use planloom_scoring::ScoreDirector;

use crate::error::{Result, SolverError};

/// Fails with [`SolverError::ScoreCorruption`] when `working` and
/// `from_scratch` differ by more than `tolerance` on any level.
///
/// A differing init score is always corruption.
pub(crate) fn assert_score_not_corrupted<S, D>(
    working: &S::Score,
    from_scratch: &S::Score,
    tolerance: f64,
    move_description: impl FnOnce() -> String,
    score_director: &D,
) -> Result<()>
where
    S: PlanningSolution,
    D: ScoreDirector<S> + ?Sized,
{
    if working == from_scratch {
        return Ok(());
    }

    let levels_differing = levels_differing(working, from_scratch, tolerance);
    if levels_differing.is_empty() && working.init_score() == from_scratch.init_score() {
        return Ok(());
    }

    Err(SolverError::ScoreCorruption {
        working: working.to_string(),
        from_scratch: from_scratch.to_string(),
        move_description: move_description(),
        levels_differing,
        constraint_context: constraint_context(score_director),
    })
}

fn levels_differing<Sc: Score>(working: &Sc, from_scratch: &Sc, tolerance: f64) -> Vec<usize> {
    working
        .to_level_values()
        .iter()
        .zip(from_scratch.to_level_values().iter())
        .enumerate()
        .filter(|(_, (w, f))| exceeds_tolerance(w, f, tolerance))
        .map(|(level, _)| level)
        .collect()
}

/// Equal levels never exceed; unequal levels compare their exact distance.
fn exceeds_tolerance(working: &LevelNumber, from_scratch: &LevelNumber, tolerance: f64) -> bool {
    if working == from_scratch {
        return false;
    }
    if tolerance <= 0.0 {
        return true;
    }
    match (working, from_scratch) {
        (LevelNumber::Integer(w), LevelNumber::Integer(f)) => {
            (i128::from(*w) - i128::from(*f)).unsigned_abs() as f64 > tolerance
        }
        (LevelNumber::Decimal(w), LevelNumber::Decimal(f)) => w.checked_sub(*f).map_or(true, |d| {
            LevelNumber::Decimal(d.abs()).to_f64() > tolerance
        }),
        _ => true,
    }
}

fn constraint_context<S, D>(score_director: &D) -> String
where
    S: PlanningSolution,
    D: ScoreDirector<S> + ?Sized,
{
    if !score_director.is_constraint_match_enabled() {
        return String::new();
    }
    let mut context = String::from("\n  Constraint match totals of the working solution:");
    for total in score_director.constraint_match_totals() {
        // Writing to a String cannot fail.
        let _ = write!(
            context,
            "\n    {} (level {}): {} matches, weight {}",
            total.constraint_ref().full_name(),
            total.score_level(),
            total.constraint_match_count(),
            total.weight_total()
        );
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use planloom_core::{ConstraintRef, HardSoftDecimalScore, HardSoftScore, SimpleScore};
    use planloom_scoring::{ConstraintMatchScoreDirector, SimpleScoreDirector};
    use planloom_core::SimpleScoreDefinition;
    use planloom_test::nqueens::{calculate_conflict_matches, calculate_conflicts};
    use planloom_test::NQueensSolution;

    fn simple_director() -> impl ScoreDirector<NQueensSolution> {
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 1]), calculate_conflicts)
    }

    #[test]
    fn test_equal_scores_pass() {
        let director = simple_director();
        let score = SimpleScore::of(-3);
        assert!(assert_score_not_corrupted(&score, &score, 0.0, || unreachable!(), &director).is_ok());
    }

    #[test]
    fn test_difference_within_tolerance_passes() {
        let director = simple_director();
        let result = assert_score_not_corrupted(
            &SimpleScore::of(-3),
            &SimpleScore::of(-4),
            1.0,
            || "row[0] -> 1".to_string(),
            &director,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_difference_beyond_tolerance_names_move_and_levels() {
        let director = simple_director();
        let err = assert_score_not_corrupted(
            &SimpleScore::of(-3),
            &SimpleScore::of(-5),
            1.0,
            || "row[0] -> 1".to_string(),
            &director,
        )
        .unwrap_err();

        match err {
            SolverError::ScoreCorruption {
                working,
                from_scratch,
                move_description,
                levels_differing,
                constraint_context,
            } => {
                assert_eq!(working, "-3");
                assert_eq!(from_scratch, "-5");
                assert_eq!(move_description, "row[0] -> 1");
                assert_eq!(levels_differing, vec![0]);
                assert!(constraint_context.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_levels_differing_reports_each_level() {
        let levels = levels_differing(
            &HardSoftScore::of(-1, -10),
            &HardSoftScore::of(0, -10),
            0.0,
        );
        assert_eq!(levels, vec![0]);
    }

    #[test]
    fn test_difference_below_f64_resolution_is_corruption() {
        let director = simple_director();
        let result = assert_score_not_corrupted(
            &SimpleScore::of(9_007_199_254_740_993),
            &SimpleScore::of(9_007_199_254_740_992),
            0.0,
            || "row[0] -> 1".to_string(),
            &director,
        );
        assert!(matches!(
            result,
            Err(SolverError::ScoreCorruption { ref levels_differing, .. }) if levels_differing == &vec![0]
        ));
    }

    #[test]
    fn test_decimal_levels_compare_exactly() {
        let working = HardSoftDecimalScore::of_scaled(-100_001, 0);
        let from_scratch = HardSoftDecimalScore::of_scaled(-100_000, 0);
        assert_eq!(levels_differing(&working, &from_scratch, 0.0), vec![0]);
        assert!(levels_differing(&working, &from_scratch, 0.001).is_empty());
    }

    #[test]
    fn test_init_score_difference_is_corruption() {
        let director = simple_director();
        let result = assert_score_not_corrupted(
            &SimpleScore::of_uninitialized(-1, 0),
            &SimpleScore::of(0),
            10.0,
            || "row[1] -> null".to_string(),
            &director,
        );
        assert!(matches!(result, Err(SolverError::ScoreCorruption { .. })));
    }

    #[test]
    fn test_constraint_context_lists_totals() {
        let mut director = ConstraintMatchScoreDirector::new(
            NQueensSolution::with_rows(&[0, 0, 0]),
            SimpleScoreDefinition,
            calculate_conflict_matches,
        );
        director.set_constraint_match_enabled_preference(true);
        let score = director.calculate_score();

        let err = assert_score_not_corrupted(
            &score,
            &SimpleScore::of(0),
            0.0,
            || "row[2] -> 0".to_string(),
            &director,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains(&ConstraintRef::new("nqueens", "Row conflict").full_name()));
        assert!(message.contains("3 matches"));
    }
}
