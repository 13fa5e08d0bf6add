//! N-Queens problem test fixtures.
//!
//! Places N queens on an N×N board so that no two queens share a row or a
//! diagonal. Each queen owns a fixed column and a planning variable `row`.
//!
//! # Example
//!
//! ```
//! use planloom_test::nqueens::{calculate_conflicts, NQueensSolution};
//! use planloom_core::SimpleScore;
//!
//! let solution = NQueensSolution::with_rows(&[0, 2, 1, 3]);
//! assert_eq!(calculate_conflicts(&solution), SimpleScore::of(-2));
//! ```

use planloom_core::{
    ConstraintJustification, ConstraintRef, EntityRef, PlanningEntity, PlanningSolution,
    ScoreHolder, SimpleScore,
};

/// Constraint package used by the N-Queens constraint match calculator.
pub const NQUEENS_PACKAGE: &str = "nqueens";

/// A queen entity in the N-Queens problem.
#[derive(Clone, Debug, PartialEq)]
pub struct Queen {
    pub id: i64,
    pub column: i64,
    pub row: Option<i64>,
}

impl Queen {
    pub fn new(id: i64, column: i64, row: Option<i64>) -> Self {
        Self { id, column, row }
    }

    pub fn assigned(id: i64, column: i64, row: i64) -> Self {
        Self::new(id, column, Some(row))
    }

    pub fn unassigned(id: i64, column: i64) -> Self {
        Self::new(id, column, None)
    }
}

impl PlanningEntity for Queen {}

/// N-Queens problem solution.
#[derive(Clone, Debug)]
pub struct NQueensSolution {
    pub n: usize,
    pub queens: Vec<Queen>,
    pub score: Option<SimpleScore>,
}

impl NQueensSolution {
    pub fn new(queens: Vec<Queen>) -> Self {
        Self {
            n: queens.len(),
            queens,
            score: None,
        }
    }

    /// Creates n queens in columns 0..n with no row assigned.
    pub fn uninitialized(n: usize) -> Self {
        Self::new(
            (0..n)
                .map(|i| Queen::unassigned(i as i64, i as i64))
                .collect(),
        )
    }

    /// Creates queens in columns 0..n at the given rows.
    pub fn with_rows(rows: &[i64]) -> Self {
        Self::new(
            rows.iter()
                .enumerate()
                .map(|(i, &row)| Queen::assigned(i as i64, i as i64, row))
                .collect(),
        )
    }

    pub fn with_optional_rows(rows: &[Option<i64>]) -> Self {
        Self::new(
            rows.iter()
                .enumerate()
                .map(|(i, &row)| Queen::new(i as i64, i as i64, row))
                .collect(),
        )
    }

    /// Row values available to every queen.
    pub fn row_range(&self) -> Vec<i64> {
        (0..self.n as i64).collect()
    }

    pub fn rows(&self) -> Vec<Option<i64>> {
        self.queens.iter().map(|q| q.row).collect()
    }
}

impl PlanningSolution for NQueensSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn uninitialized_entity_count(&self) -> usize {
        self.queens.iter().filter(|q| q.row.is_none()).count()
    }
}

pub fn queen_count(s: &NQueensSolution) -> usize {
    s.queens.len()
}

/// Typed getter for the `row` planning variable.
pub fn get_queen_row(s: &NQueensSolution, idx: usize) -> Option<i64> {
    s.queens.get(idx).and_then(|q| q.row)
}

/// Typed setter for the `row` planning variable.
pub fn set_queen_row(s: &mut NQueensSolution, idx: usize, v: Option<i64>) {
    if let Some(queen) = s.queens.get_mut(idx) {
        queen.row = v;
    }
}

pub fn row_range(s: &NQueensSolution) -> Vec<i64> {
    s.row_range()
}

/// Whether two placed queens attack each other along a row.
pub fn is_row_conflict(a: &Queen, b: &Queen) -> bool {
    matches!((a.row, b.row), (Some(x), Some(y)) if x == y)
}

/// Whether two placed queens attack each other along a diagonal.
pub fn is_diagonal_conflict(a: &Queen, b: &Queen) -> bool {
    match (a.row, b.row) {
        (Some(x), Some(y)) => (x - y).abs() == (a.column - b.column).abs(),
        _ => false,
    }
}

/// Counts row and diagonal conflicts between all pairs of placed queens.
///
/// Returns a non-positive score where 0 means no conflicts.
pub fn calculate_conflicts(solution: &NQueensSolution) -> SimpleScore {
    let mut conflicts = 0i64;
    let queens = &solution.queens;

    for i in 0..queens.len() {
        for j in (i + 1)..queens.len() {
            if is_row_conflict(&queens[i], &queens[j]) {
                conflicts += 1;
            }
            if is_diagonal_conflict(&queens[i], &queens[j]) {
                conflicts += 1;
            }
        }
    }

    SimpleScore::of(-conflicts)
}

pub fn row_conflict_ref() -> ConstraintRef {
    ConstraintRef::new(NQUEENS_PACKAGE, "Row conflict")
}

pub fn diagonal_conflict_ref() -> ConstraintRef {
    ConstraintRef::new(NQUEENS_PACKAGE, "Diagonal conflict")
}

/// Same score as [`calculate_conflicts`], reported match by match.
pub fn calculate_conflict_matches(
    solution: &NQueensSolution,
    holder: &mut ScoreHolder<SimpleScore>,
) {
    let row_conflict = row_conflict_ref();
    let diagonal_conflict = diagonal_conflict_ref();
    holder.register_constraint(&row_conflict, 0);
    holder.register_constraint(&diagonal_conflict, 0);

    let queens = &solution.queens;
    for i in 0..queens.len() {
        for j in (i + 1)..queens.len() {
            let (a, b) = (&queens[i], &queens[j]);
            let justify = || {
                ConstraintJustification::new(vec![EntityRef::new(a), EntityRef::new(b)])
            };
            if is_row_conflict(a, b) {
                holder.penalize(&row_conflict, SimpleScore::ONE, justify);
            }
            if is_diagonal_conflict(a, b) {
                holder.penalize(&diagonal_conflict, SimpleScore::ONE, justify);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicts_of_solved_board() {
        let solution = NQueensSolution::with_rows(&[1, 3, 0, 2]);
        assert_eq!(calculate_conflicts(&solution), SimpleScore::of(0));
    }

    #[test]
    fn test_conflicts_ignore_unassigned_queens() {
        let solution = NQueensSolution::with_optional_rows(&[Some(0), None, Some(0)]);
        assert_eq!(calculate_conflicts(&solution), SimpleScore::of(-1));
        assert_eq!(solution.uninitialized_entity_count(), 1);
        assert_eq!(solution.init_score(), -1);
    }

    #[test]
    fn test_conflict_matches_agree_with_score() {
        let solution = NQueensSolution::with_rows(&[0, 0, 0, 0]);
        let mut holder = ScoreHolder::new(SimpleScore::ZERO, true);
        calculate_conflict_matches(&solution, &mut holder);

        assert_eq!(holder.extract_score(0), calculate_conflicts(&solution));
        let totals = holder.constraint_match_totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].constraint_name(), "Row conflict");
        assert_eq!(totals[0].constraint_match_count(), 6);
        assert_eq!(totals[1].constraint_name(), "Diagonal conflict");
        assert_eq!(totals[1].constraint_match_count(), 0);
    }

    #[test]
    fn test_typed_accessors() {
        let mut solution = NQueensSolution::uninitialized(3);
        set_queen_row(&mut solution, 1, Some(2));
        assert_eq!(get_queen_row(&solution, 1), Some(2));
        assert_eq!(get_queen_row(&solution, 0), None);
        assert_eq!(get_queen_row(&solution, 9), None);
        assert_eq!(queen_count(&solution), 3);
        assert_eq!(row_range(&solution), vec![0, 1, 2]);
    }
}
