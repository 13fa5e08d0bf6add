//! Core domain traits

use crate::score::Score;

/// Marker trait for planning solutions.
///
/// A planning solution represents both the problem definition and the
/// (potentially partial) solution. It contains:
/// - Problem facts: Immutable input data
/// - Planning entities: Things to be optimized
/// - Score: The quality of the current solution
///
/// # Example
///
/// ```
/// use planloom_core::{PlanningSolution, SimpleScore};
///
/// #[derive(Clone)]
/// struct NQueens {
///     rows: Vec<Option<usize>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for NQueens {
///     type Score = SimpleScore;
///
///     fn score(&self) -> Option<Self::Score> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<Self::Score>) {
///         self.score = score;
///     }
///
///     fn uninitialized_entity_count(&self) -> usize {
///         self.rows.iter().filter(|r| r.is_none()).count()
///     }
/// }
///
/// let solution = NQueens { rows: vec![Some(0), None], score: None };
/// assert!(!solution.is_initialized());
/// assert_eq!(solution.init_score(), -1);
/// ```
///
/// # Thread Safety
///
/// Planning solutions must be `Send + Sync` so a solve can run on a worker thread.
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the current score of this solution, if calculated.
    ///
    /// Returns `None` if the solution has not been scored yet.
    fn score(&self) -> Option<Self::Score>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Self::Score>);

    /// Returns the number of planning entities with an unassigned variable.
    fn uninitialized_entity_count(&self) -> usize {
        0
    }

    /// Returns the init score matching [`PlanningSolution::uninitialized_entity_count`].
    fn init_score(&self) -> i64 {
        -(self.uninitialized_entity_count() as i64)
    }

    /// Returns true if this solution is fully initialized.
    fn is_initialized(&self) -> bool {
        self.uninitialized_entity_count() == 0
    }
}

/// Marker trait for planning entities.
///
/// A planning entity is something that gets planned/optimized.
/// It contains one or more planning variables that the solver will change.
///
/// # Pinning
///
/// Entities can be "pinned" to prevent the solver from changing them.
/// Override `is_pinned()` to return true for pinned entities.
///
/// # Reinitialization
///
/// An entity that already has a value can ask the construction heuristic
/// to clear and place it again by overriding `is_reinitialize_requested()`.
pub trait PlanningEntity: Clone + Send + Sync + 'static {
    /// Returns true if this entity is pinned (should not be changed).
    fn is_pinned(&self) -> bool {
        false
    }

    /// Returns true if this entity should be placed again by the construction heuristic.
    fn is_reinitialize_requested(&self) -> bool {
        false
    }
}
