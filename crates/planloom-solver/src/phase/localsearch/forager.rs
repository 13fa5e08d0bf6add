//! Foragers for local search move selection
//!
//! Foragers collect the accepted moves of a step and pick the one to
//! commit. Moves are referred to by their index in the step's candidate
//! list.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use rand::rngs::StdRng;
use rand::Rng;

/// Trait for collecting and selecting moves in local search.
///
/// Foragers are responsible for:
/// - Collecting accepted moves during move evaluation
/// - Deciding when to quit evaluating early
/// - Selecting the move to apply
pub trait LocalSearchForager<S: PlanningSolution>: Send + Debug {
    /// Called at the start of each step to reset state.
    fn step_started(&mut self, best_score: &S::Score, last_step_score: &S::Score);

    /// Adds the accepted move at `move_index`.
    fn add_move_index(&mut self, move_index: usize, score: S::Score);

    /// Returns true if the forager has collected enough moves and
    /// wants to stop evaluating more.
    fn is_quit_early(&self) -> bool;

    /// Number of moves accepted in this step so far.
    fn accepted_count(&self) -> usize;

    /// Picks the move to commit.
    ///
    /// Returns None if no moves were accepted.
    fn pick_move_index(&mut self, rng: &mut StdRng) -> Option<(usize, S::Score)>;
}

impl<S: PlanningSolution> LocalSearchForager<S> for Box<dyn LocalSearchForager<S>> {
    fn step_started(&mut self, best_score: &S::Score, last_step_score: &S::Score) {
        (**self).step_started(best_score, last_step_score)
    }

    fn add_move_index(&mut self, move_index: usize, score: S::Score) {
        (**self).add_move_index(move_index, score)
    }

    fn is_quit_early(&self) -> bool {
        (**self).is_quit_early()
    }

    fn accepted_count(&self) -> usize {
        (**self).accepted_count()
    }

    fn pick_move_index(&mut self, rng: &mut StdRng) -> Option<(usize, S::Score)> {
        (**self).pick_move_index(rng)
    }
}

/// A forager that collects a limited number of accepted moves.
///
/// Once the limit is reached, it quits early. It picks the best move
/// among those collected, the first of equal best unless ties are broken
/// randomly.
pub struct AcceptedCountForager<S: PlanningSolution> {
    accepted_count_limit: usize,
    breaking_tie_randomly: bool,
    accepted_moves: Vec<(usize, S::Score)>,
}

impl<S: PlanningSolution> AcceptedCountForager<S> {
    /// Creates a new forager with the given limit.
    ///
    /// # Arguments
    /// * `accepted_count_limit` - Stop after collecting this many accepted moves
    pub fn new(accepted_count_limit: usize) -> Self {
        Self {
            accepted_count_limit,
            breaking_tie_randomly: false,
            accepted_moves: Vec::new(),
        }
    }

    pub fn with_breaking_tie_randomly(mut self, breaking_tie_randomly: bool) -> Self {
        self.breaking_tie_randomly = breaking_tie_randomly;
        self
    }
}

impl<S: PlanningSolution> Clone for AcceptedCountForager<S> {
    fn clone(&self) -> Self {
        Self {
            accepted_count_limit: self.accepted_count_limit,
            breaking_tie_randomly: self.breaking_tie_randomly,
            accepted_moves: Vec::new(),
        }
    }
}

impl<S: PlanningSolution> Debug for AcceptedCountForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceptedCountForager")
            .field("accepted_count_limit", &self.accepted_count_limit)
            .field("breaking_tie_randomly", &self.breaking_tie_randomly)
            .field("accepted_count", &self.accepted_moves.len())
            .finish()
    }
}

impl<S: PlanningSolution> LocalSearchForager<S> for AcceptedCountForager<S> {
    fn step_started(&mut self, _best_score: &S::Score, _last_step_score: &S::Score) {
        self.accepted_moves.clear();
    }

    fn add_move_index(&mut self, move_index: usize, score: S::Score) {
        self.accepted_moves.push((move_index, score));
    }

    fn is_quit_early(&self) -> bool {
        self.accepted_moves.len() >= self.accepted_count_limit
    }

    fn accepted_count(&self) -> usize {
        self.accepted_moves.len()
    }

    fn pick_move_index(&mut self, rng: &mut StdRng) -> Option<(usize, S::Score)> {
        let best_score = self
            .accepted_moves
            .iter()
            .map(|(_, score)| score)
            .fold(None, |best: Option<&S::Score>, score| match best {
                Some(best) if best >= score => Some(best),
                _ => Some(score),
            })?
            .clone();

        let mut ties = self
            .accepted_moves
            .iter()
            .filter(|(_, score)| *score == best_score);
        let picked = if self.breaking_tie_randomly {
            let ties: Vec<_> = ties.collect();
            let index = rng.random_range(0..ties.len());
            ties.get(index).copied()
        } else {
            ties.next()
        };
        picked.cloned()
    }
}

/// A forager that picks the first accepted move.
pub struct FirstAcceptedForager<S: PlanningSolution> {
    accepted_move: Option<(usize, S::Score)>,
}

impl<S: PlanningSolution> FirstAcceptedForager<S> {
    pub fn new() -> Self {
        Self {
            accepted_move: None,
        }
    }
}

impl<S: PlanningSolution> Default for FirstAcceptedForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Clone for FirstAcceptedForager<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for FirstAcceptedForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstAcceptedForager")
            .field("has_move", &self.accepted_move.is_some())
            .finish()
    }
}

impl<S: PlanningSolution> LocalSearchForager<S> for FirstAcceptedForager<S> {
    fn step_started(&mut self, _best_score: &S::Score, _last_step_score: &S::Score) {
        self.accepted_move = None;
    }

    fn add_move_index(&mut self, move_index: usize, score: S::Score) {
        if self.accepted_move.is_none() {
            self.accepted_move = Some((move_index, score));
        }
    }

    fn is_quit_early(&self) -> bool {
        self.accepted_move.is_some()
    }

    fn accepted_count(&self) -> usize {
        usize::from(self.accepted_move.is_some())
    }

    fn pick_move_index(&mut self, _rng: &mut StdRng) -> Option<(usize, S::Score)> {
        self.accepted_move.take()
    }
}

/// A forager that stops at the first move beating the best score and
/// otherwise picks the best accepted move.
pub struct FirstBestScoreImprovingForager<S: PlanningSolution> {
    best_score: Option<S::Score>,
    accepted_count: usize,
    picked: Option<(usize, S::Score)>,
    improving: bool,
}

impl<S: PlanningSolution> FirstBestScoreImprovingForager<S> {
    pub fn new() -> Self {
        Self {
            best_score: None,
            accepted_count: 0,
            picked: None,
            improving: false,
        }
    }
}

impl<S: PlanningSolution> Default for FirstBestScoreImprovingForager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Clone for FirstBestScoreImprovingForager<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for FirstBestScoreImprovingForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstBestScoreImprovingForager")
            .field("accepted_count", &self.accepted_count)
            .field("improving", &self.improving)
            .finish()
    }
}

impl<S: PlanningSolution> LocalSearchForager<S> for FirstBestScoreImprovingForager<S> {
    fn step_started(&mut self, best_score: &S::Score, _last_step_score: &S::Score) {
        self.best_score = Some(best_score.clone());
        self.accepted_count = 0;
        self.picked = None;
        self.improving = false;
    }

    fn add_move_index(&mut self, move_index: usize, score: S::Score) {
        self.accepted_count += 1;
        if self.improving {
            return;
        }
        if self.best_score.as_ref().is_some_and(|best| score > *best) {
            self.improving = true;
            self.picked = Some((move_index, score));
            return;
        }
        let better = match &self.picked {
            None => true,
            Some((_, picked_score)) => score > *picked_score,
        };
        if better {
            self.picked = Some((move_index, score));
        }
    }

    fn is_quit_early(&self) -> bool {
        self.improving
    }

    fn accepted_count(&self) -> usize {
        self.accepted_count
    }

    fn pick_move_index(&mut self, _rng: &mut StdRng) -> Option<(usize, S::Score)> {
        self.picked.take()
    }
}
