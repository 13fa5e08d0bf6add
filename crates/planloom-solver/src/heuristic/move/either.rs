//! EitherMove - one of two move types.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;

use super::Move;

/// A move produced by one of two selectors of a `UnionMoveSelector`.
#[derive(Clone, Debug, PartialEq)]
pub enum EitherMove<A, B> {
    Left(A),
    Right(B),
}

impl<S, A, B> Move<S> for EitherMove<A, B>
where
    S: PlanningSolution,
    A: Move<S>,
    B: Move<S>,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        match self {
            EitherMove::Left(m) => m.is_doable(score_director),
            EitherMove::Right(m) => m.is_doable(score_director),
        }
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        match self {
            EitherMove::Left(m) => m.do_move(score_director),
            EitherMove::Right(m) => m.do_move(score_director),
        }
    }

    fn descriptor_index(&self) -> usize {
        match self {
            EitherMove::Left(m) => m.descriptor_index(),
            EitherMove::Right(m) => m.descriptor_index(),
        }
    }

    fn entity_indices(&self) -> &[usize] {
        match self {
            EitherMove::Left(m) => m.entity_indices(),
            EitherMove::Right(m) => m.entity_indices(),
        }
    }

    fn variable_name(&self) -> &str {
        match self {
            EitherMove::Left(m) => m.variable_name(),
            EitherMove::Right(m) => m.variable_name(),
        }
    }

    fn describe(&self) -> String {
        match self {
            EitherMove::Left(m) => m.describe(),
            EitherMove::Right(m) => m.describe(),
        }
    }
}
