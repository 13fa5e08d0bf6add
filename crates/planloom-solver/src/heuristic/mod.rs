//! Moves and the selectors that generate them.

pub mod r#move;
pub mod selector;

pub use r#move::{ChangeMove, EitherMove, Move, SwapMove};
pub use selector::{
    ChangeMoveSelector, EntityReference, EntitySelector, FromSolutionEntitySelector,
    FromSolutionValueSelector, MoveSelector, SelectionOrder, StaticValueSelector,
    SwapMoveSelector, UnionMoveSelector, ValueSelector,
};
