//! Selectors for entities, values and moves.
//!
//! Selectors produce the candidates a phase evaluates in one step. They
//! read the working solution through the score director and never
//! modify it.

mod entity;
mod move_selector;
mod selection_order;
mod value;

#[cfg(test)]
mod tests;

pub use entity::{EntityReference, EntitySelector, FromSolutionEntitySelector};
pub use move_selector::{ChangeMoveSelector, MoveSelector, SwapMoveSelector, UnionMoveSelector};
pub use selection_order::SelectionOrder;
pub use value::{FromSolutionValueSelector, StaticValueSelector, ValueSelector};
