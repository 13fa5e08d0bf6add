//! Move types.
//!
//! A move changes one or more planning variables through a score director.
//! Undo is handled by `RecordingScoreDirector`: every move registers a
//! typed undo closure for each variable it changes.

mod change;
mod either;
mod swap;
mod traits;

#[cfg(test)]
mod tests;

pub use change::ChangeMove;
pub use either::EitherMove;
pub use swap::SwapMove;
pub use traits::Move;
