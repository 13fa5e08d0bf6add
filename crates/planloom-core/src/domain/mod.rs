//! Domain model traits for planning problems.

mod traits;

#[cfg(test)]
mod tests;

pub use traits::{PlanningEntity, PlanningSolution};
