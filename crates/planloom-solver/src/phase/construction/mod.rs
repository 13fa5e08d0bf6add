//! Construction heuristic phase
//!
//! Visits every eligible entity once, in order, and assigns the value
//! picked by a [`ConstructionForager`]. Entities that get no value stay
//! unassigned and keep counting against the init score.

mod forager;
mod phase;
mod placer;

#[cfg(test)]
mod tests;

pub use forager::{
    BestFitForager, ConstructionForager, FirstFeasibleForager, FirstFitForager,
    FirstNonDeterioratingScoreForager, OptimisticBoundForager,
};
pub use phase::ConstructionHeuristicPhase;
pub use placer::{EntityPlacer, Placement, QueuedEntityPlacer};
