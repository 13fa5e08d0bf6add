//! Local search phase
//!
//! Improves an initialized solution step by step. Every step commits
//! one accepted move, even one that makes the score worse; the best
//! solution is only replaced on strict improvement.

mod acceptor;
mod forager;
mod phase;

#[cfg(test)]
mod tests;

pub use acceptor::{
    Acceptor, EntityTabuAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor, MoveScope,
    SimulatedAnnealingAcceptor,
};
pub use forager::{
    AcceptedCountForager, FirstAcceptedForager, FirstBestScoreImprovingForager,
    LocalSearchForager,
};
pub use phase::LocalSearchPhase;
