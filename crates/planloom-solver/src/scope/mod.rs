//! Scopes for solver, phase and step state.
//!
//! A [`SolverScope`] lives for one solve, a [`PhaseScope`] for one phase
//! and a [`StepScope`] for the notification of one finished step.
//! Listeners receive them read-only.

mod phase;
mod solver;
mod step;


pub use phase::{PhaseKind, PhaseScope};
pub use solver::SolverScope;
pub use step::{ConstructionHeuristicStepScope, LocalSearchStepScope, StepScope};
