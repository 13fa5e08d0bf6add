//! planloom solver engine
//!
//! This crate provides the solving loop:
//! - Solver and its phase lifecycle listeners
//! - Phases (construction heuristic, local search)
//! - Move and selector system
//! - Termination conditions
//! - Score corruption detection for asserted environment modes
//! - Configuration wiring (builder module)

mod assertion;

pub mod builder;
pub mod error;
pub mod heuristic;
pub mod listener;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod statistics;
pub mod termination;

pub use builder::{build_solver, AcceptorBuilder, ForagerBuilder, TerminationBuilder};
pub use error::{Result, SolverError};
pub use heuristic::{
    ChangeMove, ChangeMoveSelector, EitherMove, EntityReference, EntitySelector,
    FromSolutionEntitySelector, FromSolutionValueSelector, Move, MoveSelector, SelectionOrder,
    StaticValueSelector, SwapMove, SwapMoveSelector, UnionMoveSelector, ValueSelector,
};
pub use listener::{ListenerHandle, PhaseLifecycleListener};
pub use phase::construction::{
    BestFitForager, ConstructionForager, ConstructionHeuristicPhase, EntityPlacer,
    FirstFeasibleForager, FirstFitForager, FirstNonDeterioratingScoreForager,
    OptimisticBoundForager, Placement, QueuedEntityPlacer,
};
pub use phase::localsearch::{
    AcceptedCountForager, Acceptor, EntityTabuAcceptor, FirstAcceptedForager,
    FirstBestScoreImprovingForager, HillClimbingAcceptor, LateAcceptanceAcceptor,
    LocalSearchForager, LocalSearchPhase, MoveScope, SimulatedAnnealingAcceptor,
};
pub use phase::Phase;
pub use scope::{
    ConstructionHeuristicStepScope, LocalSearchStepScope, PhaseKind, PhaseScope, SolverScope,
    StepScope,
};
pub use solver::{SolveResult, Solver};
pub use statistics::{PhaseStatistics, ScoreImprovement, SolverStatistics, StatisticsCollector};
pub use termination::{
    AndTermination, BestScoreFeasibleTermination, BestScoreTermination, ExternalTermination,
    OrTermination, StepCountTermination, Termination, TimeTermination,
    UnimprovedStepCountTermination, UnimprovedTimeTermination,
};
