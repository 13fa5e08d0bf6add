//! Builder module for constructing solver components from configuration
//!
//! This module provides the wiring between configuration types and the
//! solver implementation. Domain specific parts (the entity placer and the
//! move selector) are supplied by the caller and cloned into every phase
//! that needs them.

use planloom_config::{
    AcceptorConfig, ConfigError, ConstructionHeuristicType, ForagerConfig, PhaseConfig,
    PickEarlyType, ScoreDirectorConfig, SolverConfig, TerminationComposition, TerminationConfig,
};
use planloom_core::domain::PlanningSolution;
use planloom_core::score::ScoreDefinition;
use planloom_scoring::ScoreDirector;
use tracing::warn;

use crate::error::Result;
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;
use crate::phase::construction::{
    BestFitForager, ConstructionForager, ConstructionHeuristicPhase, EntityPlacer,
    FirstFeasibleForager, FirstFitForager, FirstNonDeterioratingScoreForager,
    OptimisticBoundForager,
};
use crate::phase::localsearch::{
    AcceptedCountForager, Acceptor, EntityTabuAcceptor, FirstAcceptedForager,
    FirstBestScoreImprovingForager, HillClimbingAcceptor, LateAcceptanceAcceptor,
    LocalSearchForager, LocalSearchPhase, SimulatedAnnealingAcceptor,
};
use crate::phase::Phase;
use crate::solver::Solver;
use crate::termination::{
    AndTermination, BestScoreFeasibleTermination, BestScoreTermination, OrTermination,
    StepCountTermination, Termination, TimeTermination, UnimprovedStepCountTermination,
    UnimprovedTimeTermination,
};

const DEFAULT_ENTITY_TABU_SIZE: usize = 7;
const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;
const DEFAULT_DECAY_RATE: f64 = 0.99;
const DEFAULT_ACCEPTED_COUNT_LIMIT: usize = 1;

/// Builder for constructing terminations from configuration.
pub struct TerminationBuilder;

impl TerminationBuilder {
    /// Builds the termination described by `config`, `None` when it sets
    /// no limit.
    pub fn build<S, D, Def>(
        config: &TerminationConfig,
        definition: &Def,
    ) -> Result<Option<Box<dyn Termination<S, D>>>>
    where
        S: PlanningSolution,
        D: ScoreDirector<S> + 'static,
        Def: ScoreDefinition<Score = S::Score>,
    {
        let mut terminations: Vec<Box<dyn Termination<S, D>>> = Vec::new();

        if let Some(limit) = config.time_limit() {
            terminations.push(Box::new(TimeTermination::new(limit)));
        }
        if let Some(limit) = config.best_score_limit(definition)? {
            terminations.push(Box::new(BestScoreTermination::new(limit)));
        }
        if config.best_score_feasible.unwrap_or(false) {
            terminations.push(Box::new(BestScoreFeasibleTermination::new()));
        }
        if let Some(limit) = config.step_count_limit {
            terminations.push(Box::new(StepCountTermination::new(limit)));
        }
        if let Some(limit) = config.unimproved_step_count_limit {
            terminations.push(Box::new(UnimprovedStepCountTermination::new(limit)));
        }
        if let Some(limit) = config.unimproved_time_limit() {
            terminations.push(Box::new(UnimprovedTimeTermination::new(limit)));
        }

        if terminations.len() <= 1 {
            return Ok(terminations.pop());
        }
        Ok(Some(match config.termination_composition {
            TerminationComposition::Or => Box::new(OrTermination::new(terminations)),
            TerminationComposition::And => Box::new(AndTermination::new(terminations)),
        }))
    }
}

/// Builder for constructing acceptors from configuration.
pub struct AcceptorBuilder;

impl AcceptorBuilder {
    /// Builds an acceptor; without configuration, late acceptance.
    pub fn build<S, Def>(
        config: Option<&AcceptorConfig>,
        definition: &Def,
    ) -> Result<Box<dyn Acceptor<S>>>
    where
        S: PlanningSolution,
        Def: ScoreDefinition<Score = S::Score>,
    {
        let acceptor: Box<dyn Acceptor<S>> = match config {
            None => Box::new(LateAcceptanceAcceptor::<S>::try_new(
                DEFAULT_LATE_ACCEPTANCE_SIZE,
            )?),

            Some(AcceptorConfig::HillClimbing) => Box::new(HillClimbingAcceptor::new()),

            Some(AcceptorConfig::EntityTabu(tabu_config)) => Box::new(EntityTabuAcceptor::try_new(
                tabu_config.entity_tabu_size.unwrap_or(DEFAULT_ENTITY_TABU_SIZE),
            )?),

            Some(AcceptorConfig::SimulatedAnnealing(sa_config)) => {
                let text = sa_config.starting_temperature.as_deref().ok_or_else(|| {
                    ConfigError::Invalid(
                        "simulated annealing requires a starting_temperature".to_string(),
                    )
                })?;
                let starting_temperature = definition.parse_score(text)?;
                Box::new(SimulatedAnnealingAcceptor::<S>::new(
                    starting_temperature,
                    sa_config.decay_rate.unwrap_or(DEFAULT_DECAY_RATE),
                ))
            }

            Some(AcceptorConfig::LateAcceptance(la_config)) => Box::new(
                LateAcceptanceAcceptor::<S>::try_new(
                    la_config
                        .late_acceptance_size
                        .unwrap_or(DEFAULT_LATE_ACCEPTANCE_SIZE),
                )?,
            ),
        };
        Ok(acceptor)
    }
}

/// Builder for constructing foragers from configuration.
pub struct ForagerBuilder;

impl ForagerBuilder {
    /// Builds a local search forager; without configuration, the best of
    /// one accepted move.
    pub fn local_search<S: PlanningSolution>(
        config: Option<&ForagerConfig>,
    ) -> Box<dyn LocalSearchForager<S>> {
        let Some(config) = config else {
            return Box::new(AcceptedCountForager::<S>::new(DEFAULT_ACCEPTED_COUNT_LIMIT));
        };
        match config.pick_early_type {
            PickEarlyType::Never => Box::new(
                AcceptedCountForager::<S>::new(
                    config
                        .accepted_count_limit
                        .unwrap_or(DEFAULT_ACCEPTED_COUNT_LIMIT),
                )
                .with_breaking_tie_randomly(config.breaking_tie_randomly),
            ),
            PickEarlyType::FirstAccepted => {
                if config.accepted_count_limit.is_some() {
                    warn!("accepted_count_limit is ignored with pick_early_type first_accepted");
                }
                Box::new(FirstAcceptedForager::<S>::new())
            }
            PickEarlyType::FirstBestScoreImproving => {
                if config.breaking_tie_randomly {
                    warn!("breaking_tie_randomly is ignored with pick_early_type first_best_score_improving");
                }
                Box::new(FirstBestScoreImprovingForager::<S>::new())
            }
        }
    }

    pub fn construction<S: PlanningSolution>(
        construction_heuristic_type: ConstructionHeuristicType,
    ) -> Box<dyn ConstructionForager<S>> {
        match construction_heuristic_type {
            ConstructionHeuristicType::FirstFit => Box::new(FirstFitForager::<S>::new()),
            ConstructionHeuristicType::BestFit => Box::new(BestFitForager::<S>::new()),
            ConstructionHeuristicType::FirstFeasible => Box::new(FirstFeasibleForager::<S>::new()),
            ConstructionHeuristicType::FirstNonDeterioratingScore => {
                Box::new(FirstNonDeterioratingScoreForager::<S>::new())
            }
        }
    }

    /// Builds a construction forager that also quits on the optimistic
    /// bound when `score_director` configures an initializing score trend.
    pub fn construction_with_trend<S, Def>(
        construction_heuristic_type: ConstructionHeuristicType,
        score_director: &ScoreDirectorConfig,
        definition: &Def,
    ) -> Result<Box<dyn ConstructionForager<S>>>
    where
        S: PlanningSolution,
        Def: ScoreDefinition<Score = S::Score> + Clone + 'static,
    {
        let forager = Self::construction::<S>(construction_heuristic_type);
        if score_director.initializing_score_trend.is_none() {
            return Ok(forager);
        }
        let trend = score_director.initializing_score_trend(definition.levels_size())?;
        Ok(Box::new(OptimisticBoundForager::new(
            forager,
            definition.clone(),
            trend,
        )))
    }
}

/// Builds a solver from `config`.
///
/// Every construction heuristic phase gets a clone of `placer`, every
/// local search phase a clone of `move_selector`. Without configured
/// phases the solver runs a first fit construction heuristic followed by
/// a default local search.
pub fn build_solver<S, D, Def, CM, P, LM, MS>(
    config: &SolverConfig,
    definition: &Def,
    placer: P,
    move_selector: MS,
) -> Result<Solver<S, D>>
where
    S: PlanningSolution,
    D: ScoreDirector<S> + 'static,
    Def: ScoreDefinition<Score = S::Score> + Clone + 'static,
    CM: Move<S> + 'static,
    P: EntityPlacer<S, CM> + Clone + 'static,
    LM: Move<S> + 'static,
    MS: MoveSelector<S, LM> + Clone + 'static,
{
    config.validate()?;

    let default_phases = [
        PhaseConfig::ConstructionHeuristic(Default::default()),
        PhaseConfig::LocalSearch(Default::default()),
    ];
    let phase_configs: &[PhaseConfig] = if config.phases.is_empty() {
        &default_phases
    } else {
        &config.phases
    };

    let mut solver = Solver::from_config(config);
    let mut has_solver_termination = false;
    if let Some(termination_config) = &config.termination {
        if let Some(termination) = TerminationBuilder::build(termination_config, definition)? {
            solver = solver.with_termination(termination);
            has_solver_termination = true;
        }
    }

    for (phase_index, phase_config) in phase_configs.iter().enumerate() {
        let phase: Box<dyn Phase<S, D>> = match phase_config {
            PhaseConfig::ConstructionHeuristic(ch_config) => {
                let mut phase = ConstructionHeuristicPhase::<S, D, CM, _, _>::new(
                    placer.clone(),
                    ForagerBuilder::construction_with_trend::<S, Def>(
                        ch_config.construction_heuristic_type,
                        &config.score_director,
                        definition,
                    )?,
                );
                if let Some(termination_config) = &ch_config.termination {
                    if let Some(termination) =
                        TerminationBuilder::build(termination_config, definition)?
                    {
                        phase = phase.with_termination(termination);
                    }
                }
                Box::new(phase)
            }
            PhaseConfig::LocalSearch(ls_config) => {
                let mut phase = LocalSearchPhase::<S, D, LM, _, _, _>::new(
                    move_selector.clone(),
                    AcceptorBuilder::build::<S, Def>(ls_config.acceptor.as_ref(), definition)?,
                    ForagerBuilder::local_search::<S>(ls_config.forager.as_ref()),
                );
                let mut has_phase_termination = false;
                if let Some(termination_config) = &ls_config.termination {
                    if let Some(termination) =
                        TerminationBuilder::build(termination_config, definition)?
                    {
                        phase = phase.with_termination(termination);
                        has_phase_termination = true;
                    }
                }
                if !has_solver_termination && !has_phase_termination {
                    warn!(
                        event = "unbounded_phase",
                        phase_index = phase_index,
                        "local search has no termination and runs until terminated early"
                    );
                }
                Box::new(phase)
            }
        };
        solver = solver.with_boxed_phase(phase);
    }

    Ok(solver)
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
