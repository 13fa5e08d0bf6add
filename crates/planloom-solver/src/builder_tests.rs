use planloom_config::{
    ConstructionHeuristicConfig, EntityTabuConfig, LateAcceptanceConfig, LocalSearchConfig,
    SimulatedAnnealingConfig,
};
use planloom_core::score::{HardSoftScore, HardSoftScoreDefinition, SimpleScore, SimpleScoreDefinition};
use planloom_core::Score;
use planloom_scoring::SimpleScoreDirector;
use planloom_test::nqueens::{calculate_conflicts, get_queen_row, queen_count, set_queen_row};
use planloom_test::NQueensSolution;

use super::*;
use crate::error::SolverError;
use crate::heuristic::selector::{ChangeMoveSelector, FromSolutionEntitySelector, StaticValueSelector};
use crate::phase::construction::QueuedEntityPlacer;

type Director = SimpleScoreDirector<NQueensSolution, fn(&NQueensSolution) -> SimpleScore>;

#[derive(Clone, Debug)]
struct HardSoftSolution {
    score: Option<HardSoftScore>,
}

impl PlanningSolution for HardSoftSolution {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

fn build_termination(config: &TerminationConfig) -> Result<Option<Box<dyn Termination<NQueensSolution, Director>>>> {
    TerminationBuilder::build(config, &SimpleScoreDefinition)
}

fn debug_of<T: std::fmt::Debug + ?Sized>(value: &T) -> String {
    format!("{value:?}")
}

fn queens_solver(config: &SolverConfig, n: i64) -> Result<Solver<NQueensSolution, Director>> {
    let placer = QueuedEntityPlacer::new(
        FromSolutionEntitySelector::new(0, queen_count),
        StaticValueSelector::new((0..n).collect()),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    );
    let move_selector = ChangeMoveSelector::new(
        FromSolutionEntitySelector::new(0, queen_count),
        StaticValueSelector::new((0..n).collect()),
        get_queen_row,
        set_queen_row,
        0,
        "row",
    );
    build_solver(config, &SimpleScoreDefinition, placer, move_selector)
}

fn queens_director(n: usize) -> Director {
    SimpleScoreDirector::new(
        NQueensSolution::uninitialized(n),
        calculate_conflicts as fn(&NQueensSolution) -> SimpleScore,
    )
}

// ============================================================================
// Terminations
// ============================================================================

#[test]
fn test_termination_builder_empty_config() {
    assert!(build_termination(&TerminationConfig::default()).unwrap().is_none());
}

#[test]
fn test_termination_builder_single_limit_is_not_wrapped() {
    let config = TerminationConfig {
        step_count_limit: Some(10),
        ..Default::default()
    };
    let termination = build_termination(&config).unwrap().unwrap();
    let debug = debug_of(&termination);
    assert!(debug.contains("StepCountTermination"), "{debug}");
    assert!(!debug.contains("OrTermination"), "{debug}");
}

#[test]
fn test_termination_builder_composition() {
    let mut config = TerminationConfig {
        step_count_limit: Some(10),
        seconds_spent_limit: Some(5),
        ..Default::default()
    };
    let or = build_termination(&config).unwrap().unwrap();
    assert!(debug_of(&or).contains("OrTermination"));

    config.termination_composition = TerminationComposition::And;
    let and = build_termination(&config).unwrap().unwrap();
    assert!(debug_of(&and).contains("AndTermination"));
}

#[test]
fn test_termination_builder_rejects_bad_score_limit() {
    let config = TerminationConfig {
        best_score_limit: Some("not a score".to_string()),
        ..Default::default()
    };
    assert!(matches!(build_termination(&config), Err(SolverError::Config(_))));
}

// ============================================================================
// Acceptors and foragers
// ============================================================================

#[test]
fn test_acceptor_builder_defaults_to_late_acceptance() {
    let acceptor = AcceptorBuilder::build::<NQueensSolution, _>(None, &SimpleScoreDefinition).unwrap();
    assert!(debug_of(&acceptor).contains("LateAcceptanceAcceptor"));
}

#[test]
fn test_acceptor_builder_entity_tabu() {
    let config = AcceptorConfig::EntityTabu(EntityTabuConfig {
        entity_tabu_size: Some(3),
    });
    let acceptor =
        AcceptorBuilder::build::<NQueensSolution, _>(Some(&config), &SimpleScoreDefinition).unwrap();
    assert!(debug_of(&acceptor).contains("entity_tabu_size: 3"));
}

#[test]
fn test_acceptor_builder_parses_temperature_per_level() {
    let config = AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
        starting_temperature: Some("0hard/5soft".to_string()),
        decay_rate: Some(0.5),
    });
    let acceptor =
        AcceptorBuilder::build::<HardSoftSolution, _>(Some(&config), &HardSoftScoreDefinition).unwrap();
    let debug = debug_of(&acceptor);
    assert!(debug.contains("temperatures: [0.0, 5.0]"), "{debug}");
}

#[test]
fn test_acceptor_builder_requires_starting_temperature() {
    let config = AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default());
    let result = AcceptorBuilder::build::<NQueensSolution, _>(Some(&config), &SimpleScoreDefinition);
    assert!(matches!(result, Err(SolverError::Config(ConfigError::Invalid(_)))));
}

#[test]
fn test_forager_builder_pick_early_types() {
    let never = ForagerConfig {
        accepted_count_limit: Some(4),
        ..Default::default()
    };
    let forager = ForagerBuilder::local_search::<NQueensSolution>(Some(&never));
    assert!(debug_of(&forager).contains("accepted_count_limit: 4"));

    let first = ForagerConfig {
        pick_early_type: PickEarlyType::FirstAccepted,
        ..Default::default()
    };
    let forager = ForagerBuilder::local_search::<NQueensSolution>(Some(&first));
    assert!(debug_of(&forager).contains("FirstAcceptedForager"));

    let improving = ForagerConfig {
        pick_early_type: PickEarlyType::FirstBestScoreImproving,
        ..Default::default()
    };
    let forager = ForagerBuilder::local_search::<NQueensSolution>(Some(&improving));
    assert!(debug_of(&forager).contains("FirstBestScoreImprovingForager"));
}

#[test]
fn test_forager_builder_construction_types() {
    let names = [
        (ConstructionHeuristicType::FirstFit, "FirstFitForager"),
        (ConstructionHeuristicType::BestFit, "BestFitForager"),
        (ConstructionHeuristicType::FirstFeasible, "FirstFeasibleForager"),
        (
            ConstructionHeuristicType::FirstNonDeterioratingScore,
            "FirstNonDeterioratingScoreForager",
        ),
    ];
    for (construction_heuristic_type, name) in names {
        let forager = ForagerBuilder::construction::<NQueensSolution>(construction_heuristic_type);
        assert!(debug_of(&forager).contains(name));
    }
}

#[test]
fn test_construction_forager_wraps_configured_trend() {
    let none = ScoreDirectorConfig::default();
    let forager = ForagerBuilder::construction_with_trend::<NQueensSolution, _>(
        ConstructionHeuristicType::BestFit,
        &none,
        &SimpleScoreDefinition,
    )
    .unwrap();
    assert!(!debug_of(&forager).contains("OptimisticBoundForager"));

    let only_down = ScoreDirectorConfig {
        initializing_score_trend: Some("ONLY_DOWN".to_string()),
        ..Default::default()
    };
    let forager = ForagerBuilder::construction_with_trend::<NQueensSolution, _>(
        ConstructionHeuristicType::BestFit,
        &only_down,
        &SimpleScoreDefinition,
    )
    .unwrap();
    let debug = debug_of(&forager);
    assert!(debug.contains("OptimisticBoundForager"));
    assert!(debug.contains("BestFitForager"));
}

#[test]
fn test_construction_forager_rejects_trend_of_wrong_shape() {
    let config = ScoreDirectorConfig {
        initializing_score_trend: Some("ONLY_DOWN/ANY".to_string()),
        ..Default::default()
    };
    let result = ForagerBuilder::construction_with_trend::<NQueensSolution, _>(
        ConstructionHeuristicType::BestFit,
        &config,
        &SimpleScoreDefinition,
    );
    assert!(matches!(result, Err(SolverError::Config(_))));
}

// ============================================================================
// Solver
// ============================================================================

#[test]
fn test_build_solver_defaults_to_two_phases() {
    let solver = queens_solver(&SolverConfig::new(), 4).unwrap();
    assert_eq!(solver.phase_count(), 2);
}

#[test]
fn test_build_solver_solves_configured_phases() {
    let config = SolverConfig::new()
        .with_termination(TerminationConfig {
            step_count_limit: Some(30),
            ..Default::default()
        })
        .with_phase(PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig {
            construction_heuristic_type: ConstructionHeuristicType::BestFit,
            termination: None,
        }))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
            acceptor: Some(AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
                late_acceptance_size: Some(10),
            })),
            forager: None,
            termination: None,
        }));
    let mut solver = queens_solver(&config, 6).unwrap();
    let result = solver.solve(queens_director(6)).unwrap();

    assert!(result.score.is_solution_initialized());
    assert!(result.solution.rows().iter().all(Option::is_some));
    assert_eq!(result.statistics.phase_count(), 2);
    assert!(result.statistics.total_step_count <= 30);
}

#[test]
fn test_build_solver_rejects_invalid_config() {
    let config = SolverConfig::new().with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
        acceptor: Some(AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: Some(0),
        })),
        forager: None,
        termination: None,
    }));
    assert!(matches!(queens_solver(&config, 4), Err(SolverError::Config(_))));
}
