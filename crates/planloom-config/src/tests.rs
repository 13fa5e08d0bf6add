//! Tests for solver configuration.

use super::*;
use planloom_core::{HardSoftScore, HardSoftScoreDefinition, InitializingScoreTrendLevel};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "full_assert"
        random_seed = 42
        score_corruption_tolerance = 0.5

        [termination]
        seconds_spent_limit = 30
        best_score_limit = "0hard/-10soft"
        termination_composition = "and"

        [score_director]
        constraint_match_enabled = true
        initializing_score_trend = "ONLY_DOWN"

        [[phases]]
        type = "construction_heuristic"
        construction_heuristic_type = "first_feasible"

        [[phases]]
        type = "local_search"
        [phases.acceptor]
        type = "simulated_annealing"
        starting_temperature = "0hard/5soft"
        decay_rate = 0.95
        [phases.forager]
        accepted_count_limit = 4
        breaking_tie_randomly = true

        [statistic]
        export_trailing_point = true
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.score_corruption_tolerance, 0.5);
    assert!(config.score_director.constraint_match_enabled);

    let termination = config.termination.as_ref().unwrap();
    assert_eq!(termination.seconds_spent_limit, Some(30));
    assert_eq!(
        termination.termination_composition,
        TerminationComposition::And
    );

    assert_eq!(config.phases.len(), 2);
    match &config.phases[0] {
        PhaseConfig::ConstructionHeuristic(ch) => assert_eq!(
            ch.construction_heuristic_type,
            ConstructionHeuristicType::FirstFeasible
        ),
        other => panic!("unexpected phase {other:?}"),
    }
    match &config.phases[1] {
        PhaseConfig::LocalSearch(ls) => {
            match ls.acceptor.as_ref().unwrap() {
                AcceptorConfig::SimulatedAnnealing(sa) => {
                    assert_eq!(sa.starting_temperature.as_deref(), Some("0hard/5soft"));
                    assert_eq!(sa.decay_rate, Some(0.95));
                }
                other => panic!("unexpected acceptor {other:?}"),
            }
            let forager = ls.forager.as_ref().unwrap();
            assert_eq!(forager.accepted_count_limit, Some(4));
            assert_eq!(forager.pick_early_type, PickEarlyType::Never);
            assert!(forager.breaking_tie_randomly);
        }
        other => panic!("unexpected phase {other:?}"),
    }

    assert!(config.statistic.export_trailing_point);
    assert_eq!(
        config.statistic.charted_score_level_size,
        DEFAULT_CHARTED_SCORE_LEVEL_SIZE
    );
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: reproducible
        random_seed: 7
        termination:
          step_count_limit: 100
          unimproved_milliseconds_spent_limit: 250
        phases:
          - type: construction_heuristic
            construction_heuristic_type: best_fit
          - type: local_search
            acceptor:
              type: entity_tabu
              entity_tabu_size: 5
            forager:
              pick_early_type: first_best_score_improving
        statistic:
          charted_score_level_size: 2
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(7));
    let termination = config.termination.unwrap();
    assert_eq!(termination.step_count_limit, Some(100));
    assert_eq!(
        termination.unimproved_time_limit(),
        Some(Duration::from_millis(250))
    );
    assert_eq!(config.statistic.charted_score_level_size, 2);
    assert!(!config.statistic.export_trailing_point);
    match &config.phases[1] {
        PhaseConfig::LocalSearch(ls) => {
            assert_eq!(
                ls.acceptor,
                Some(AcceptorConfig::EntityTabu(EntityTabuConfig {
                    entity_tabu_size: Some(5)
                }))
            );
        }
        other => panic!("unexpected phase {other:?}"),
    }
}

#[test]
fn test_hill_climbing_unit_variant() {
    let config = SolverConfig::from_toml_str(
        r#"
        [[phases]]
        type = "local_search"
        [phases.acceptor]
        type = "hill_climbing"
    "#,
    )
    .unwrap();

    match &config.phases[0] {
        PhaseConfig::LocalSearch(ls) => {
            assert_eq!(ls.acceptor, Some(AcceptorConfig::HillClimbing));
            assert!(ls.forager.is_none());
        }
        other => panic!("unexpected phase {other:?}"),
    }
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.score_corruption_tolerance, 0.0);
    assert!(config.phases.is_empty());
    assert_eq!(config.time_limit(), None);
}

#[test]
fn test_unknown_phase_type_is_rejected() {
    let result = SolverConfig::from_toml_str(
        r#"
        [[phases]]
        type = "exhaustive_search"
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = SolverConfig::load("/nonexistent/planloom/solver.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_toml_round_trip() {
    let config = SolverConfig::new()
        .with_random_seed(9)
        .with_termination_seconds(5)
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ));

    let text = config.to_toml_string().unwrap();
    let parsed = SolverConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_negative_tolerance_is_invalid() {
    let result = SolverConfig::from_toml_str("score_corruption_tolerance = -1.0");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_zero_charted_level_size_is_invalid() {
    let result = SolverConfig::from_toml_str(
        r#"
        [statistic]
        charted_score_level_size = 0
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_zero_late_acceptance_size_is_invalid() {
    let result = SolverConfig::from_toml_str(
        r#"
        [[phases]]
        type = "local_search"
        [phases.acceptor]
        type = "late_acceptance"
        late_acceptance_size = 0
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_decay_rate_out_of_range_is_invalid() {
    let result = SolverConfig::from_toml_str(
        r#"
        [[phases]]
        type = "local_search"
        [phases.acceptor]
        type = "simulated_annealing"
        decay_rate = 1.5
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

// ============================================================================
// Derived values
// ============================================================================

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_environment_mode(EnvironmentMode::FastAssert)
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_score_corruption_tolerance(0.25)
        .with_constraint_match_enabled(true)
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()));

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.score_corruption_tolerance, 0.25);
    assert!(config.score_director.constraint_match_enabled);
    assert_eq!(config.phases.len(), 2);
}

#[test]
fn test_effective_random_seed() {
    assert_eq!(SolverConfig::new().effective_random_seed(), Some(0));
    assert_eq!(
        SolverConfig::new().with_random_seed(5).effective_random_seed(),
        Some(5)
    );
    assert_eq!(
        SolverConfig::new()
            .with_environment_mode(EnvironmentMode::NonReproducible)
            .effective_random_seed(),
        None
    );
}

#[test]
fn test_environment_mode_flags() {
    assert!(!EnvironmentMode::NonReproducible.is_reproducible());
    assert!(EnvironmentMode::Reproducible.is_reproducible());
    assert!(!EnvironmentMode::Reproducible.is_asserted());
    assert!(EnvironmentMode::FastAssert.is_asserted());
    assert!(!EnvironmentMode::FastAssert.is_fully_asserted());
    assert!(EnvironmentMode::FullAssert.is_fully_asserted());
}

#[test]
fn test_time_limit_combines_seconds_and_millis() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(2),
        milliseconds_spent_limit: Some(500),
        ..TerminationConfig::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(2500)));
    assert!(!termination.is_empty());
    assert!(TerminationConfig::default().is_empty());
}

#[test]
fn test_best_score_limit_parses_with_definition() {
    let termination = TerminationConfig {
        best_score_limit: Some("0hard/-3soft".to_string()),
        ..TerminationConfig::default()
    };
    let limit = termination
        .best_score_limit(&HardSoftScoreDefinition)
        .unwrap();
    assert_eq!(limit, Some(HardSoftScore::of(0, -3)));

    let broken = TerminationConfig {
        best_score_limit: Some("zero".to_string()),
        ..TerminationConfig::default()
    };
    assert!(matches!(
        broken.best_score_limit(&HardSoftScoreDefinition),
        Err(ConfigError::Score(_))
    ));
}

#[test]
fn test_initializing_score_trend() {
    let config = ScoreDirectorConfig {
        constraint_match_enabled: false,
        initializing_score_trend: Some("ONLY_DOWN/ANY".to_string()),
    };
    let trend = config.initializing_score_trend(2).unwrap();
    assert_eq!(
        trend.levels(),
        &[
            InitializingScoreTrendLevel::OnlyDown,
            InitializingScoreTrendLevel::Any
        ]
    );
    assert!(matches!(
        config.initializing_score_trend(3),
        Err(ConfigError::Trend(_))
    ));

    let default_trend = ScoreDirectorConfig::default()
        .initializing_score_trend(3)
        .unwrap();
    assert_eq!(default_trend.levels_size(), 3);
    assert!(default_trend
        .levels()
        .iter()
        .all(|l| *l == InitializingScoreTrendLevel::Any));
}
