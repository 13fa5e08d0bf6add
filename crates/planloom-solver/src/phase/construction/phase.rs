//! Construction heuristic phase implementation.

use std::fmt::Debug;
use std::marker::PhantomData;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;
use tracing::{info, trace};

use crate::error::{Result, SolverError};
use crate::heuristic::r#move::Move;
use crate::phase::construction::{ConstructionForager, EntityPlacer};
use crate::phase::{speed, Phase};
use crate::scope::{ConstructionHeuristicStepScope, PhaseKind, PhaseScope, SolverScope, StepScope};
use crate::termination::Termination;

/// Construction heuristic phase that assigns values to uninitialized entities.
///
/// Each step visits one entity: the placer readies it and generates its
/// candidate moves, the forager picks one and the move is committed.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
/// * `M` - The move type
/// * `P` - The entity placer type
/// * `Fo` - The forager type
pub struct ConstructionHeuristicPhase<S, D, M, P, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    placer: P,
    forager: Fo,
    termination: Option<Box<dyn Termination<S, D>>>,
    _phantom: PhantomData<fn() -> M>,
}

impl<S, D, M, P, Fo> ConstructionHeuristicPhase<S, D, M, P, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    P: EntityPlacer<S, M>,
    Fo: ConstructionForager<S>,
{
    pub fn new(placer: P, forager: Fo) -> Self {
        Self {
            placer,
            forager,
            termination: None,
            _phantom: PhantomData,
        }
    }

    /// Stops this phase early when `termination` is reached.
    pub fn with_termination(mut self, termination: Box<dyn Termination<S, D>>) -> Self {
        self.termination = Some(termination);
        self
    }
}

impl<S, D, M, P, Fo> Debug for ConstructionHeuristicPhase<S, D, M, P, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    P: Debug,
    Fo: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructionHeuristicPhase")
            .field("placer", &self.placer)
            .field("forager", &self.forager)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<S, D, M, P, Fo> Phase<S, D> for ConstructionHeuristicPhase<S, D, M, P, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    P: EntityPlacer<S, M>,
    Fo: ConstructionForager<S>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        let mut phase_scope = PhaseScope::new(solver_scope, PhaseKind::ConstructionHeuristic);
        let phase_index = phase_scope.phase_index();

        info!(
            event = "phase_start",
            phase = "Construction Heuristic",
            phase_index = phase_index,
        );
        phase_scope.fire_phase_started();

        let entities = self.placer.select_entities(phase_scope.score_director());

        for entity_ref in entities {
            if phase_scope.is_terminated(self.termination.as_deref()) {
                break;
            }

            self.placer
                .prepare_entity(phase_scope.score_director_mut(), entity_ref);
            let placement = self
                .placer
                .build_placement(phase_scope.score_director(), entity_ref);

            self.forager.step_started(phase_scope.last_step_score());
            for (index, m) in placement.moves.iter().enumerate() {
                if !m.is_doable(phase_scope.score_director()) {
                    continue;
                }
                let score = phase_scope.solver_scope_mut().evaluate_move(m)?;
                phase_scope.solver_scope().statistics().record_move(true);
                self.forager.add_move_score(index, score);
                if self.forager.is_quit_early() {
                    break;
                }
            }

            let move_description = match self.forager.pick_move_index() {
                Some((index, _)) => {
                    let m = placement.moves.get(index).ok_or_else(|| {
                        SolverError::InvalidState(format!(
                            "forager picked move {index} of {}",
                            placement.moves.len()
                        ))
                    })?;
                    m.do_move(phase_scope.score_director_mut());
                    Some(m.describe())
                }
                None => None,
            };

            let step_score = phase_scope.calculate_score();
            phase_scope.solver_scope_mut().assert_step_score(&step_score, || {
                move_description
                    .clone()
                    .unwrap_or_else(|| format!("visit of entity {}", entity_ref.entity_index))
            })?;
            let best_score_improved = phase_scope.complete_step(&step_score);
            let step_index = phase_scope.step_count() - 1;

            trace!(
                event = "step",
                phase_index = phase_index,
                step = step_index,
                entity = entity_ref.entity_index,
                score = %step_score,
                assigned = move_description.is_some(),
            );

            let step_scope = StepScope::ConstructionHeuristic(ConstructionHeuristicStepScope {
                phase_scope: &phase_scope,
                step_index,
                step_score,
                best_score_improved,
                entity_index: entity_ref.entity_index,
                move_description,
            });
            phase_scope.fire_step_ended(&step_scope);
        }

        phase_scope.fire_phase_ended();

        let statistics = phase_scope.to_statistics();
        let best_score = phase_scope
            .best_score()
            .map(|s| format!("{s}"))
            .unwrap_or_else(|| "none".to_string());
        info!(
            event = "phase_end",
            phase = "Construction Heuristic",
            phase_index = phase_index,
            duration_ms = statistics.duration.as_millis() as u64,
            steps = statistics.step_count,
            speed = speed(statistics.step_count, statistics.duration),
            score = best_score,
        );
        phase_scope.solver_scope().statistics().record_phase(statistics);
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}
