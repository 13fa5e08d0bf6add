//! Local search phase implementation.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Instant;

use planloom_core::domain::PlanningSolution;
use planloom_scoring::ScoreDirector;
use tracing::{debug, info, trace, warn};

use crate::error::{Result, SolverError};
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;
use crate::phase::localsearch::{Acceptor, LocalSearchForager, MoveScope};
use crate::phase::{speed, Phase};
use crate::scope::{LocalSearchStepScope, PhaseKind, PhaseScope, SolverScope, StepScope};
use crate::termination::Termination;

/// Local search phase that improves an existing solution.
///
/// Each step:
/// 1. Selects the candidate moves
/// 2. Scores each doable move and undoes it
/// 3. Hands accepted moves to the forager
/// 4. Commits the move the forager picks
///
/// A step in which nothing is accepted ends the phase early.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
/// * `M` - The move type
/// * `MS` - The move selector type
/// * `A` - The acceptor type
/// * `Fo` - The forager type
pub struct LocalSearchPhase<S, D, M, MS, A, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    move_selector: MS,
    acceptor: A,
    forager: Fo,
    termination: Option<Box<dyn Termination<S, D>>>,
    _phantom: PhantomData<fn() -> M>,
}

impl<S, D, M, MS, A, Fo> LocalSearchPhase<S, D, M, MS, A, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S>,
    Fo: LocalSearchForager<S>,
{
    /// Creates a new local search phase.
    pub fn new(move_selector: MS, acceptor: A, forager: Fo) -> Self {
        Self {
            move_selector,
            acceptor,
            forager,
            termination: None,
            _phantom: PhantomData,
        }
    }

    /// Stops this phase when `termination` is reached.
    pub fn with_termination(mut self, termination: Box<dyn Termination<S, D>>) -> Self {
        self.termination = Some(termination);
        self
    }
}

impl<S, D, M, MS, A, Fo> Debug for LocalSearchPhase<S, D, M, MS, A, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    MS: Debug,
    A: Debug,
    Fo: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("move_selector", &self.move_selector)
            .field("acceptor", &self.acceptor)
            .field("forager", &self.forager)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<S, D, M, MS, A, Fo> Phase<S, D> for LocalSearchPhase<S, D, M, MS, A, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S>,
    Fo: LocalSearchForager<S>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        let mut phase_scope = PhaseScope::new(solver_scope, PhaseKind::LocalSearch);
        let phase_index = phase_scope.phase_index();

        info!(
            event = "phase_start",
            phase = "Local Search",
            phase_index = phase_index,
        );
        self.acceptor.phase_started(phase_scope.starting_score());
        phase_scope.fire_phase_started();

        let mut last_progress_time = Instant::now();
        let mut last_progress_moves = phase_scope.solver_scope().statistics().current_moves_evaluated();

        loop {
            if phase_scope.is_terminated(self.termination.as_deref()) {
                break;
            }

            let last_step_score = phase_scope.last_step_score().clone();
            let best_score = phase_scope
                .best_score()
                .cloned()
                .unwrap_or_else(|| last_step_score.clone());

            self.acceptor.step_started();
            self.forager.step_started(&best_score, &last_step_score);

            let moves = {
                let (score_director, rng) = phase_scope.solver_scope_mut().score_director_and_rng();
                self.move_selector.select_moves(score_director, rng)
            };

            for (index, m) in moves.iter().enumerate() {
                if !m.is_doable(phase_scope.score_director()) {
                    continue;
                }
                let score = phase_scope.solver_scope_mut().evaluate_move(m)?;
                let move_scope = MoveScope {
                    entity_indices: m.entity_indices(),
                    score: &score,
                    last_step_score: &last_step_score,
                    best_score: &best_score,
                };
                let accepted = self
                    .acceptor
                    .is_accepted(&move_scope, phase_scope.solver_scope_mut().rng());
                phase_scope.solver_scope().statistics().record_move(accepted);
                if accepted {
                    self.forager.add_move_index(index, score);
                    if self.forager.is_quit_early() {
                        break;
                    }
                }
            }

            let accepted_move_count = self.forager.accepted_count();
            let Some((picked_index, _)) = self
                .forager
                .pick_move_index(phase_scope.solver_scope_mut().rng())
            else {
                phase_scope.mark_ended_early();
                warn!(
                    event = "phase_ended_early",
                    phase_index = phase_index,
                    step = phase_scope.step_count(),
                    candidates = moves.len(),
                );
                break;
            };
            let picked = moves.get(picked_index).ok_or_else(|| {
                SolverError::InvalidState(format!(
                    "forager picked move {picked_index} of {}",
                    moves.len()
                ))
            })?;

            picked.do_move(phase_scope.score_director_mut());
            let step_score = phase_scope.calculate_score();
            phase_scope
                .solver_scope_mut()
                .assert_step_score(&step_score, || picked.describe())?;
            self.acceptor.step_ended(&step_score, picked.entity_indices());
            let best_score_improved = phase_scope.complete_step(&step_score);
            let step_index = phase_scope.step_count() - 1;

            let now = Instant::now();
            if now.duration_since(last_progress_time).as_secs() >= 1 {
                let moves_evaluated = phase_scope.solver_scope().statistics().current_moves_evaluated();
                let elapsed = now.duration_since(last_progress_time);
                debug!(
                    event = "progress",
                    steps = phase_scope.step_count(),
                    speed = speed(moves_evaluated.saturating_sub(last_progress_moves), elapsed),
                    score = %step_score,
                );
                last_progress_time = now;
                last_progress_moves = moves_evaluated;
            }

            let move_description = picked.describe();
            trace!(
                event = "step",
                step = step_index,
                move_description = %move_description,
                score = %step_score,
                improved = best_score_improved,
            );

            let step_scope = StepScope::LocalSearch(LocalSearchStepScope {
                phase_scope: &phase_scope,
                step_index,
                step_score,
                best_score_improved,
                move_description,
                accepted_move_count,
            });
            phase_scope.fire_step_ended(&step_scope);
        }

        self.acceptor.phase_ended();
        phase_scope.fire_phase_ended();

        let statistics = phase_scope.to_statistics();
        let best_score = phase_scope
            .best_score()
            .map(|s| format!("{s}"))
            .unwrap_or_else(|| "none".to_string());
        info!(
            event = "phase_end",
            phase = "Local Search",
            phase_index = phase_index,
            duration_ms = statistics.duration.as_millis() as u64,
            steps = statistics.step_count,
            speed = speed(statistics.moves_evaluated, statistics.duration),
            score = best_score,
            ended_early = statistics.ended_early,
        );
        phase_scope.solver_scope().statistics().record_phase(statistics);
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
