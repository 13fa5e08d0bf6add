//! Simulated annealing acceptor.

use std::fmt::Debug;

use planloom_core::domain::PlanningSolution;
use planloom_core::score::Score;
use rand::rngs::StdRng;
use rand::Rng;

use super::{Acceptor, MoveScope};

/// Accepts worsening moves with a probability that shrinks as the
/// temperature cools.
///
/// Every score level has its own temperature, taken from the starting
/// temperature score. A worsening move is accepted with probability
/// `exp(delta / temperature)` multiplied over the levels with a positive
/// temperature; a worsening level with zero temperature rejects the move.
/// Temperatures are multiplied by `decay_rate` after each step.
pub struct SimulatedAnnealingAcceptor<S: PlanningSolution> {
    starting_temperature: S::Score,
    decay_rate: f64,
    temperatures: Vec<f64>,
}

impl<S: PlanningSolution> SimulatedAnnealingAcceptor<S> {
    /// Creates a simulated annealing acceptor.
    ///
    /// # Arguments
    /// * `starting_temperature` - Per level temperature at phase start
    /// * `decay_rate` - Multiplicative decay per step (e.g. 0.99)
    pub fn new(starting_temperature: S::Score, decay_rate: f64) -> Self {
        let temperatures = level_temperatures(&starting_temperature);
        Self {
            starting_temperature,
            decay_rate,
            temperatures,
        }
    }

    /// Current temperature of each score level.
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    fn acceptance_probability(&self, score: &S::Score, last_step_score: &S::Score) -> f64 {
        let score_levels = score.to_level_values();
        let last_levels = last_step_score.to_level_values();
        let mut probability = 1.0;
        for (i, (level, last)) in score_levels.iter().zip(&last_levels).enumerate() {
            let delta = level.to_f64() - last.to_f64();
            if delta >= 0.0 {
                continue;
            }
            let temperature = self.temperatures.get(i).copied().unwrap_or(0.0);
            if temperature <= 0.0 {
                return 0.0;
            }
            probability *= (delta / temperature).exp();
        }
        probability
    }
}

fn level_temperatures<Sc: Score>(score: &Sc) -> Vec<f64> {
    score
        .to_level_values()
        .iter()
        .map(|level| level.to_f64().max(0.0))
        .collect()
}

impl<S: PlanningSolution> Clone for SimulatedAnnealingAcceptor<S> {
    fn clone(&self) -> Self {
        Self {
            starting_temperature: self.starting_temperature.clone(),
            decay_rate: self.decay_rate,
            temperatures: self.temperatures.clone(),
        }
    }
}

impl<S: PlanningSolution> Debug for SimulatedAnnealingAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedAnnealingAcceptor")
            .field("starting_temperature", &self.starting_temperature)
            .field("decay_rate", &self.decay_rate)
            .field("temperatures", &self.temperatures)
            .finish()
    }
}

impl<S: PlanningSolution> Acceptor<S> for SimulatedAnnealingAcceptor<S> {
    fn is_accepted(&mut self, move_scope: &MoveScope<'_, S::Score>, rng: &mut StdRng) -> bool {
        let score = move_scope.score;
        let last_step_score = move_scope.last_step_score;
        if score >= last_step_score {
            return true;
        }
        if score.init_score() < last_step_score.init_score() {
            return false;
        }
        let probability = self.acceptance_probability(score, last_step_score);
        probability > 0.0 && rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &S::Score) {
        self.temperatures = level_temperatures(&self.starting_temperature);
    }

    fn step_ended(&mut self, _step_score: &S::Score, _entity_indices: &[usize]) {
        for temperature in &mut self.temperatures {
            *temperature *= self.decay_rate;
        }
    }
}
