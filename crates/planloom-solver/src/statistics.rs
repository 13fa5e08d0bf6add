//! Solver statistics collection.
//!
//! The collector is shared behind an `Arc` so listeners can take a
//! snapshot while solving. Counters are atomics; phase records and the
//! best score history sit behind mutexes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use planloom_core::score::Score;

/// Statistics of one finished phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStatistics<Sc: Score> {
    pub phase_index: usize,
    pub phase_type: &'static str,
    pub duration: Duration,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    pub starting_score: Option<Sc>,
    pub ending_score: Option<Sc>,
    /// True when the phase stopped because no move was accepted.
    pub ended_early: bool,
}

impl<Sc: Score> PhaseStatistics<Sc> {
    pub fn new(phase_index: usize, phase_type: &'static str) -> Self {
        Self {
            phase_index,
            phase_type,
            duration: Duration::ZERO,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
            starting_score: None,
            ending_score: None,
            ended_early: false,
        }
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// A new best score, with the solver time and step at which it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreImprovement<Sc: Score> {
    pub time_offset: Duration,
    pub step_count: u64,
    pub score: Sc,
}

/// Statistics of a whole solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverStatistics<Sc: Score> {
    pub total_duration: Duration,
    pub total_step_count: u64,
    pub total_moves_evaluated: u64,
    pub total_moves_accepted: u64,
    pub score_calculation_count: u64,
    pub phase_statistics: Vec<PhaseStatistics<Sc>>,
    pub score_history: Vec<ScoreImprovement<Sc>>,
}

impl<Sc: Score> SolverStatistics<Sc> {
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_moves_evaluated == 0 {
            0.0
        } else {
            self.total_moves_accepted as f64 / self.total_moves_evaluated as f64
        }
    }

    pub fn phase_count(&self) -> usize {
        self.phase_statistics.len()
    }

    pub fn best_score(&self) -> Option<&Sc> {
        self.score_history.last().map(|s| &s.score)
    }

    pub fn improvement_count(&self) -> usize {
        self.score_history.len()
    }

    /// Score calculations per second over the whole solve.
    pub fn score_calculation_speed(&self) -> u64 {
        per_second(self.score_calculation_count, self.total_duration)
    }
}

/// Thread-safe statistics sink for one solve.
#[derive(Debug)]
pub struct StatisticsCollector<Sc: Score> {
    start_time: Instant,
    moves_evaluated: AtomicU64,
    moves_accepted: AtomicU64,
    step_count: AtomicU64,
    score_calculations: AtomicU64,
    phases: Mutex<Vec<PhaseStatistics<Sc>>>,
    score_history: Mutex<Vec<ScoreImprovement<Sc>>>,
}

impl<Sc: Score> StatisticsCollector<Sc> {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            moves_evaluated: AtomicU64::new(0),
            moves_accepted: AtomicU64::new(0),
            step_count: AtomicU64::new(0),
            score_calculations: AtomicU64::new(0),
            phases: Mutex::new(Vec::new()),
            score_history: Mutex::new(Vec::new()),
        }
    }

    pub fn record_move(&self, accepted: bool) {
        self.moves_evaluated.fetch_add(1, Ordering::Relaxed);
        if accepted {
            self.moves_accepted.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_step(&self) {
        self.step_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_score_calculation(&self) {
        self.score_calculations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_improvement(&self, score: Sc) {
        let improvement = ScoreImprovement {
            time_offset: self.start_time.elapsed(),
            step_count: self.step_count.load(Ordering::Relaxed),
            score,
        };
        self.score_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(improvement);
    }

    pub fn record_phase(&self, phase: PhaseStatistics<Sc>) {
        self.phases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(phase);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn current_step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    pub fn current_moves_evaluated(&self) -> u64 {
        self.moves_evaluated.load(Ordering::Relaxed)
    }

    pub fn current_moves_accepted(&self) -> u64 {
        self.moves_accepted.load(Ordering::Relaxed)
    }

    pub fn current_score_calculations(&self) -> u64 {
        self.score_calculations.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> SolverStatistics<Sc> {
        SolverStatistics {
            total_duration: self.start_time.elapsed(),
            total_step_count: self.current_step_count(),
            total_moves_evaluated: self.current_moves_evaluated(),
            total_moves_accepted: self.current_moves_accepted(),
            score_calculation_count: self.current_score_calculations(),
            phase_statistics: self
                .phases
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            score_history: self
                .score_history
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

impl<Sc: Score> Default for StatisticsCollector<Sc> {
    fn default() -> Self {
        Self::new()
    }
}

/// Events per second, 0 when no time has passed.
pub(crate) fn per_second(count: u64, elapsed: Duration) -> u64 {
    let millis = elapsed.as_millis() as u64;
    if millis == 0 {
        0
    } else {
        count.saturating_mul(1000) / millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planloom_core::SimpleScore;

    #[test]
    fn test_phase_statistics_acceptance_rate() {
        let mut stats: PhaseStatistics<SimpleScore> = PhaseStatistics::new(1, "LocalSearch");
        assert_eq!(stats.acceptance_rate(), 0.0);
        stats.moves_evaluated = 100;
        stats.moves_accepted = 25;
        assert!((stats.acceptance_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_collector_counts_moves_and_steps() {
        let collector: StatisticsCollector<SimpleScore> = StatisticsCollector::new();
        collector.record_move(true);
        collector.record_move(false);
        collector.record_move(true);
        collector.record_step();
        collector.record_score_calculation();

        let stats = collector.snapshot();
        assert_eq!(stats.total_moves_evaluated, 3);
        assert_eq!(stats.total_moves_accepted, 2);
        assert_eq!(stats.total_step_count, 1);
        assert_eq!(stats.score_calculation_count, 1);
    }

    #[test]
    fn test_collector_keeps_improvement_history() {
        let collector: StatisticsCollector<SimpleScore> = StatisticsCollector::new();
        collector.record_improvement(SimpleScore::of(-10));
        collector.record_step();
        collector.record_improvement(SimpleScore::of(-5));

        let stats = collector.snapshot();
        assert_eq!(stats.improvement_count(), 2);
        assert_eq!(stats.best_score(), Some(&SimpleScore::of(-5)));
        assert_eq!(stats.score_history[1].step_count, 1);
    }

    #[test]
    fn test_collector_records_phases_in_order() {
        let collector: StatisticsCollector<SimpleScore> = StatisticsCollector::new();
        collector.record_phase(PhaseStatistics::new(0, "ConstructionHeuristic"));
        collector.record_phase(PhaseStatistics::new(1, "LocalSearch"));

        let stats = collector.snapshot();
        assert_eq!(stats.phase_count(), 2);
        assert_eq!(stats.phase_statistics[1].phase_type, "LocalSearch");
    }

    #[test]
    fn test_per_second() {
        assert_eq!(per_second(500, Duration::from_millis(250)), 2000);
        assert_eq!(per_second(500, Duration::ZERO), 0);
    }
}
