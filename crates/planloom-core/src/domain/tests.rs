//! Tests for domain traits.

use super::*;
use crate::score::{HardSoftScore, Score};

#[derive(Clone, Debug)]
struct Lesson {
    room: Option<u32>,
    locked: bool,
}

impl PlanningEntity for Lesson {
    fn is_pinned(&self) -> bool {
        self.locked
    }
}

#[derive(Clone, Debug)]
struct Timetable {
    lessons: Vec<Lesson>,
    score: Option<HardSoftScore>,
}

impl PlanningSolution for Timetable {
    type Score = HardSoftScore;

    fn score(&self) -> Option<HardSoftScore> {
        self.score
    }

    fn set_score(&mut self, score: Option<HardSoftScore>) {
        self.score = score;
    }

    fn uninitialized_entity_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.room.is_none()).count()
    }
}

#[test]
fn test_init_score_counts_unassigned_entities() {
    let timetable = Timetable {
        lessons: vec![
            Lesson { room: None, locked: false },
            Lesson { room: Some(1), locked: true },
            Lesson { room: None, locked: true },
        ],
        score: None,
    };
    assert_eq!(timetable.uninitialized_entity_count(), 2);
    assert_eq!(timetable.init_score(), -2);
    assert!(!timetable.is_initialized());
}

#[test]
fn test_entity_defaults() {
    let lesson = Lesson { room: Some(2), locked: false };
    assert!(!lesson.is_pinned());
    assert!(!lesson.is_reinitialize_requested());
}

#[test]
fn test_score_round_trip_through_solution() {
    let mut timetable = Timetable {
        lessons: Vec::new(),
        score: None,
    };
    assert!(timetable.is_initialized());
    timetable.set_score(Some(HardSoftScore::of(0, -3)));
    assert!(timetable.score().is_some_and(|s| s.is_feasible()));
}
