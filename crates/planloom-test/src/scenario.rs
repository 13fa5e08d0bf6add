//! Entity/value fixtures for construction heuristic tests.
//!
//! Every entity has one planning variable holding an index into
//! [`TestdataSolution::values`]. Entities can be pinned or can request to
//! be reinitialized, which covers every placement rule of the
//! construction heuristic.

use planloom_core::{PlanningEntity, PlanningSolution, SimpleScore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestdataEntity {
    pub code: String,
    pub value: Option<usize>,
    pub pinned: bool,
    pub reinitialize: bool,
}

impl TestdataEntity {
    pub fn new(code: impl Into<String>, value: Option<usize>) -> Self {
        Self {
            code: code.into(),
            value,
            pinned: false,
            reinitialize: false,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn with_reinitialize(mut self, reinitialize: bool) -> Self {
        self.reinitialize = reinitialize;
        self
    }
}

impl PlanningEntity for TestdataEntity {
    fn is_pinned(&self) -> bool {
        self.pinned
    }

    fn is_reinitialize_requested(&self) -> bool {
        self.reinitialize
    }
}

#[derive(Clone, Debug)]
pub struct TestdataSolution {
    pub values: Vec<String>,
    pub entities: Vec<TestdataEntity>,
    pub score: Option<SimpleScore>,
}

impl TestdataSolution {
    pub fn new(values: &[&str], entities: Vec<TestdataEntity>) -> Self {
        Self {
            values: values.iter().map(|v| v.to_string()).collect(),
            entities,
            score: None,
        }
    }

    /// Looks up an entity by code.
    pub fn entity(&self, code: &str) -> Option<&TestdataEntity> {
        self.entities.iter().find(|e| e.code == code)
    }

    /// Value code held by the entity with `code`.
    pub fn value_of(&self, code: &str) -> Option<&str> {
        self.entity(code)
            .and_then(|e| e.value)
            .and_then(|v| self.values.get(v))
            .map(String::as_str)
    }
}

impl PlanningSolution for TestdataSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn uninitialized_entity_count(&self) -> usize {
        self.entities.iter().filter(|e| e.value.is_none()).count()
    }
}

pub fn entity_count(s: &TestdataSolution) -> usize {
    s.entities.len()
}

pub fn get_value(s: &TestdataSolution, idx: usize) -> Option<usize> {
    s.entities.get(idx).and_then(|e| e.value)
}

pub fn set_value(s: &mut TestdataSolution, idx: usize, v: Option<usize>) {
    if let Some(entity) = s.entities.get_mut(idx) {
        entity.value = v;
    }
}

pub fn is_pinned(s: &TestdataSolution, idx: usize) -> bool {
    s.entities.get(idx).is_some_and(|e| e.is_pinned())
}

pub fn is_reinitialize_requested(s: &TestdataSolution, idx: usize) -> bool {
    s.entities
        .get(idx)
        .is_some_and(|e| e.is_reinitialize_requested())
}

pub fn value_range(s: &TestdataSolution) -> Vec<usize> {
    (0..s.values.len()).collect()
}

/// Penalizes every pair of entities sharing a value.
pub fn calculate_shared_values(solution: &TestdataSolution) -> SimpleScore {
    let entities = &solution.entities;
    let mut shared = 0i64;
    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            if entities[i].value.is_some() && entities[i].value == entities[j].value {
                shared += 1;
            }
        }
    }
    SimpleScore::of(-shared)
}

/// `{e1: null, e2: v2, e3: v1}` over `{v1, v2, v3}`, all movable.
pub fn preassigned_movable_scenario() -> TestdataSolution {
    TestdataSolution::new(
        &["v1", "v2", "v3"],
        vec![
            TestdataEntity::new("e1", None),
            TestdataEntity::new("e2", Some(1)),
            TestdataEntity::new("e3", Some(0)),
        ],
    )
}

/// `{e1: null, e2: v2 pinned, e3: null pinned}` over `{v1, v2, v3}`.
pub fn pinned_scenario() -> TestdataSolution {
    TestdataSolution::new(
        &["v1", "v2", "v3"],
        vec![
            TestdataEntity::new("e1", None),
            TestdataEntity::new("e2", Some(1)).pinned(),
            TestdataEntity::new("e3", None).pinned(),
        ],
    )
}

/// `{e1: null, e2: v2, e3: v2 reinit, e4: null reinit}` over `{v1, v2, v3}`, all movable.
pub fn reinitialize_scenario() -> TestdataSolution {
    TestdataSolution::new(
        &["v1", "v2", "v3"],
        vec![
            TestdataEntity::new("e1", None),
            TestdataEntity::new("e2", Some(1)).with_reinitialize(false),
            TestdataEntity::new("e3", Some(1)).with_reinitialize(true),
            TestdataEntity::new("e4", None).with_reinitialize(true),
        ],
    )
}

/// Every entity already assigned, none pinned or flagged for reinitialization.
pub fn fully_initialized_scenario() -> TestdataSolution {
    TestdataSolution::new(
        &["v1", "v2", "v3"],
        vec![
            TestdataEntity::new("e1", Some(2)),
            TestdataEntity::new("e2", Some(1)),
            TestdataEntity::new("e3", Some(0)),
        ],
    )
}
