//! Constraint match accounting.
//!
//! A score calculation with constraint matching enabled attributes every
//! score impact to the constraint that caused it. Matches are aggregated
//! per constraint into [`ConstraintMatchTotal`]s by a [`ScoreHolder`],
//! which is rebuilt from scratch on each calculation.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::constraint::{ConstraintRef, ImpactType};
use crate::score::{LevelNumber, Score};

/// Reference to an entity involved in a constraint match.
///
/// Uses type erasure to allow storing references to different entity types
/// in a single collection.
#[derive(Clone)]
pub struct EntityRef {
    /// Type name of the entity (e.g., "Shift", "Employee").
    pub type_name: String,
    /// String representation for display.
    pub display: String,
    entity: Arc<dyn Any + Send + Sync>,
}

impl EntityRef {
    /// Creates a new entity reference from a concrete entity.
    pub fn new<T: Clone + Debug + Send + Sync + 'static>(entity: &T) -> Self {
        Self {
            type_name: std::any::type_name::<T>().to_string(),
            display: format!("{:?}", entity),
            entity: Arc::new(entity.clone()),
        }
    }

    /// Creates an entity reference with a custom display string.
    pub fn with_display<T: Clone + Send + Sync + 'static>(entity: &T, display: String) -> Self {
        Self {
            type_name: std::any::type_name::<T>().to_string(),
            display,
            entity: Arc::new(entity.clone()),
        }
    }

    /// Attempts to downcast to the concrete entity type.
    pub fn as_entity<T: 'static>(&self) -> Option<&T> {
        self.entity.downcast_ref::<T>()
    }

    /// Returns the short type name (without module path).
    pub fn short_type_name(&self) -> &str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.type_name)
    }
}

impl Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("type", &self.short_type_name())
            .field("display", &self.display)
            .finish()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.display == other.display
    }
}

impl Eq for EntityRef {}

impl Hash for EntityRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        self.display.hash(state);
    }
}

/// Justification for why a constraint matched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstraintJustification {
    /// Entities involved in the match.
    pub entities: Vec<EntityRef>,
    /// Human-readable description of why the constraint matched.
    pub description: String,
}

impl ConstraintJustification {
    /// Creates a justification from entities, auto-generating description.
    pub fn new(entities: Vec<EntityRef>) -> Self {
        let description = if entities.is_empty() {
            "No entities".to_string()
        } else {
            entities
                .iter()
                .map(|e| e.display.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self {
            entities,
            description,
        }
    }

    /// Creates a justification with a custom description.
    pub fn with_description(entities: Vec<EntityRef>, description: impl Into<String>) -> Self {
        Self {
            entities,
            description: description.into(),
        }
    }
}

/// One attribution of part of the score to a constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintMatch<Sc: Score> {
    /// Constraint that matched.
    pub constraint_ref: ConstraintRef,
    /// Entities blamed for the match.
    pub justification: ConstraintJustification,
    /// Score impact of this match.
    pub score: Sc,
}

impl<Sc: Score> ConstraintMatch<Sc> {
    pub fn new(constraint_ref: ConstraintRef, justification: ConstraintJustification, score: Sc) -> Self {
        Self {
            constraint_ref,
            justification,
            score,
        }
    }

    /// Returns the constraint package.
    pub fn constraint_package(&self) -> &str {
        &self.constraint_ref.package
    }

    /// Returns the constraint name.
    pub fn constraint_name(&self) -> &str {
        &self.constraint_ref.name
    }
}

/// All matches of one constraint within a single score calculation.
///
/// # Examples
///
/// ```
/// use planloom_core::{ConstraintJustification, ConstraintMatchTotal, ConstraintRef, HardSoftScore, LevelNumber};
///
/// let mut total = ConstraintMatchTotal::new(ConstraintRef::new("cloud", "cpu"), 0, HardSoftScore::ZERO);
/// total.add_constraint_match(ConstraintJustification::default(), HardSoftScore::of(-2, 0));
/// total.add_constraint_match(ConstraintJustification::default(), HardSoftScore::of(-3, 0));
///
/// assert_eq!(total.constraint_match_count(), 2);
/// assert_eq!(total.weight_total(), LevelNumber::Integer(-5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintMatchTotal<Sc: Score> {
    constraint_ref: ConstraintRef,
    score_level: usize,
    constraint_matches: Vec<ConstraintMatch<Sc>>,
    score: Sc,
}

impl<Sc: Score> ConstraintMatchTotal<Sc> {
    /// Creates an empty total for a constraint that impacts `score_level`.
    pub fn new(constraint_ref: ConstraintRef, score_level: usize, zero_score: Sc) -> Self {
        Self {
            constraint_ref,
            score_level,
            constraint_matches: Vec::new(),
            score: zero_score,
        }
    }

    /// Adds one match.
    ///
    /// # Panics
    /// Panics if `score` has a different level layout than the total,
    /// the same way score addition does.
    pub fn add_constraint_match(&mut self, justification: ConstraintJustification, score: Sc) {
        self.score = self.score.clone() + score.clone();
        self.constraint_matches.push(ConstraintMatch::new(
            self.constraint_ref.clone(),
            justification,
            score,
        ));
    }

    pub fn constraint_ref(&self) -> &ConstraintRef {
        &self.constraint_ref
    }

    pub fn constraint_package(&self) -> &str {
        &self.constraint_ref.package
    }

    pub fn constraint_name(&self) -> &str {
        &self.constraint_ref.name
    }

    /// Index of the score level this constraint contributes to.
    pub fn score_level(&self) -> usize {
        self.score_level
    }

    pub fn constraint_matches(&self) -> &[ConstraintMatch<Sc>] {
        &self.constraint_matches
    }

    pub fn constraint_match_count(&self) -> usize {
        self.constraint_matches.len()
    }

    /// Summed score of every match.
    pub fn score(&self) -> &Sc {
        &self.score
    }

    /// Summed weight at [`ConstraintMatchTotal::score_level`].
    pub fn weight_total(&self) -> LevelNumber {
        let levels = self.score.to_level_values();
        match levels.get(self.score_level) {
            Some(level) => *level,
            None => levels
                .first()
                .map(LevelNumber::zero_like)
                .unwrap_or(LevelNumber::Integer(0)),
        }
    }
}

/// Returns the first non-zero level of `impact`, or 0 when every level is zero.
pub fn score_level_of<Sc: Score>(impact: &Sc) -> usize {
    impact
        .to_level_values()
        .iter()
        .position(|level| !level.is_zero())
        .unwrap_or(0)
}

/// Collects the score of one calculation, optionally with constraint matches.
///
/// Totals keep the order in which their constraint was first seen.
///
/// # Panics
/// Impacts are summed with score addition, so an impact with a different
/// level layout than the holder's zero score panics.
///
/// # Examples
///
/// ```
/// use planloom_core::{ConstraintJustification, ConstraintRef, HardSoftScore, ScoreHolder};
///
/// let overlap = ConstraintRef::new("schedule", "overlap");
/// let gap = ConstraintRef::new("schedule", "gap");
///
/// let mut holder = ScoreHolder::new(HardSoftScore::ZERO, true);
/// holder.penalize(&gap, HardSoftScore::of_soft(2), ConstraintJustification::default);
/// holder.penalize(&overlap, HardSoftScore::of_hard(1), ConstraintJustification::default);
/// holder.penalize(&gap, HardSoftScore::of_soft(3), ConstraintJustification::default);
///
/// assert_eq!(holder.extract_score(0), HardSoftScore::of(-1, -5));
/// let totals = holder.constraint_match_totals();
/// assert_eq!(totals[0].constraint_name(), "gap");
/// assert_eq!(totals[0].score_level(), 1);
/// assert_eq!(totals[1].constraint_name(), "overlap");
/// assert_eq!(totals[1].score_level(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreHolder<Sc: Score> {
    constraint_match_enabled: bool,
    zero_score: Sc,
    score: Sc,
    totals: Vec<ConstraintMatchTotal<Sc>>,
    index: HashMap<ConstraintRef, usize>,
}

impl<Sc: Score> ScoreHolder<Sc> {
    pub fn new(zero_score: Sc, constraint_match_enabled: bool) -> Self {
        Self {
            constraint_match_enabled,
            score: zero_score.clone(),
            zero_score,
            totals: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn is_constraint_match_enabled(&self) -> bool {
        self.constraint_match_enabled
    }

    /// Registers a constraint up front so it reports a total even without matches.
    pub fn register_constraint(&mut self, constraint_ref: &ConstraintRef, score_level: usize) {
        if self.constraint_match_enabled && !self.index.contains_key(constraint_ref) {
            self.insert_total(constraint_ref, score_level);
        }
    }

    /// Adds `impact` to the score and records a match for `constraint_ref`.
    ///
    /// `justify` is only called when constraint matching is enabled.
    pub fn impact(
        &mut self,
        constraint_ref: &ConstraintRef,
        impact: Sc,
        justify: impl FnOnce() -> ConstraintJustification,
    ) {
        self.score = self.score.clone() + impact.clone();
        if self.constraint_match_enabled {
            let existing = self.index.get(constraint_ref).copied();
            let index = match existing {
                Some(index) => index,
                None => self.insert_total(constraint_ref, score_level_of(&impact)),
            };
            self.totals[index].add_constraint_match(justify(), impact);
        }
    }

    /// Subtracts `weight` from the score.
    pub fn penalize(
        &mut self,
        constraint_ref: &ConstraintRef,
        weight: Sc,
        justify: impl FnOnce() -> ConstraintJustification,
    ) {
        self.impact(constraint_ref, ImpactType::Penalty.apply(weight), justify)
    }

    /// Adds `weight` to the score.
    pub fn reward(
        &mut self,
        constraint_ref: &ConstraintRef,
        weight: Sc,
        justify: impl FnOnce() -> ConstraintJustification,
    ) {
        self.impact(constraint_ref, ImpactType::Reward.apply(weight), justify)
    }

    /// Returns the accumulated score with the given init score.
    pub fn extract_score(&self, init_score: i64) -> Sc {
        self.score.with_init_score(init_score)
    }

    pub fn constraint_match_totals(&self) -> &[ConstraintMatchTotal<Sc>] {
        &self.totals
    }

    pub fn into_constraint_match_totals(self) -> Vec<ConstraintMatchTotal<Sc>> {
        self.totals
    }

    fn insert_total(&mut self, constraint_ref: &ConstraintRef, score_level: usize) -> usize {
        let index = self.totals.len();
        self.totals.push(ConstraintMatchTotal::new(
            constraint_ref.clone(),
            score_level,
            self.zero_score.clone(),
        ));
        self.index.insert(constraint_ref.clone(), index);
        index
    }
}
