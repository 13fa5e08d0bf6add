//! Per score level weight series for charting.

use super::ConstraintMatchTotalBestScorePoint;

/// The `(time_millis_spent, weight_total)` steps of one constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintWeightSeries {
    pub constraint_id: String,
    pub name: String,
    pub values: Vec<(u64, f64)>,
}

/// The series of one score level, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelSeries {
    series: Vec<ConstraintWeightSeries>,
}

impl LevelSeries {
    pub fn series(&self) -> &[ConstraintWeightSeries] {
        &self.series
    }

    pub fn get(&self, constraint_id: &str) -> Option<&ConstraintWeightSeries> {
        self.series.iter().find(|s| s.constraint_id == constraint_id)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn entry(&mut self, point: &ConstraintMatchTotalBestScorePoint) -> &mut ConstraintWeightSeries {
        let constraint_id = point.constraint_id();
        let index = match self.series.iter().position(|s| s.constraint_id == constraint_id) {
            Some(index) => index,
            None => {
                self.series.push(ConstraintWeightSeries {
                    constraint_id,
                    name: format!("{} weight", point.constraint_name),
                    values: Vec::new(),
                });
                self.series.len() - 1
            }
        };
        &mut self.series[index]
    }
}

/// Groups points into one [`LevelSeries`] per score level.
///
/// Levels at or above `charted_score_level_size` are dropped. The returned
/// list ends at the highest level seen.
pub fn series_by_level(
    points: &[ConstraintMatchTotalBestScorePoint],
    charted_score_level_size: usize,
) -> Vec<LevelSeries> {
    let mut levels: Vec<LevelSeries> = Vec::new();
    for point in points {
        if point.score_level >= charted_score_level_size {
            continue;
        }
        if point.score_level >= levels.len() {
            levels.resize_with(point.score_level + 1, LevelSeries::default);
        }
        levels[point.score_level]
            .entry(point)
            .values
            .push((point.time_millis_spent, point.weight_total));
    }
    levels
}
