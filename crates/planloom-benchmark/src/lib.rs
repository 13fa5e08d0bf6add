//! Benchmark statistics for planloom.
//!
//! A statistic attaches a listener to a [`Solver`](planloom_solver::Solver)
//! before solving, collects points while the solver runs and exports them
//! afterwards.
//!
//! # Example
//!
//! ```
//! use planloom_benchmark::ConstraintMatchTotalBestScoreStatistic;
//! use planloom_config::StatisticConfig;
//!
//! let statistic = ConstraintMatchTotalBestScoreStatistic::new(&StatisticConfig::default());
//! assert!(statistic.points().is_empty());
//! assert!(!statistic.is_open());
//!
//! let mut csv = Vec::new();
//! statistic.write_csv(&mut csv).unwrap();
//! assert_eq!(
//!     String::from_utf8(csv).unwrap(),
//!     "timeMillisSpent,constraintPackage,constraintName,scoreLevel,constraintMatchCount,weightTotal\n"
//! );
//! ```

mod constraint_match_total;
mod error;

pub use constraint_match_total::{
    read_csv, series_by_level, write_csv, ConstraintMatchTotalBestScorePoint,
    ConstraintMatchTotalBestScoreStatistic, ConstraintWeightSeries, LevelSeries,
};
pub use error::{BenchmarkError, Result};
