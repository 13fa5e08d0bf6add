//! Time series points and their CSV form.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Weight of one constraint match total at the time the best score improved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintMatchTotalBestScorePoint {
    pub time_millis_spent: u64,
    pub constraint_package: String,
    pub constraint_name: String,
    pub score_level: usize,
    pub constraint_match_count: usize,
    pub weight_total: f64,
    /// Repeats the last point at the end of a local search phase.
    #[serde(skip)]
    pub trailing: bool,
}

impl ConstraintMatchTotalBestScorePoint {
    pub const CSV_HEADER: [&'static str; 6] = [
        "timeMillisSpent",
        "constraintPackage",
        "constraintName",
        "scoreLevel",
        "constraintMatchCount",
        "weightTotal",
    ];

    /// `package:name`, the key a constraint is charted under.
    pub fn constraint_id(&self) -> String {
        format!("{}:{}", self.constraint_package, self.constraint_name)
    }

    pub(crate) fn trailing_at(&self, time_millis_spent: u64) -> Self {
        Self {
            time_millis_spent,
            trailing: true,
            ..self.clone()
        }
    }
}

/// Writes `points` as CSV, header first.
///
/// Trailing points are skipped unless `export_trailing_point` is set.
pub fn write_csv<W: Write>(
    points: &[ConstraintMatchTotalBestScorePoint],
    export_trailing_point: bool,
    writer: W,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(ConstraintMatchTotalBestScorePoint::CSV_HEADER)?;
    for point in points
        .iter()
        .filter(|point| export_trailing_point || !point.trailing)
    {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads points written by [`write_csv`]. Every point read is a regular one.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ConstraintMatchTotalBestScorePoint>> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut points = Vec::new();
    for record in csv_reader.deserialize() {
        points.push(record?);
    }
    Ok(points)
}

pub(crate) fn write_csv_file(
    points: &[ConstraintMatchTotalBestScorePoint],
    export_trailing_point: bool,
    path: &Path,
) -> Result<()> {
    write_csv(points, export_trailing_point, File::create(path)?)
}

pub(crate) fn read_csv_file(path: &Path) -> Result<Vec<ConstraintMatchTotalBestScorePoint>> {
    read_csv(File::open(path)?)
}
