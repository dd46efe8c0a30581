//! Benchmark parameter types.

use std::fmt;

/// Parameters for a DBSCAN benchmark run.
#[derive(Clone, Debug)]
pub struct DbscanBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Density threshold handed to the engine.
    pub min_points: usize,
}

impl fmt::Display for DbscanBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},min={}", self.point_count, self.min_points)
    }
}
