//! Fixtures shared by the `pardbscan-core` integration suites.

use pardbscan_core::{
    ClusterLabel, ClusteringResult, Dataset, Dbscan, DbscanBuilder, ExecutionStrategy,
};

/// Two tight squares far apart plus one isolated point at the end.
#[must_use]
pub fn two_squares() -> Dataset {
    Dataset::from_coordinates([
        (0.0, 0.0),
        (0.2, 0.0),
        (0.0, 0.2),
        (0.2, 0.2),
        (10.0, 10.0),
        (10.2, 10.0),
        (10.0, 10.2),
        (10.2, 10.2),
        (50.0, -50.0),
    ])
}

/// Builds an engine with the given parameters and strategy.
#[must_use]
pub fn dbscan(epsilon: f64, min_points: usize, strategy: ExecutionStrategy) -> Dbscan {
    DbscanBuilder::new()
        .with_epsilon(epsilon)
        .with_min_points(min_points)
        .with_execution_strategy(strategy)
        .build()
        .expect("test configuration must be valid")
}

/// Relabels cluster ids in first-seen order so partitions can be compared
/// without caring about id numbering. Noise maps to `-1`.
#[must_use]
pub fn canonical_partition(result: &ClusteringResult) -> Vec<i64> {
    let mut seen: Vec<u64> = Vec::new();
    result
        .labels()
        .iter()
        .map(|label| match label {
            ClusterLabel::Cluster(id) => {
                let position = seen.iter().position(|known| *known == id.get()).unwrap_or_else(|| {
                    seen.push(id.get());
                    seen.len() - 1
                });
                i64::try_from(position).expect("cluster count fits i64") + 1
            }
            ClusterLabel::Noise | ClusterLabel::Unclassified => label.as_i64(),
        })
        .collect()
}
