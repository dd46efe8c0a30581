//! Result types for clustering operations.
//!
//! Both engines hand back a `Labelling`; [`Dbscan`](crate::Dbscan) wraps it
//! into the public [`ClusteringResult`] together with the strategy that ran.

use crate::{
    builder::ExecutionStrategy,
    point::{ClusterId, ClusterLabel},
};

/// Raw engine output: one label per point plus the counters gathered while
/// labelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Labelling {
    pub(crate) labels: Vec<ClusterLabel>,
    pub(crate) core_count: usize,
    pub(crate) cluster_count: usize,
}

impl Labelling {
    pub(crate) const fn empty() -> Self {
        Self {
            labels: Vec::new(),
            core_count: 0,
            cluster_count: 0,
        }
    }
}

/// Represents the output of a [`Dbscan`](crate::Dbscan) invocation.
///
/// Labels are stored in point order. Cluster ids are dense, start at one and
/// follow the order in which clusters were discovered, so
/// `clusters()[k]` holds the members of cluster `k + 1`.
///
/// # Examples
/// ```
/// use pardbscan_core::{ClusterLabel, Dataset, DbscanBuilder, ExecutionStrategy};
///
/// let dbscan = DbscanBuilder::new()
///     .with_epsilon(1.0)
///     .with_min_points(1)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()?;
/// let mut dataset = Dataset::from_coordinates([(0.0, 0.0), (0.5, 0.0), (9.0, 9.0)]);
/// let result = dbscan.run(&mut dataset)?;
///
/// assert_eq!(result.cluster_count(), 1);
/// assert_eq!(result.noise_count(), 1);
/// assert_eq!(result.clusters(), vec![vec![0, 1]]);
/// assert_eq!(result.labels()[2], ClusterLabel::Noise);
/// # Ok::<(), pardbscan_core::DbscanError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    labels: Vec<ClusterLabel>,
    cluster_count: usize,
    noise_count: usize,
    core_count: usize,
    strategy: ExecutionStrategy,
}

impl ClusteringResult {
    pub(crate) fn new(labelling: Labelling, strategy: ExecutionStrategy) -> Self {
        let noise_count = labelling
            .labels
            .iter()
            .filter(|label| label.is_noise())
            .count();
        Self {
            labels: labelling.labels,
            cluster_count: labelling.cluster_count,
            noise_count,
            core_count: labelling.core_count,
            strategy,
        }
    }

    /// Returns the labels in point order.
    #[must_use]
    pub fn labels(&self) -> &[ClusterLabel] {
        &self.labels
    }

    /// Number of points labelled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when the run covered no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Counts how many distinct clusters were discovered.
    #[must_use]
    pub const fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Counts the points labelled as noise.
    #[must_use]
    pub const fn noise_count(&self) -> usize {
        self.noise_count
    }

    /// Counts the core points, i.e. points with at least `min_points`
    /// neighbours.
    #[must_use]
    pub const fn core_count(&self) -> usize {
        self.core_count
    }

    /// Returns the engine that produced the labels. Never
    /// [`ExecutionStrategy::Auto`].
    #[must_use]
    pub const fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Returns the member indices of each cluster, ordered by cluster id.
    #[must_use]
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut clusters = vec![Vec::new(); self.cluster_count];
        for (index, label) in self.labels.iter().enumerate() {
            if let Some(slot) = label
                .cluster()
                .and_then(cluster_slot)
                .and_then(|slot| clusters.get_mut(slot))
            {
                slot.push(index);
            }
        }
        clusters
    }

    /// Returns the indices of every noise point in ascending order.
    #[must_use]
    pub fn noise_points(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(index, label)| label.is_noise().then_some(index))
            .collect()
    }
}

fn cluster_slot(id: ClusterId) -> Option<usize> {
    usize::try_from(id.get() - 1).ok()
}
