//! Single-threaded DBSCAN via frontier expansion.
//!
//! Points are visited in index order. An unclassified point with fewer than
//! `min_points` neighbours is marked noise; otherwise it seeds a new cluster
//! that grows through a frontier of density-reachable points. A noise point
//! reached later during an expansion is relabelled as a border point of that
//! cluster, but a clustered point is never relabelled.

use tracing::instrument;

use crate::{
    buffer::{filled_checked, push_checked, with_capacity_checked},
    builder::DbscanParams,
    error::Result,
    neighbourhood::RegionQuery,
    point::{ClusterId, ClusterLabel},
    result::Labelling,
};

/// Labels every point reachable through `query` with the sequential engine.
#[instrument(
    name = "dbscan.sequential",
    err,
    skip_all,
    fields(points = query.len()),
)]
pub(crate) fn cluster_sequential<Q>(query: &Q, params: DbscanParams) -> Result<Labelling>
where
    Q: RegionQuery + ?Sized,
{
    SequentialEngine::new(query, params)?.run()
}

struct SequentialEngine<'a, Q: ?Sized> {
    query: &'a Q,
    params: DbscanParams,
    labels: Vec<ClusterLabel>,
    /// Membership marker for the frontier of the current expansion.
    queued: Vec<bool>,
    frontier: Vec<usize>,
    scratch: Vec<usize>,
    core_count: usize,
}

impl<'a, Q: RegionQuery + ?Sized> SequentialEngine<'a, Q> {
    fn new(query: &'a Q, params: DbscanParams) -> Result<Self> {
        let len = query.len();
        Ok(Self {
            query,
            params,
            labels: filled_checked(len, ClusterLabel::Unclassified, "point labels")?,
            queued: filled_checked(len, false, "frontier membership")?,
            frontier: with_capacity_checked(0, "cluster frontier")?,
            scratch: with_capacity_checked(0, "neighbour list")?,
            core_count: 0,
        })
    }

    fn run(mut self) -> Result<Labelling> {
        let mut next_id = ClusterId::FIRST;
        let mut cluster_count = 0;

        for index in 0..self.labels.len() {
            if self.labels[index] != ClusterLabel::Unclassified {
                continue;
            }

            self.query_into_scratch(index)?;
            if !self.params.is_core(self.scratch.len()) {
                self.labels[index] = ClusterLabel::Noise;
                continue;
            }

            self.core_count += 1;
            self.expand(index, next_id)?;
            cluster_count += 1;
            next_id = next_id.next();
        }

        Ok(Labelling {
            labels: self.labels,
            core_count: self.core_count,
            cluster_count,
        })
    }

    /// Grows the cluster seeded at `seed`, whose neighbours sit in `scratch`.
    fn expand(&mut self, seed: usize, id: ClusterId) -> Result<()> {
        let label = ClusterLabel::Cluster(id);
        self.labels[seed] = label;
        self.frontier.clear();
        self.queued[seed] = true;
        push_checked(&mut self.frontier, seed, "cluster frontier")?;
        enqueue_all(&mut self.queued, &mut self.frontier, &self.scratch)?;

        let mut cursor = 1;
        while let Some(&current) = self.frontier.get(cursor) {
            cursor += 1;
            match self.labels[current] {
                ClusterLabel::Cluster(_) => {}
                ClusterLabel::Noise => self.labels[current] = label,
                ClusterLabel::Unclassified => {
                    self.labels[current] = label;
                    self.query_into_scratch(current)?;
                    if self.params.is_core(self.scratch.len()) {
                        self.core_count += 1;
                        enqueue_all(&mut self.queued, &mut self.frontier, &self.scratch)?;
                    }
                }
            }
        }

        for &member in &self.frontier {
            self.queued[member] = false;
        }
        Ok(())
    }

    fn query_into_scratch(&mut self, index: usize) -> Result<()> {
        self.scratch.clear();
        self.query
            .neighbours_into(index, self.params.epsilon(), &mut self.scratch)
    }
}

/// Appends every member not already on the frontier. Indices outside the
/// dataset are ignored.
fn enqueue_all(queued: &mut [bool], frontier: &mut Vec<usize>, members: &[usize]) -> Result<()> {
    for &member in members {
        let Some(flag) = queued.get_mut(member) else {
            continue;
        };
        if !*flag {
            *flag = true;
            push_checked(frontier, member, "cluster frontier")?;
        }
    }
    Ok(())
}
