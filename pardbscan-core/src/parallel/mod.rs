//! Three-phase parallel DBSCAN.
//!
//! 1. Every point's neighbourhood is queried in parallel and core points are
//!    flagged. Each work unit writes only its own slot.
//! 2. Core points are merged with their core neighbours through a
//!    `ConcurrentUnionFind`. The final partition does not depend on how the
//!    unions are scheduled.
//! 3. Roots are numbered in first-seen order over the core points, then every
//!    point is labelled in parallel: core points take their root's id, border
//!    points take the id of their first core neighbour and the rest become
//!    noise.
//!
//! Every per-point table is reserved up front with a fallible allocation and
//! then filled in place. Rayon's fill and reduce calls return only once every
//! work unit has finished, which provides the barrier between phases.
//!
//! Because the lowest index of a component is its root, cluster ids follow
//! the lowest core index of each cluster. The sequential engine numbers its
//! clusters the same way, so core points receive identical labels in both
//! modes.

mod union_find;

use std::{fmt, sync::Arc};

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    buffer::{filled_checked, with_capacity_checked},
    builder::DbscanParams,
    error::{DbscanError, Result, define_error_codes},
    neighbourhood::RegionQuery,
    point::{ClusterId, ClusterLabel},
    result::Labelling,
};

pub(crate) use self::union_find::ConcurrentUnionFind;

/// Errors reported by the concurrent union-find while merging core points.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnionFindError {
    /// A synchronisation primitive became poisoned after a panic.
    #[error("lock for {resource} is poisoned")]
    LockPoisoned {
        /// Name of the locked resource that was poisoned.
        resource: &'static str,
    },
    /// An internal invariant was violated, indicating a logic error.
    #[error("union-find invariant violated: {invariant} (index {index}, lock_count {lock_count})")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
        /// The index that violated the invariant.
        index: usize,
        /// The number of locks available.
        lock_count: usize,
    },
    /// The parent or lock table could not be allocated.
    #[error("failed to allocate union-find tables for {requested} points")]
    AllocationFailed {
        /// Number of points the tables needed to cover.
        requested: usize,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`UnionFindError`].
    enum UnionFindErrorCode for UnionFindError {
        /// A synchronisation primitive became poisoned after a panic.
        LockPoisoned => LockPoisoned { .. } => "UNION_FIND_LOCK_POISONED",
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "UNION_FIND_INVARIANT_VIOLATION",
        /// The parent or lock table could not be allocated.
        AllocationFailed => AllocationFailed { .. } => "UNION_FIND_ALLOCATION_FAILED",
    }
}

impl From<UnionFindError> for DbscanError {
    fn from(error: UnionFindError) -> Self {
        match error {
            UnionFindError::AllocationFailed { requested } => Self::AllocationFailed {
                context: "union-find tables",
                requested,
            },
            other => Self::UnionFind {
                code: Arc::from(other.code().as_str()),
                message: Arc::from(other.to_string()),
            },
        }
    }
}

/// Labels every point reachable through `query` with the parallel engine.
///
/// Runs on the rayon pool the caller is installed in.
#[instrument(
    name = "dbscan.parallel",
    err,
    skip_all,
    fields(points = query.len()),
)]
pub(crate) fn cluster_parallel<Q>(query: &Q, params: DbscanParams) -> Result<Labelling>
where
    Q: RegionQuery + Sync + ?Sized,
{
    let len = query.len();
    let epsilon = params.epsilon();

    let mut neighbours = filled_checked(len, Vec::new(), "neighbour lists")?;
    neighbours
        .par_iter_mut()
        .enumerate()
        .try_for_each(|(index, list)| query.neighbours_into(index, epsilon, list))?;
    let mut is_core = with_capacity_checked(len, "core flags")?;
    neighbours
        .par_iter()
        .map(|list| params.is_core(list.len()))
        .collect_into_vec(&mut is_core);
    let core_count = is_core.iter().filter(|&&core| core).count();
    debug!(core_points = core_count, "neighbourhoods discovered");

    let forest = ConcurrentUnionFind::new(len)?;
    let unions = merge_core_points(&forest, &neighbours, &is_core)?;
    debug!(unions, components = forest.components(), "core points merged");

    let mut roots = filled_checked(len, None, "root table")?;
    roots
        .par_iter_mut()
        .enumerate()
        .filter(|&(index, _)| is_core[index])
        .try_for_each(|(index, root)| {
            *root = Some(forest.find(index)?);
            Ok::<_, UnionFindError>(())
        })?;
    let (cluster_ids, cluster_count) = number_roots(&roots)?;

    let mut labels = with_capacity_checked(len, "label table")?;
    (0..len)
        .into_par_iter()
        .map(|index| {
            let root = roots[index].or_else(|| {
                neighbours[index]
                    .iter()
                    .find_map(|&neighbour| roots.get(neighbour).copied().flatten())
            });
            root.and_then(|root| cluster_ids.get(root).copied().flatten())
                .map_or(ClusterLabel::Noise, ClusterLabel::Cluster)
        })
        .collect_into_vec(&mut labels);

    Ok(Labelling {
        labels,
        core_count,
        cluster_count,
    })
}

/// Unions every core point with each of its core neighbours and returns the
/// number of merges performed.
fn merge_core_points(
    forest: &ConcurrentUnionFind,
    neighbours: &[Vec<usize>],
    is_core: &[bool],
) -> core::result::Result<usize, UnionFindError> {
    neighbours
        .par_iter()
        .enumerate()
        .filter(|&(index, _)| is_core[index])
        .map(|(index, list)| {
            let mut merged = 0_usize;
            for &neighbour in list {
                if is_core.get(neighbour).copied().unwrap_or(false)
                    && forest.union(index, neighbour)?
                {
                    merged += 1;
                }
            }
            Ok::<_, UnionFindError>(merged)
        })
        .try_reduce(|| 0, |left, right| Ok(left + right))
}

/// Assigns dense cluster ids to roots in the order they first appear.
fn number_roots(roots: &[Option<usize>]) -> Result<(Vec<Option<ClusterId>>, usize)> {
    let mut ids = filled_checked(roots.len(), None, "cluster id map")?;
    let mut next_id = ClusterId::FIRST;
    let mut cluster_count = 0;
    for root in roots.iter().flatten() {
        if let Some(slot) = ids.get_mut(*root)
            && slot.is_none()
        {
            *slot = Some(next_id);
            next_id = next_id.next();
            cluster_count += 1;
        }
    }
    Ok((ids, cluster_count))
}
