//! Concurrent union-find used to merge core points during the parallel run.
//!
//! Disjoint unions proceed in parallel while a fixed lock ordering keeps the
//! merge deadlock-free.
//!
//! The implementation uses one lock per point index (acquired by root id),
//! locking `(min_root, max_root)` so two threads merging the same pair from
//! opposite ends wait on the same first lock. Each union re-validates that the
//! roots used to derive the lock order are still current after acquiring the
//! locks; if they changed, the attempt is retried.
//!
//! The lower root always absorbs the higher one, so every parent pointer refers
//! to a strictly smaller index and the root of a set is its minimum member.
//! `find` shortens paths by halving: a node is redirected to its grandparent
//! only when that lowers its pointer. Pointers therefore only ever decrease,
//! so racing `find` and `union` calls can never close a cycle.

use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicUsize, Ordering},
};

use super::UnionFindError;

pub(crate) struct ConcurrentUnionFind {
    parents: Vec<AtomicUsize>,
    components: AtomicUsize,
    locks: Vec<Mutex<()>>,
}

impl ConcurrentUnionFind {
    pub(crate) fn new(node_count: usize) -> Result<Self, UnionFindError> {
        let mut parents = Vec::new();
        parents
            .try_reserve_exact(node_count)
            .map_err(|_| UnionFindError::AllocationFailed {
                requested: node_count,
            })?;
        parents.extend((0..node_count).map(AtomicUsize::new));

        let mut locks = Vec::new();
        locks
            .try_reserve_exact(node_count)
            .map_err(|_| UnionFindError::AllocationFailed {
                requested: node_count,
            })?;
        locks.extend((0..node_count).map(|_| Mutex::new(())));

        Ok(Self {
            parents,
            components: AtomicUsize::new(node_count),
            locks,
        })
    }

    /// Number of disjoint sets remaining.
    pub(crate) fn components(&self) -> usize {
        self.components.load(Ordering::Acquire)
    }

    /// Merges the sets holding `left` and `right`.
    ///
    /// Returns `Ok(true)` when two sets were merged and `Ok(false)` when the
    /// indices already shared a root.
    pub(crate) fn union(&self, left: usize, right: usize) -> Result<bool, UnionFindError> {
        loop {
            let left_root = self.find(left)?;
            let right_root = self.find(right)?;

            if left_root == right_root {
                return Ok(false);
            }

            let lock_pair = lock_order(left_root, right_root);
            let (first_lock, second_lock) = lock_pair;
            let _first_guard = self.lock_root(first_lock)?;
            let _second_guard = self.lock_root(second_lock)?;

            let left_root = self.find(left)?;
            let right_root = self.find(right)?;

            if left_root == right_root {
                return Ok(false);
            }

            if lock_order(left_root, right_root) != lock_pair {
                continue;
            }

            if !self.is_root(first_lock) || !self.is_root(second_lock) {
                continue;
            }

            self.parents[second_lock].store(first_lock, Ordering::Release);
            self.components.fetch_sub(1, Ordering::AcqRel);
            return Ok(true);
        }
    }

    /// Returns the root of the set holding `node`, halving the traversed path.
    ///
    /// Safe to call without holding any lock.
    pub(crate) fn find(&self, node: usize) -> Result<usize, UnionFindError> {
        let parent_of = |index: usize| {
            self.parents
                .get(index)
                .map(|parent| parent.load(Ordering::Acquire))
                .ok_or(UnionFindError::InvariantViolation {
                    invariant: "node index must be within the parent table",
                    index,
                    lock_count: self.locks.len(),
                })
        };

        let mut current = node;
        loop {
            let parent = parent_of(current)?;
            if parent == current {
                return Ok(current);
            }
            let grandparent = parent_of(parent)?;
            if grandparent < parent {
                // A lost race means another thread already lowered the pointer.
                let _ = self.parents[current].compare_exchange(
                    parent,
                    grandparent,
                    Ordering::AcqRel,
                    Ordering::Relaxed,
                );
            }
            current = grandparent;
        }
    }

    fn lock_root(&self, index: usize) -> Result<MutexGuard<'_, ()>, UnionFindError> {
        let lock = self
            .locks
            .get(index)
            .ok_or(UnionFindError::InvariantViolation {
                invariant: "root lock index must be within the lock table",
                index,
                lock_count: self.locks.len(),
            })?;

        lock.lock().map_err(|_| UnionFindError::LockPoisoned {
            resource: "union-find root lock",
        })
    }

    fn is_root(&self, node: usize) -> bool {
        self.parents[node].load(Ordering::Acquire) == node
    }
}

fn lock_order(first: usize, second: usize) -> (usize, usize) {
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}
