use std::sync::Arc;

use pardbscan_core::{DbscanError, DbscanErrorCode, ExecutionStrategy};
use rstest::rstest;

#[rstest]
#[case(
    DbscanError::InvalidEpsilon { got: -1.0 },
    DbscanErrorCode::InvalidEpsilon,
    "DBSCAN_INVALID_EPSILON",
)]
#[case(
    DbscanError::InvalidMinPoints { got: 0 },
    DbscanErrorCode::InvalidMinPoints,
    "DBSCAN_INVALID_MIN_POINTS",
)]
#[case(
    DbscanError::InvalidThreadCount,
    DbscanErrorCode::InvalidThreadCount,
    "DBSCAN_INVALID_THREAD_COUNT",
)]
#[case(
    DbscanError::BackendUnavailable { requested: ExecutionStrategy::Parallel },
    DbscanErrorCode::BackendUnavailable,
    "DBSCAN_BACKEND_UNAVAILABLE",
)]
#[case(
    DbscanError::AllocationFailed { context: "neighbour list", requested: 8 },
    DbscanErrorCode::AllocationFailed,
    "DBSCAN_ALLOCATION_FAILED",
)]
#[case(
    DbscanError::ThreadPool { message: Arc::from("no threads") },
    DbscanErrorCode::ThreadPool,
    "DBSCAN_THREAD_POOL",
)]
#[case(
    DbscanError::UnionFind {
        code: Arc::from("UNION_FIND_LOCK_POISONED"),
        message: Arc::from("lock for union-find root lock is poisoned"),
    },
    DbscanErrorCode::UnionFind,
    "DBSCAN_UNION_FIND",
)]
fn returns_expected_dbscan_code(
    #[case] error: DbscanError,
    #[case] expected: DbscanErrorCode,
    #[case] symbol: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), symbol);
    assert_eq!(expected.to_string(), symbol);
}

#[rstest]
#[case(
    DbscanError::InvalidEpsilon { got: 0.0 },
    "epsilon must be a finite value greater than zero (got 0)",
)]
#[case(
    DbscanError::AllocationFailed { context: "cluster frontier", requested: 3 },
    "failed to allocate 3 slots for cluster frontier",
)]
fn renders_human_readable_messages(#[case] error: DbscanError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[cfg(feature = "parallel")]
#[rstest]
#[case(
    pardbscan_core::UnionFindError::LockPoisoned { resource: "union-find root lock" },
    pardbscan_core::UnionFindErrorCode::LockPoisoned,
    "UNION_FIND_LOCK_POISONED",
)]
#[case(
    pardbscan_core::UnionFindError::InvariantViolation {
        invariant: "root lock index must be within the lock table",
        index: 4,
        lock_count: 2,
    },
    pardbscan_core::UnionFindErrorCode::InvariantViolation,
    "UNION_FIND_INVARIANT_VIOLATION",
)]
#[case(
    pardbscan_core::UnionFindError::AllocationFailed { requested: 10 },
    pardbscan_core::UnionFindErrorCode::AllocationFailed,
    "UNION_FIND_ALLOCATION_FAILED",
)]
fn returns_expected_union_find_code(
    #[case] error: pardbscan_core::UnionFindError,
    #[case] expected: pardbscan_core::UnionFindErrorCode,
    #[case] symbol: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), symbol);
}
