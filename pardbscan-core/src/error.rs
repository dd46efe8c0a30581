//! Error types for the DBSCAN core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::{collections::TryReserveError, fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Error type produced when configuring or running [`crate::Dbscan`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DbscanError {
    /// The neighbourhood radius must be finite and strictly positive.
    #[error("epsilon must be a finite value greater than zero (got {got})")]
    InvalidEpsilon {
        /// The rejected radius.
        got: f64,
    },
    /// The density threshold must be at least one.
    #[error("min_points must be at least 1 (got {got})")]
    InvalidMinPoints {
        /// The rejected threshold.
        got: usize,
    },
    /// A dedicated worker pool needs at least one thread.
    #[error("thread count must be at least 1 when set explicitly")]
    InvalidThreadCount,
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// Growing a working buffer failed.
    #[error("failed to allocate {requested} slots for {context}")]
    AllocationFailed {
        /// The buffer that could not grow.
        context: &'static str,
        /// Number of elements the buffer needed to hold.
        requested: usize,
    },
    /// The dedicated worker pool could not be started.
    #[error("failed to build worker pool: {message}")]
    ThreadPool {
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
    /// The concurrent union-find reported a failure while merging core points.
    #[error("union-find failure {code}: {message}")]
    UnionFind {
        /// Stable code of the underlying union-find error.
        code: Arc<str>,
        /// Human-readable description of the failure.
        message: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`DbscanError`] variants.
    enum DbscanErrorCode for DbscanError {
        /// The neighbourhood radius must be finite and strictly positive.
        InvalidEpsilon => InvalidEpsilon { .. } => "DBSCAN_INVALID_EPSILON",
        /// The density threshold must be at least one.
        InvalidMinPoints => InvalidMinPoints { .. } => "DBSCAN_INVALID_MIN_POINTS",
        /// A dedicated worker pool needs at least one thread.
        InvalidThreadCount => InvalidThreadCount => "DBSCAN_INVALID_THREAD_COUNT",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "DBSCAN_BACKEND_UNAVAILABLE",
        /// Growing a working buffer failed.
        AllocationFailed => AllocationFailed { .. } => "DBSCAN_ALLOCATION_FAILED",
        /// The dedicated worker pool could not be started.
        ThreadPool => ThreadPool { .. } => "DBSCAN_THREAD_POOL",
        /// The concurrent union-find reported a failure.
        UnionFind => UnionFind { .. } => "DBSCAN_UNION_FIND",
    }
}

impl DbscanError {
    pub(crate) fn allocation(
        context: &'static str,
        requested: usize,
    ) -> impl FnOnce(TryReserveError) -> Self {
        move |_| Self::AllocationFailed { context, requested }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DbscanError>;
