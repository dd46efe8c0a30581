//! Builder utilities for configuring DBSCAN runs.
//!
//! Exposes the execution strategy selection surface, the validated parameter
//! pair handed to the engines, and builder validation used before
//! constructing [`Dbscan`] instances.

use std::num::NonZeroUsize;

use crate::{Result, dbscan::Dbscan, error::DbscanError};

/// Radius used when the caller does not override it.
pub const DEFAULT_EPSILON: f64 = 1.0;
/// Density threshold used when the caller does not override it.
pub const DEFAULT_MIN_POINTS: usize = 3;

/// Indicates which engine [`Dbscan`] runs when [`Dbscan::run`] is invoked.
///
/// `Auto` resolves deterministically: it selects the parallel engine when the
/// `parallel` feature is compiled in and the sequential engine otherwise.
///
/// # Examples
/// ```
/// use pardbscan_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionStrategy {
    /// Allow the library to select an engine automatically.
    Auto,
    /// Single-threaded frontier expansion.
    Sequential,
    /// Three-phase parallel engine built on a concurrent union-find.
    Parallel,
}

/// Validated clustering parameters.
///
/// `min_points` counts neighbours other than the point itself: a point is
/// core when at least `min_points` other points lie within `epsilon`.
///
/// # Examples
/// ```
/// use pardbscan_core::DbscanParams;
///
/// let params = DbscanParams::new(0.5, 4)?;
/// assert_eq!(params.epsilon(), 0.5);
/// assert_eq!(params.min_points().get(), 4);
/// # Ok::<(), pardbscan_core::DbscanError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbscanParams {
    epsilon: f64,
    min_points: NonZeroUsize,
}

impl DbscanParams {
    /// Validates and bundles the radius and density threshold.
    ///
    /// # Errors
    /// Returns [`DbscanError::InvalidEpsilon`] when `epsilon` is not finite or
    /// not strictly positive, and [`DbscanError::InvalidMinPoints`] when
    /// `min_points` is zero.
    pub fn new(epsilon: f64, min_points: usize) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(DbscanError::InvalidEpsilon { got: epsilon });
        }
        let min_points = NonZeroUsize::new(min_points)
            .ok_or(DbscanError::InvalidMinPoints { got: min_points })?;
        Ok(Self {
            epsilon,
            min_points,
        })
    }

    /// Returns the neighbourhood radius.
    #[rustfmt::skip]
    #[must_use]
    pub const fn epsilon(&self) -> f64 { self.epsilon }

    /// Returns the density threshold.
    #[rustfmt::skip]
    #[must_use]
    pub const fn min_points(&self) -> NonZeroUsize { self.min_points }

    /// Returns `true` when a neighbour count qualifies a point as core.
    #[must_use]
    pub const fn is_core(&self, neighbour_count: usize) -> bool {
        neighbour_count >= self.min_points.get()
    }
}

/// Configures and constructs [`Dbscan`] instances.
///
/// # Examples
/// ```
/// use pardbscan_core::{DbscanBuilder, ExecutionStrategy};
///
/// let dbscan = DbscanBuilder::new()
///     .with_epsilon(0.75)
///     .with_min_points(4)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(dbscan.params().min_points().get(), 4);
/// assert_eq!(dbscan.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct DbscanBuilder {
    epsilon: f64,
    min_points: usize,
    execution_strategy: ExecutionStrategy,
    threads: Option<usize>,
}

impl Default for DbscanBuilder {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            min_points: DEFAULT_MIN_POINTS,
            execution_strategy: ExecutionStrategy::Auto,
            threads: None,
        }
    }
}

impl DbscanBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use pardbscan_core::{DbscanBuilder, ExecutionStrategy};
    ///
    /// let builder = DbscanBuilder::new();
    /// assert_eq!(builder.epsilon(), 1.0);
    /// assert_eq!(builder.min_points(), 3);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.threads(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the neighbourhood radius.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the configured neighbourhood radius.
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Overrides the density threshold.
    ///
    /// # Examples
    /// ```
    /// use pardbscan_core::DbscanBuilder;
    ///
    /// let builder = DbscanBuilder::new().with_min_points(10);
    /// assert_eq!(builder.min_points(), 10);
    /// ```
    #[must_use]
    pub const fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Returns the configured density threshold.
    #[must_use]
    pub const fn min_points(&self) -> usize {
        self.min_points
    }

    /// Sets the execution strategy to use when running.
    #[must_use]
    pub const fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Requests a dedicated worker pool of `threads` workers for parallel runs.
    ///
    /// `None` runs on the global rayon pool. The sequential engine ignores
    /// this setting.
    ///
    /// # Examples
    /// ```
    /// use pardbscan_core::DbscanBuilder;
    ///
    /// let builder = DbscanBuilder::new().with_threads(Some(2));
    /// assert_eq!(builder.threads(), Some(2));
    /// ```
    #[must_use]
    pub const fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Returns the requested worker count, if any.
    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Validates the configuration and constructs a [`Dbscan`] instance.
    ///
    /// # Errors
    /// Returns [`DbscanError::InvalidEpsilon`], [`DbscanError::InvalidMinPoints`]
    /// or [`DbscanError::InvalidThreadCount`] when the corresponding setting is
    /// out of range.
    ///
    /// # Examples
    /// ```
    /// use pardbscan_core::DbscanBuilder;
    ///
    /// let dbscan = DbscanBuilder::new().build().expect("configuration is valid");
    /// assert_eq!(dbscan.params().epsilon(), 1.0);
    /// ```
    pub fn build(self) -> Result<Dbscan> {
        let params = DbscanParams::new(self.epsilon, self.min_points)?;
        let threads = match self.threads {
            None => None,
            Some(count) => Some(NonZeroUsize::new(count).ok_or(DbscanError::InvalidThreadCount)?),
        };

        Ok(Dbscan::new(params, self.execution_strategy, threads))
    }
}
