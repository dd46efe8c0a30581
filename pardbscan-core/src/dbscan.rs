//! Clustering orchestration for the DBSCAN library.
//!
//! Provides the [`Dbscan`] runtime entry point and the helpers that resolve
//! the execution strategy and run the parallel engine on a dedicated pool.

use std::num::NonZeroUsize;

use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::{DbscanParams, ExecutionStrategy},
    error::DbscanError,
    neighbourhood::{BruteForce, RegionQuery},
    point::Dataset,
    result::{ClusteringResult, Labelling},
    sequential::cluster_sequential,
};

/// Entry point for running DBSCAN over a set of 2D points.
///
/// # Examples
/// ```
/// use pardbscan_core::{ClusterLabel, Dataset, DbscanBuilder};
///
/// let dbscan = DbscanBuilder::new()
///     .with_epsilon(0.5)
///     .with_min_points(2)
///     .build()
///     .expect("builder must succeed");
/// let mut dataset = Dataset::from_coordinates([
///     (0.0, 0.0),
///     (0.3, 0.0),
///     (0.0, 0.3),
///     (5.0, 5.0),
/// ]);
/// let result = dbscan.run(&mut dataset).expect("run must succeed");
/// assert_eq!(result.cluster_count(), 1);
/// assert_eq!(dataset.points()[3].label(), ClusterLabel::Noise);
/// ```
#[derive(Debug, Clone)]
pub struct Dbscan {
    params: DbscanParams,
    execution_strategy: ExecutionStrategy,
    threads: Option<NonZeroUsize>,
}

impl Dbscan {
    pub(crate) const fn new(
        params: DbscanParams,
        execution_strategy: ExecutionStrategy,
        threads: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            params,
            execution_strategy,
            threads,
        }
    }

    /// Returns the validated clustering parameters.
    #[must_use]
    pub const fn params(&self) -> DbscanParams {
        self.params
    }

    /// Returns the execution strategy that will be used when running.
    ///
    /// # Examples
    /// ```
    /// use pardbscan_core::{DbscanBuilder, ExecutionStrategy};
    ///
    /// let dbscan = DbscanBuilder::new()
    ///     .with_execution_strategy(ExecutionStrategy::Sequential)
    ///     .build()
    ///     .expect("builder must apply execution strategy");
    /// assert_eq!(dbscan.execution_strategy(), ExecutionStrategy::Sequential);
    /// ```
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the size of the dedicated worker pool, if one was requested.
    #[must_use]
    pub const fn threads(&self) -> Option<NonZeroUsize> {
        self.threads
    }

    /// Resolves [`ExecutionStrategy::Auto`] and rejects strategies missing
    /// from this build.
    ///
    /// # Errors
    /// Returns [`DbscanError::BackendUnavailable`] when the parallel engine is
    /// requested but the `parallel` feature is disabled.
    pub const fn resolved_strategy(&self) -> Result<ExecutionStrategy> {
        match self.execution_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto | ExecutionStrategy::Parallel => {
                Ok(ExecutionStrategy::Parallel)
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => Ok(ExecutionStrategy::Sequential),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(DbscanError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
            ExecutionStrategy::Sequential => Ok(ExecutionStrategy::Sequential),
        }
    }

    /// Clusters `dataset` in place and returns a summary of the run.
    ///
    /// Labels are written only once the engine has finished; on error the
    /// dataset keeps its previous labels.
    ///
    /// # Errors
    /// Returns [`DbscanError::BackendUnavailable`] when the requested engine
    /// is not compiled in, [`DbscanError::ThreadPool`] when the dedicated pool
    /// cannot start, and [`DbscanError::AllocationFailed`] or
    /// [`DbscanError::UnionFind`] when the engine fails.
    pub fn run(&self, dataset: &mut Dataset) -> Result<ClusteringResult> {
        let result = self.cluster_with(&BruteForce::new(dataset.points()))?;
        dataset.apply_labels(result.labels());
        Ok(result)
    }

    /// Clusters the points behind `query` without touching any dataset.
    ///
    /// # Errors
    /// Returns the same errors as [`Dbscan::run`].
    ///
    /// # Examples
    /// ```
    /// use pardbscan_core::{BruteForce, DbscanBuilder, Point};
    ///
    /// let points = [Point::new(0.0, 0.0), Point::new(0.5, 0.0)];
    /// let dbscan = DbscanBuilder::new().with_min_points(1).build()?;
    /// let result = dbscan.cluster_with(&BruteForce::new(&points))?;
    /// assert_eq!(result.cluster_count(), 1);
    /// # Ok::<(), pardbscan_core::DbscanError>(())
    /// ```
    #[instrument(
        name = "dbscan.run",
        err,
        skip_all,
        fields(
            points = query.len(),
            epsilon = self.params.epsilon(),
            min_points = self.params.min_points().get(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn cluster_with<Q>(&self, query: &Q) -> Result<ClusteringResult>
    where
        Q: RegionQuery + Sync + ?Sized,
    {
        let strategy = self.resolved_strategy()?;
        if query.is_empty() {
            debug!("dataset is empty, nothing to cluster");
            return Ok(ClusteringResult::new(Labelling::empty(), strategy));
        }

        let labelling = match strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => self.run_parallel(query)?,
            _ => cluster_sequential(query, self.params)?,
        };
        let result = ClusteringResult::new(labelling, strategy);
        info!(
            clusters = result.cluster_count(),
            noise = result.noise_count(),
            core_points = result.core_count(),
            "clustering completed"
        );
        Ok(result)
    }

    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    fn run_parallel<Q>(&self, query: &Q) -> Result<Labelling>
    where
        Q: RegionQuery + Sync + ?Sized,
    {
        use crate::parallel::cluster_parallel;

        let Some(threads) = self.threads else {
            return cluster_parallel(query, self.params);
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .thread_name(|index| format!("pardbscan-worker-{index}"))
            .build()
            .map_err(|error| DbscanError::ThreadPool {
                message: error.to_string().into(),
            })?;
        // Keep the caller's subscriber so the engine span stays attached.
        let dispatch = tracing::dispatcher::get_default(Clone::clone);
        pool.install(|| {
            tracing::dispatcher::with_default(&dispatch, || cluster_parallel(query, self.params))
        })
    }
}
