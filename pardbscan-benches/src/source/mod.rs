//! Synthetic 2D point clouds for benchmarking.
//!
//! Points are drawn from isotropic Gaussian blobs whose centroids sit evenly
//! spaced on a circle. Generation is fully determined by the configured seed.

mod generation;

use generation::{blob_centroids, standard_normal_sample, validate_blob_config};
use pardbscan_core::Dataset;
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;

/// Errors raised while generating synthetic data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested cluster count was zero.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// The configured cluster count exceeded the available points.
    #[error("cluster count ({cluster_count}) must not exceed point count ({point_count})")]
    ClusterCountExceedsPointCount {
        /// Number of clusters requested.
        cluster_count: usize,
        /// Number of points requested.
        point_count: usize,
    },
    /// A floating-point generator parameter was invalid.
    #[error("invalid floating-point parameter `{parameter}`")]
    InvalidFloatParameter {
        /// Name of the invalid parameter.
        parameter: &'static str,
    },
}

/// Configuration for Gaussian blob synthetic data.
#[derive(Clone, Debug)]
pub struct GaussianBlobConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Number of Gaussian clusters.
    pub cluster_count: usize,
    /// Standard deviation of every blob along both axes.
    pub cluster_std: f64,
    /// Radius of the circle the centroids are placed on.
    pub separation: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Points drawn from Gaussian blobs together with their generating blob.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianBlobs {
    coordinates: Vec<(f64, f64)>,
    labels: Vec<usize>,
}

impl GaussianBlobs {
    /// Generates blobs according to `config`.
    ///
    /// Points are assigned to blobs in round-robin order, so blob sizes
    /// differ by at most one.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    ///
    /// # Examples
    /// ```
    /// use pardbscan_benches::source::{GaussianBlobConfig, GaussianBlobs};
    ///
    /// let blobs = GaussianBlobs::generate(&GaussianBlobConfig {
    ///     point_count: 10,
    ///     cluster_count: 2,
    ///     cluster_std: 0.1,
    ///     separation: 5.0,
    ///     seed: 3,
    /// })?;
    /// assert_eq!(blobs.len(), 10);
    /// assert_eq!(&blobs.labels()[..4], &[0, 1, 0, 1]);
    /// # Ok::<(), pardbscan_benches::source::SyntheticError>(())
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "Gaussian data generation requires floating-point arithmetic"
    )]
    pub fn generate(config: &GaussianBlobConfig) -> Result<Self, SyntheticError> {
        validate_blob_config(config)?;

        let centroids = blob_centroids(config);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut coordinates = Vec::with_capacity(config.point_count);
        let mut labels = Vec::with_capacity(config.point_count);
        for (label, &(cx, cy)) in centroids
            .iter()
            .enumerate()
            .cycle()
            .take(config.point_count)
        {
            let dx = standard_normal_sample(&mut rng)?;
            let dy = standard_normal_sample(&mut rng)?;
            coordinates.push((cx + dx * config.cluster_std, cy + dy * config.cluster_std));
            labels.push(label);
        }

        Ok(Self {
            coordinates,
            labels,
        })
    }

    /// Returns the generated `(x, y)` pairs.
    #[must_use]
    #[rustfmt::skip]
    pub fn coordinates(&self) -> &[(f64, f64)] { &self.coordinates }

    /// Returns the blob each point was drawn from.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[usize] { &self.labels }

    /// Returns the number of generated points.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.coordinates.len() }

    /// Returns `true` when no points were generated.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.coordinates.is_empty() }

    /// Builds an unclassified [`Dataset`] from the generated points.
    #[must_use]
    pub fn to_dataset(&self) -> Dataset {
        Dataset::from_coordinates(self.coordinates.iter().copied())
    }
}
