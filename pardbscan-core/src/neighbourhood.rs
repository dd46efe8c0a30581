//! Neighbourhood queries shared by both engines.
//!
//! A query never reports the point itself: a point is core when at least
//! `min_points` *other* points lie within `epsilon` of it. Both engines go
//! through the same [`RegionQuery`] implementation so the threshold cannot
//! drift between modes.

use crate::{
    buffer::push_checked,
    distance::within_radius,
    error::Result,
    point::Point,
};

/// Abstraction over a collection of points that can answer radius queries.
///
/// Implementations must return the same result set as a brute-force scan:
/// every index `i != index` whose point lies within `epsilon` of the point at
/// `index` (boundary included), in ascending index order. A spatial index may
/// sit behind this trait as long as it preserves that contract.
///
/// # Examples
/// ```
/// use pardbscan_core::{BruteForce, Point, RegionQuery};
///
/// let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(3.0, 0.0)];
/// let query = BruteForce::new(&points);
/// assert_eq!(query.len(), 3);
/// assert_eq!(query.neighbours(0, 1.0)?, [1]);
/// assert!(query.neighbours(2, 1.0)?.is_empty());
/// # Ok::<(), pardbscan_core::DbscanError>(())
/// ```
pub trait RegionQuery {
    /// Returns the number of points the query ranges over.
    fn len(&self) -> usize;

    /// Returns whether the query ranges over no points.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the neighbours of `index` to `out`.
    ///
    /// # Errors
    /// Returns [`crate::DbscanError::AllocationFailed`] when `out` cannot grow. The
    /// contents of `out` are unspecified after an error.
    fn neighbours_into(&self, index: usize, epsilon: f64, out: &mut Vec<usize>) -> Result<()>;

    /// Collects the neighbours of `index` into a fresh vector.
    ///
    /// # Errors
    /// Returns any error surfaced by [`RegionQuery::neighbours_into`].
    fn neighbours(&self, index: usize, epsilon: f64) -> Result<Vec<usize>> {
        let mut out = Vec::new();
        self.neighbours_into(index, epsilon, &mut out)?;
        Ok(out)
    }
}

/// Linear scan over every point for each query.
#[derive(Debug, Clone, Copy)]
pub struct BruteForce<'a> {
    points: &'a [Point],
}

impl<'a> BruteForce<'a> {
    /// Wraps a slice of points.
    #[must_use]
    pub const fn new(points: &'a [Point]) -> Self {
        Self { points }
    }
}

impl RegionQuery for BruteForce<'_> {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn neighbours_into(&self, index: usize, epsilon: f64, out: &mut Vec<usize>) -> Result<()> {
        let Some(centre) = self.points.get(index) else {
            // Out-of-range indices have no neighbours.
            return Ok(());
        };
        for (candidate, point) in self.points.iter().enumerate() {
            if candidate != index && within_radius(centre, point, epsilon) {
                push_checked(out, candidate, "neighbour list")?;
            }
        }
        Ok(())
    }
}
