//! Euclidean geometry on plane points.
//!
//! Coordinates are not validated. A non-finite coordinate yields a NaN (or
//! infinite) distance, and every radius comparison against NaN is false, so
//! such a point never has neighbours and always ends up as noise.

use crate::point::Point;

/// Computes the Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use pardbscan_core::{Point, euclidean_distance};
///
/// let distance = euclidean_distance(&Point::new(1.0, 2.0), &Point::new(4.0, 6.0));
/// assert!((distance - 5.0).abs() < 1e-12);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "distance computation requires floating-point arithmetic"
)]
#[must_use]
pub fn euclidean_distance(left: &Point, right: &Point) -> f64 {
    let dx = left.x - right.x;
    let dy = left.y - right.y;
    (dx * dx + dy * dy).sqrt()
}

/// Returns `true` when `right` lies within `epsilon` of `left`, boundary
/// included.
///
/// # Examples
///
/// ```
/// use pardbscan_core::{Point, within_radius};
///
/// assert!(within_radius(&Point::new(0.0, 0.0), &Point::new(1.0, 0.0), 1.0));
/// assert!(!within_radius(&Point::new(0.0, 0.0), &Point::new(f64::NAN, 0.0), 1.0));
/// ```
#[must_use]
pub fn within_radius(left: &Point, right: &Point, epsilon: f64) -> bool {
    euclidean_distance(left, right) <= epsilon
}
