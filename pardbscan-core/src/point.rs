//! Points, cluster labels and the dataset both engines label in place.

use std::{fmt, num::NonZeroU64};

/// Identifier assigned to a discovered cluster.
///
/// Ids are dense, start at one and follow discovery order. They carry no
/// meaning beyond uniqueness within a single run.
///
/// # Examples
/// ```
/// use pardbscan_core::ClusterId;
///
/// let id = ClusterId::new(4).expect("cluster ids are positive");
/// assert_eq!(id.get(), 4);
/// assert!(ClusterId::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(NonZeroU64);

impl ClusterId {
    /// The id handed to the first cluster of a run.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Creates a cluster identifier, returning `None` for zero.
    #[must_use]
    pub const fn new(id: u64) -> Option<Self> {
        match NonZeroU64::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0.get() }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification state of a single point.
///
/// Every point starts [`ClusterLabel::Unclassified`]. An engine run leaves
/// each point either [`ClusterLabel::Noise`] or inside a cluster.
///
/// # Examples
/// ```
/// use pardbscan_core::{ClusterId, ClusterLabel};
///
/// assert_eq!(ClusterLabel::Noise.as_i64(), -1);
/// assert_eq!(ClusterLabel::Unclassified.as_i64(), 0);
/// assert_eq!(ClusterLabel::Cluster(ClusterId::FIRST).as_i64(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClusterLabel {
    /// Not yet visited by an engine.
    #[default]
    Unclassified,
    /// Neither a core point nor within reach of one.
    Noise,
    /// Member of the identified cluster.
    Cluster(ClusterId),
}

impl ClusterLabel {
    /// Wire value used for unclassified points.
    pub const UNCLASSIFIED_VALUE: i64 = 0;
    /// Wire value used for noise points.
    pub const NOISE_VALUE: i64 = -1;

    /// Returns the integer encoding used by the CSV surface: `0` for
    /// unclassified, `-1` for noise and the positive id otherwise.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Unclassified => Self::UNCLASSIFIED_VALUE,
            Self::Noise => Self::NOISE_VALUE,
            Self::Cluster(id) => i64::try_from(id.get()).unwrap_or(i64::MAX),
        }
    }

    /// Returns the cluster id when the point belongs to a cluster.
    #[must_use]
    pub const fn cluster(self) -> Option<ClusterId> {
        match self {
            Self::Cluster(id) => Some(id),
            Self::Unclassified | Self::Noise => None,
        }
    }

    /// Returns `true` for noise points.
    #[must_use]
    pub const fn is_noise(self) -> bool {
        matches!(self, Self::Noise)
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// A point in the plane together with its current label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    label: ClusterLabel,
}

impl Point {
    /// Creates an unclassified point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            label: ClusterLabel::Unclassified,
        }
    }

    /// Returns the label written by the last engine run.
    #[rustfmt::skip]
    #[must_use]
    pub const fn label(&self) -> ClusterLabel { self.label }
}

/// Ordered collection of points. A point's index is its identity for the
/// duration of a run.
///
/// # Examples
/// ```
/// use pardbscan_core::{ClusterLabel, Dataset};
///
/// let dataset = Dataset::from_coordinates([(0.0, 0.0), (1.0, 2.0)]);
/// assert_eq!(dataset.len(), 2);
/// assert!(dataset.labels().all(|label| label == ClusterLabel::Unclassified));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    /// Builds an unclassified dataset from `(x, y)` pairs.
    pub fn from_coordinates(coordinates: impl IntoIterator<Item = (f64, f64)>) -> Self {
        coordinates.into_iter().collect()
    }

    /// Returns the points in index order.
    #[rustfmt::skip]
    #[must_use]
    pub fn points(&self) -> &[Point] { &self.points }

    /// Returns the number of points.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.points.len() }

    /// Returns `true` when the dataset holds no points.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Iterates over the labels in index order.
    pub fn labels(&self) -> impl ExactSizeIterator<Item = ClusterLabel> + '_ {
        self.points.iter().map(Point::label)
    }

    /// Overwrites every label. `labels` must hold one entry per point.
    pub(crate) fn apply_labels(&mut self, labels: &[ClusterLabel]) {
        debug_assert_eq!(labels.len(), self.points.len());
        for (point, label) in self.points.iter_mut().zip(labels) {
            point.label = *label;
        }
    }
}

impl FromIterator<(f64, f64)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(|(x, y)| Point::new(x, y)).collect(),
        }
    }
}
