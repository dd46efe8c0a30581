//! Shared test utilities for `pardbscan-core`.

use std::sync::atomic::{AtomicUsize, Ordering};

use pardbscan_test_support::proptest_profile::ProptestRunProfile;
use proptest::{collection::vec, prelude::*, test_runner::Config as ProptestConfig};

use crate::{
    error::Result,
    neighbourhood::{BruteForce, RegionQuery},
    point::Point,
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `PARDBSCAN_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Points snapped to a coarse grid so that exact-radius ties and dense
/// clumps show up often.
pub(crate) fn grid_points(max_len: usize) -> impl Strategy<Value = Vec<Point>> {
    vec((0_u8..12, 0_u8..12), 0..=max_len).prop_map(|cells| {
        cells
            .into_iter()
            .map(|(x, y)| Point::new(f64::from(x) * 0.5, f64::from(y) * 0.5))
            .collect()
    })
}

/// [`RegionQuery`] wrapper that counts how often each point is queried.
pub(crate) struct CountingQuery<'a> {
    inner: BruteForce<'a>,
    calls: Vec<AtomicUsize>,
}

impl<'a> CountingQuery<'a> {
    pub(crate) fn new(points: &'a [Point]) -> Self {
        Self {
            inner: BruteForce::new(points),
            calls: points.iter().map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    /// Returns the per-point query counts.
    pub(crate) fn calls(&self) -> Vec<usize> {
        self.calls
            .iter()
            .map(|count| count.load(Ordering::Relaxed))
            .collect()
    }
}

impl RegionQuery for CountingQuery<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn neighbours_into(&self, index: usize, epsilon: f64, out: &mut Vec<usize>) -> Result<()> {
        if let Some(count) = self.calls.get(index) {
            count.fetch_add(1, Ordering::Relaxed);
        }
        self.inner.neighbours_into(index, epsilon, out)
    }
}
