//! Density-based clustering (DBSCAN) for 2D points.
//!
//! Two engines implement the same contract. The sequential engine grows one
//! cluster at a time from a frontier; the parallel engine (behind the
//! `parallel` feature) discovers neighbourhoods concurrently and merges core
//! points through a lock-ordered concurrent union-find. Both query
//! neighbourhoods without counting the point itself, so a point is core when
//! at least `min_points` other points lie within `epsilon` of it.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod buffer;
mod builder;
mod dbscan;
mod distance;
mod error;
mod neighbourhood;
#[cfg(feature = "parallel")]
mod parallel;
mod point;
mod result;
mod sequential;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{DEFAULT_EPSILON, DEFAULT_MIN_POINTS, DbscanBuilder, DbscanParams, ExecutionStrategy},
    dbscan::Dbscan,
    distance::{euclidean_distance, within_radius},
    error::{DbscanError, DbscanErrorCode, Result},
    neighbourhood::{BruteForce, RegionQuery},
    point::{ClusterId, ClusterLabel, Dataset, Point},
    result::ClusteringResult,
};

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub use crate::parallel::{UnionFindError, UnionFindErrorCode};
