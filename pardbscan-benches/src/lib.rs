//! Benchmark support crate for pardbscan.
//!
//! Provides the synthetic Gaussian-blob generator and parameter types used by
//! the Criterion benchmarks that compare the sequential and parallel engines.

pub mod error;
pub mod params;
pub mod source;
