//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise during benchmark data preparation so
//! that setup functions can propagate failures with `?` instead of using
//! `.expect()`.

use crate::source::SyntheticError;
use pardbscan_core::DbscanError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Engine configuration or execution failed.
    #[error("DBSCAN setup failed: {0}")]
    Dbscan(#[from] DbscanError),
}
