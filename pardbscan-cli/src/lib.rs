//! Library surface backing the `pardbscan` binary.
//!
//! Exposes argument parsing, CSV ingestion and emission, and logging
//! initialisation so the binary stays a thin shell and the pieces can be
//! exercised from tests.

pub mod cli;
pub mod logging;
