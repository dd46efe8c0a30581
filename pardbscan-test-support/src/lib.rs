//! Shared test utilities used across the pardbscan crates.
//!
//! - [`tracing`] records spans and events so suites can assert the
//!   instrumentation emitted by the engines.
//! - [`proptest_profile`] reads the environment overrides that tune property
//!   suites in CI.

pub mod proptest_profile;
pub mod tracing;
