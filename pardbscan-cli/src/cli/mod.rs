//! Command-line interface orchestration for `pardbscan`.
//!
//! The CLI offers a single `run` command that reads a headerless CSV of
//! `x,y` pairs, clusters it with the configured engine and writes the
//! labelled points back out as CSV.

mod commands;
mod csv;

pub use commands::{
    Cli, CliError, Command, RunCommand, RunSummary, StrategyArg, render_summary, run_cli,
};
pub use csv::{parse_points, read_points, write_points};

#[cfg(test)]
mod test_helpers;
