//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary CSV files and assert error handling
//! behaviour. These helpers keep the test cases concise and consistent.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::commands::run_command;
use super::{CliError, RunCommand, StrategyArg};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_csv(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// A `run` command over `input` writing `labels.csv` next to it.
pub(super) fn command(input: &Path, epsilon: f64, min_points: usize) -> RunCommand {
    let output = input.with_file_name("labels.csv");
    RunCommand {
        input: input.to_path_buf(),
        output,
        epsilon,
        min_points,
        strategy: StrategyArg::Sequential,
        threads: None,
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
