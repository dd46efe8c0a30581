//! Command implementations and argument parsing for the `pardbscan` CLI.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand, ValueEnum};
use pardbscan_core::{
    ClusteringResult, DEFAULT_EPSILON, DEFAULT_MIN_POINTS, DbscanBuilder, DbscanError,
    ExecutionStrategy,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::csv::{read_points, save_points};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "pardbscan", about = "Cluster 2D points with DBSCAN.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a CSV of points and write the labelled points.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Headerless CSV with one `x,y` pair per line.
    pub input: PathBuf,

    /// Destination for the `x,y,cluster_id` CSV.
    pub output: PathBuf,

    /// Neighbourhood radius.
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Number of other points within the radius that makes a point core.
    #[arg(
        long = "min-points",
        default_value_t = DEFAULT_MIN_POINTS,
        value_parser = clap::value_parser!(usize),
    )]
    pub min_points: usize,

    /// Engine used to cluster the points.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Worker count for a dedicated thread pool (defaults to the global pool).
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Engine selection accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when compiled in, sequential otherwise.
    Auto,
    /// Single-threaded frontier expansion.
    Sequential,
    /// Three-phase parallel engine.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading input or writing output.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line of the input CSV could not be parsed.
    #[error("line {line}: {reason}")]
    Parse {
        /// One-based line number of the offending row.
        line: usize,
        /// Description of what was wrong with the row.
        reason: String,
    },
    /// Clustering failed.
    #[error(transparent)]
    Core(#[from] DbscanError),
}

/// Summarises the outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// CSV the points were read from.
    pub input: PathBuf,
    /// CSV the labelled points were written to.
    pub output: PathBuf,
    /// Radius the run used.
    pub epsilon: f64,
    /// Density threshold the run used.
    pub min_points: usize,
    /// Labels and counts produced by the engine.
    pub result: ClusteringResult,
    /// Wall-clock time spent clustering, excluding I/O.
    pub elapsed: Duration,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, clustering or writing fails. The
/// output file is only created once clustering has succeeded.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use pardbscan_cli::cli::{Cli, Command, RunCommand, StrategyArg, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let input = dir.path().join("points.csv");
/// let output = dir.path().join("labels.csv");
/// std::fs::write(&input, "0,0\n0.5,0\n0,0.5\n9,9\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         input,
///         output: output.clone(),
///         epsilon: 1.0,
///         min_points: 2,
///         strategy: StrategyArg::Sequential,
///         threads: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.cluster_count(), 1);
/// assert_eq!(summary.result.noise_count(), 1);
/// assert!(std::fs::read_to_string(output)?.starts_with("x,y,cluster_id\n"));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<RunSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        input = field::Empty,
        epsilon = command.epsilon,
        min_points = command.min_points,
        strategy = ?command.strategy,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<RunSummary, CliError> {
    let RunCommand {
        input,
        output,
        epsilon,
        min_points,
        strategy,
        threads,
    } = command;
    Span::current().record("input", field::display(input.display()));

    let dbscan = DbscanBuilder::new()
        .with_epsilon(epsilon)
        .with_min_points(min_points)
        .with_execution_strategy(strategy.into())
        .with_threads(threads)
        .build()?;

    let mut dataset = read_points(&input)?;
    let started = Instant::now();
    let result = dbscan.run(&mut dataset)?;
    let elapsed = started.elapsed();
    save_points(&output, &dataset)?;

    info!(
        points = result.len(),
        clusters = result.cluster_count(),
        noise = result.noise_count(),
        elapsed_secs = elapsed.as_secs_f64(),
        "command completed"
    );
    Ok(RunSummary {
        input,
        output,
        epsilon,
        min_points,
        result,
        elapsed,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &RunSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "input: {}", summary.input.display())?;
    writeln!(writer, "output: {}", summary.output.display())?;
    writeln!(
        writer,
        "parameters: epsilon={} min_points={} strategy={:?}",
        summary.epsilon,
        summary.min_points,
        summary.result.strategy()
    )?;
    writeln!(writer, "points: {}", summary.result.len())?;
    writeln!(writer, "clusters: {}", summary.result.cluster_count())?;
    writeln!(writer, "noise: {}", summary.result.noise_count())?;
    writeln!(writer, "elapsed: {:.6}s", summary.elapsed.as_secs_f64())?;
    Ok(())
}
