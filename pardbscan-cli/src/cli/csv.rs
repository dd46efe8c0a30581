//! Reading and writing point CSVs.
//!
//! Input is headerless with one `x,y` pair per line. Output carries an
//! `x,y,cluster_id` header, coordinates with six decimals and `-1` for noise.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use pardbscan_core::Dataset;
use tracing::{debug, instrument};

use super::commands::CliError;

const HEADER: &str = "x,y,cluster_id";

/// Reads the points stored at `path`.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read and
/// [`CliError::Parse`] when a line is not a pair of numbers.
#[instrument(name = "cli.read_points", err, fields(path = %path.display()))]
pub fn read_points(path: &Path) -> Result<Dataset, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_points(&text)?;
    debug!(points = dataset.len(), "points loaded");
    Ok(dataset)
}

/// Parses headerless `x,y` rows. Blank lines are skipped.
///
/// Values that parse as non-finite floats (`NaN`, `inf`) are accepted; the
/// engines treat such points as isolated.
///
/// # Errors
/// Returns [`CliError::Parse`] with the one-based line number of the first
/// malformed row.
///
/// # Examples
/// ```
/// use pardbscan_cli::cli::parse_points;
///
/// let dataset = parse_points("1.5, 2\n\n-3,4\n")?;
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.points()[1].x, -3.0);
/// # Ok::<(), pardbscan_cli::cli::CliError>(())
/// ```
pub fn parse_points(text: &str) -> Result<Dataset, CliError> {
    let mut coordinates = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let row = raw.trim();
        if row.is_empty() {
            continue;
        }
        coordinates.push(parse_row(row).map_err(|reason| CliError::Parse {
            line: index + 1,
            reason,
        })?);
    }
    Ok(Dataset::from_coordinates(coordinates))
}

fn parse_row(row: &str) -> Result<(f64, f64), String> {
    let Some((x, y)) = row.split_once(',') else {
        return Err(format!("expected `x,y`, found `{row}`"));
    };
    Ok((parse_coordinate(x)?, parse_coordinate(y)?))
}

fn parse_coordinate(raw: &str) -> Result<f64, String> {
    let value = raw.trim();
    value
        .parse::<f64>()
        .map_err(|err| format!("invalid coordinate `{value}`: {err}"))
}

/// Writes the labelled points of `dataset` to `writer`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use pardbscan_cli::cli::write_points;
/// use pardbscan_core::Dataset;
///
/// let dataset = Dataset::from_coordinates([(0.25, 1.0)]);
/// let mut buffer = Vec::new();
/// write_points(&dataset, &mut buffer)?;
/// assert_eq!(buffer, b"x,y,cluster_id\n0.250000,1.000000,0\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_points(dataset: &Dataset, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for point in dataset.points() {
        writeln!(
            writer,
            "{:.6},{:.6},{}",
            point.x,
            point.y,
            point.label().as_i64()
        )?;
    }
    Ok(())
}

#[instrument(name = "cli.write_points", err, skip(dataset), fields(path = %path.display()))]
pub(super) fn save_points(path: &Path, dataset: &Dataset) -> Result<(), CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_points(dataset, &mut writer).map_err(io_error)?;
    writer.flush().map_err(io_error)
}
