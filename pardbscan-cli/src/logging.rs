//! Structured diagnostics for the `pardbscan` binary.
//!
//! Events go to `stderr` so the run summary on `stdout` stays machine
//! readable. Each closed span reports its busy and idle time, which gives a
//! per-phase timing of the clustering engines (`dbscan.sequential`,
//! `dbscan.parallel`) alongside the CLI's own `cli.*` spans.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable selecting the diagnostic format.
pub const LOG_FORMAT_ENV: &str = "PARDBSCAN_LOG_FORMAT";

/// Directives used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVES: &str = "warn,pardbscan_core=info,pardbscan_cli=info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Errors raised while installing the diagnostic subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `PARDBSCAN_LOG_FORMAT` held bytes that are not UTF-8.
    #[error("`PARDBSCAN_LOG_FORMAT` is not valid UTF-8: {source}")]
    InvalidUnicode {
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `PARDBSCAN_LOG_FORMAT` named a format the binary cannot emit.
    #[error("`PARDBSCAN_LOG_FORMAT` is `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Value as supplied, before trimming.
        provided: String,
    },
    /// Another global subscriber was installed first.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Diagnostic output formats understood by the binary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text lines for interactive use.
    #[default]
    Human,
    /// One JSON object per event, carrying the enclosing span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("human") {
            Ok(Self::Human)
        } else if trimmed.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(LoggingError::UnsupportedFormat {
                provided: raw.to_owned(),
            })
        }
    }
}

impl LogFormat {
    /// Resolves the format from a lookup of [`LOG_FORMAT_ENV`].
    ///
    /// An unset variable selects [`LogFormat::Human`].
    ///
    /// # Errors
    /// Returns [`LoggingError`] when the value is not UTF-8 or names an
    /// unknown format.
    pub fn from_lookup(lookup: Result<String, env::VarError>) -> Result<Self, LoggingError> {
        match lookup {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source @ env::VarError::NotUnicode(_)) => {
                Err(LoggingError::InvalidUnicode { source })
            }
        }
    }
}

/// Installs the global subscriber once and returns the active format.
///
/// Later calls return the format chosen by the first successful call without
/// reading the environment again.
///
/// # Errors
/// Returns [`LoggingError`] when [`LOG_FORMAT_ENV`] is invalid or another
/// global subscriber is already installed.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }
    let format = LogFormat::from_lookup(env::var(LOG_FORMAT_ENV))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let layer = match format {
        LogFormat::Human => layer.boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(false)
            .with_span_list(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })?;
    Ok(*INSTALLED.get_or_init(|| format))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::human("human", LogFormat::Human)]
    #[case::upper("JSON", LogFormat::Json)]
    #[case::padded(" json\n", LogFormat::Json)]
    fn known_formats_parse(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>().expect("format must parse"), expected);
    }

    #[test]
    fn unset_variable_selects_human_output() {
        let format =
            LogFormat::from_lookup(Err(env::VarError::NotPresent)).expect("unset is accepted");
        assert_eq!(format, LogFormat::Human);
    }

    #[test]
    fn unknown_format_names_the_variable() {
        let err = LogFormat::from_lookup(Ok(" xml ".to_owned())).expect_err("xml is unsupported");
        assert!(
            matches!(&err, LoggingError::UnsupportedFormat { provided } if provided == " xml "),
            "unexpected error: {err:?}"
        );
        assert_eq!(
            err.to_string(),
            "`PARDBSCAN_LOG_FORMAT` is ` xml `; expected `human` or `json`"
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_value_is_rejected() {
        use std::{ffi::OsString, os::unix::ffi::OsStringExt};

        let raw = OsString::from_vec(vec![b'j', 0xff]);
        let err = LogFormat::from_lookup(Err(env::VarError::NotUnicode(raw)))
            .expect_err("invalid bytes are rejected");
        assert!(matches!(err, LoggingError::InvalidUnicode { .. }));
        assert!(err.to_string().starts_with("`PARDBSCAN_LOG_FORMAT` is not valid UTF-8"));
    }

    #[test]
    fn repeated_initialisation_keeps_the_first_format() {
        let first = init_logging().expect("logging must initialise");
        let second = init_logging().expect("later calls reuse the subscriber");
        assert_eq!(first, second);
    }
}
