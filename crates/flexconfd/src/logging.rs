//! Logging setup for the daemon.
//!
//! Structured logging via `tracing` and `tracing-subscriber`. The filter
//! comes from `RUST_LOG` when set; otherwise it is built from the
//! `--verbose` flag plus the per-target overrides in the daemon settings.
//! Output goes to stdout, or appends to the configured logfile when the
//! daemon was started with `--daemonize`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Settings;

/// Errors raised while preparing the logging stack.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A per-target override did not form a valid filter directive.
    #[error("invalid log directive '{directive}': {source}")]
    Directive {
        /// The directive that failed to parse.
        directive: String,
        /// Underlying parse error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// The logfile could not be opened for appending.
    #[error("failed to open logfile {path}: {source}")]
    Logfile {
        /// Path of the logfile.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Build the filter for the daemon's subscriber.
///
/// `RUST_LOG` wins outright when present. Otherwise the base level is
/// `debug` for `--verbose` runs and `info` for everything else, refined by
/// the settings' per-target overrides.
///
/// # Errors
///
/// Fails when a per-target override does not parse as a directive.
pub fn build_filter(settings: &Settings, verbose: bool) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let base = if verbose { "debug" } else { "info" };
    let mut filter = EnvFilter::new(base);
    for (target, level) in &settings.log_levels {
        let directive = format!("{target}={level}");
        let parsed = directive
            .parse()
            .map_err(|source| LoggingError::Directive {
                directive: directive.clone(),
                source,
            })?;
        filter = filter.add_directive(parsed);
    }
    Ok(filter)
}

/// Choose the log destination.
///
/// Returns stdout for foreground runs; when daemonizing, opens `logfile`
/// in append mode (creating it if needed).
///
/// # Errors
///
/// Fails when the logfile cannot be opened.
pub fn writer_for(daemonize: bool, logfile: &Path) -> Result<BoxMakeWriter, LoggingError> {
    if !daemonize {
        return Ok(BoxMakeWriter::new(std::io::stdout));
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logfile)
        .map_err(|source| LoggingError::Logfile {
            path: logfile.to_path_buf(),
            source,
        })?;
    Ok(BoxMakeWriter::new(Arc::new(file)))
}

/// Install the global subscriber.
///
/// Call before any logging statements to avoid missing logs; calling twice
/// panics, as the global default can only be set once.
pub fn init(filter: EnvFilter, writer: BoxMakeWriter) {
    init_with_writer(filter, writer);
}

/// Install the global subscriber with a custom writer.
///
/// Kept generic so tests can capture output in a buffer.
pub fn init_with_writer<W>(filter: EnvFilter, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt().with_env_filter(filter).with_writer(writer).init();
}
