//! Error types for configuration loading.
//!
//! Loads fail loudly: a missing file or malformed content is propagated to
//! the caller with no partial-parse recovery. Integer-coercion failures and
//! unknown-key lookups are deliberately *not* errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    File {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A sectioned-text file is malformed.
    #[error("{path}:{line}: {message}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// Description of the problem.
        message: String,
    },
    /// A `.json` file is not valid JSON.
    #[error("failed to parse {path} as JSON: {source}")]
    Json {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A `.json` file parsed, but its top level is not an object.
    #[error("top-level JSON value in {path} is not an object")]
    TopLevelNotObject {
        /// Path of the offending file.
        path: PathBuf,
    },
    /// The requested section does not exist in the file.
    #[error("section [{section}] not found in {path}")]
    UnknownSection {
        /// Path of the offending file.
        path: PathBuf,
        /// The section that was requested.
        section: String,
    },
}
