//! On-disk configuration fixtures for tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A small sectioned-text body with one integer and one string value.
pub const SAMPLE_INI: &str = "[DEFAULT]\ntimeout = 30\nhost = localhost\n";

/// A flat JSON body exercising native typing alongside coercion.
pub const SAMPLE_JSON: &str = r#"{"timeout": "30", "host": "localhost", "verbose": true}"#;

/// Write `contents` to `name` inside `dir` and return the full path.
///
/// # Panics
///
/// Panics when the file cannot be written; fixtures fail fast.
#[must_use]
pub fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write config fixture");
    path
}
