//! Sectioned-text (INI-style) parsing.
//!
//! Supports `[section]` headers with `key = value` or `key: value` entries,
//! blank lines and full-line `#`/`;` comments. Keys are lower-cased; keys
//! and values are trimmed. Keys in the `DEFAULT` section are visible from
//! every other section. `%`-interpolation and multi-line continuation
//! values are unsupported: values are taken verbatim, one line each.
//!
//! The parser is strict: entries before any header, lines without a
//! separator, duplicate sections and duplicate keys are all errors.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

/// Name of the section whose keys fall through to every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A parsed sectioned-text file.
#[derive(Debug, Default)]
pub(crate) struct IniFile {
    defaults: HashMap<String, String>,
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniFile {
    /// Entries of `name`, defaults first so section keys win on collision.
    ///
    /// Requesting [`DEFAULT_SECTION`] always succeeds and yields only the
    /// defaults; any other name must exist in the file.
    pub(crate) fn section_entries(&self, name: &str) -> Option<Vec<(&str, &str)>> {
        let defaults = self
            .defaults
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()));
        if name == DEFAULT_SECTION {
            return Some(defaults.collect());
        }
        let section = self.sections.get(name)?;
        let mut entries: Vec<(&str, &str)> = defaults.collect();
        entries.extend(section.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Some(entries)
    }
}

/// Parse `text` as a sectioned-text file.
///
/// `path` is only used to label errors.
pub(crate) fn parse(path: &Path, text: &str) -> Result<IniFile, ConfigError> {
    let mut file = IniFile::default();
    // None until the first header; DEFAULT entries live in `file.defaults`.
    let mut current: Option<String> = None;
    let mut seen_default = false;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        let lineno = idx + 1;
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(parse_error(path, lineno, "unterminated section header"));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(parse_error(path, lineno, "empty section name"));
            }
            if name == DEFAULT_SECTION {
                if seen_default {
                    return Err(parse_error(path, lineno, "duplicate section [DEFAULT]"));
                }
                seen_default = true;
                current = Some(name.to_owned());
            } else {
                if file.sections.contains_key(name) {
                    return Err(parse_error(
                        path,
                        lineno,
                        &format!("duplicate section [{name}]"),
                    ));
                }
                file.sections.insert(name.to_owned(), HashMap::new());
                current = Some(name.to_owned());
            }
            continue;
        }

        let Some((key, value)) = line.split_once(['=', ':']) else {
            return Err(parse_error(path, lineno, "missing '=' or ':' separator"));
        };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(parse_error(path, lineno, "missing key"));
        }
        let value = value.trim().to_owned();

        let Some(section_name) = current.as_deref() else {
            return Err(parse_error(path, lineno, "entry before any section header"));
        };
        let entries = if section_name == DEFAULT_SECTION {
            &mut file.defaults
        } else {
            // The header arm inserted the map when the section was opened.
            file.sections.entry(section_name.to_owned()).or_default()
        };
        if entries.contains_key(&key) {
            return Err(parse_error(path, lineno, &format!("duplicate key '{key}'")));
        }
        entries.insert(key, value);
    }

    Ok(file)
}

fn parse_error(path: &Path, line: usize, message: &str) -> ConfigError {
    ConfigError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.to_owned(),
    }
}
