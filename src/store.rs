//! The configuration store.
//!
//! A [`ConfigStore`] is a case-insensitive map of keys to typed values,
//! filled from one or more source files. Layering is merge-not-replace:
//! each file only touches the keys it names, and later files win on
//! collision. Unknown-key lookups return `None` rather than failing, so
//! callers can treat any setting as optional.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ini;
use crate::value::Value;

/// Key/value configuration loaded from sectioned-text or JSON files.
///
/// Format detection is by file extension alone: `.json` (any case) selects
/// the flat-JSON parser, anything else the sectioned-text parser. There is
/// no content sniffing.
///
/// # Examples
///
/// ```no_run
/// use flexconf::ConfigStore;
///
/// let store = ConfigStore::from_file("/etc/app.conf", "DEFAULT")?;
/// let timeout = store.get_int("timeout").unwrap_or(60);
/// # Ok::<(), flexconf::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigStore {
    entries: HashMap<String, Value>,
}

impl ConfigStore {
    /// Section read when the caller does not name one.
    pub const DEFAULT_SECTION: &'static str = ini::DEFAULT_SECTION;

    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a store from a single file.
    ///
    /// For sectioned-text sources only the named `section` is read (keys
    /// from `[DEFAULT]` fall through into it). For JSON sources `section`
    /// is ignored and the flat top-level object is read.
    ///
    /// # Errors
    ///
    /// [`ConfigError::File`] if the file cannot be read, or a parse variant
    /// if its content is malformed for the detected format.
    pub fn from_file(path: impl AsRef<Path>, section: &str) -> Result<Self, ConfigError> {
        let mut store = Self::new();
        store.append(path, section)?;
        Ok(store)
    }

    /// Layer another file onto this store.
    ///
    /// Identical parsing and coercion to [`ConfigStore::from_file`]; keys
    /// already present keep their value unless the new file names them.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConfigStore::from_file`]. On error the store
    /// is left unchanged.
    pub fn append(&mut self, path: impl AsRef<Path>, section: &str) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if is_json(path) {
            self.merge_json(path)
        } else {
            self.merge_sectioned(path, section)
        }
    }

    fn merge_sectioned(&mut self, path: &Path, section: &str) -> Result<(), ConfigError> {
        let text = read_source(path)?;
        let file = ini::parse(path, &text)?;
        let entries = file
            .section_entries(section)
            .ok_or_else(|| ConfigError::UnknownSection {
                path: path.to_path_buf(),
                section: section.to_owned(),
            })?;
        for (key, raw) in entries {
            self.entries.insert(key.to_owned(), Value::coerce(raw));
        }
        Ok(())
    }

    fn merge_json(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = read_source(path)?;
        let parsed: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let serde_json::Value::Object(object) = parsed else {
            return Err(ConfigError::TopLevelNotObject {
                path: path.to_path_buf(),
            });
        };
        for (key, json) in object {
            // Keys are stored lower-cased like sectioned-text keys; nested
            // objects stay opaque rather than becoming nested namespaces.
            self.entries
                .insert(key.to_lowercase(), Value::from_json(json));
        }
        Ok(())
    }

    /// Case-insensitive lookup. `None` is the absent sentinel; lookups
    /// never fail.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(&name.to_lowercase())
    }

    /// Lookup with a caller-supplied fallback for absent keys.
    #[must_use]
    pub fn get_or(&self, name: &str, default: Value) -> Value {
        self.get(name).cloned().unwrap_or(default)
    }

    /// The named value as text, when present and textual.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The named value as an integer, when present and coerced to one.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Boolean interpretation of the named value.
    ///
    /// Absent keys are false; see [`Value::truthiness`] for the recognised
    /// forms. Never fails.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).is_some_and(Value::truthiness)
    }

    /// Set or overwrite a value at runtime. The key is lower-cased.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.entries.insert(name.to_lowercase(), value.into());
    }

    /// Iterate over the stored keys (lower-cased, unordered).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_source(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::File {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::ConfigStore;
    use crate::error::ConfigError;
    use crate::value::Value;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_support::write_config;

    const SAMPLE_INI: &str = "[DEFAULT]\ntimeout = 30\nhost = localhost\n";

    #[test]
    fn loads_ini_section_with_coercion() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "app.conf", SAMPLE_INI);
        let store = ConfigStore::from_file(&path, "DEFAULT").expect("load");
        assert_eq!(store.get("timeout"), Some(&Value::Int(30)));
        assert_eq!(store.get_str("host"), Some("localhost"));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "app.conf", "[DEFAULT]\nHost = localhost\n");
        let store = ConfigStore::from_file(&path, "DEFAULT").expect("load");
        assert_eq!(store.get_str("host"), Some("localhost"));
        assert_eq!(store.get_str("HOST"), Some("localhost"));
        assert_eq!(store.get_str("Host"), Some("localhost"));
    }

    #[test]
    fn reads_only_the_named_section() {
        let body = "[DEFAULT]\nshared = 1\n[db]\nhost = dbhost\n[web]\nhost = webhost\n";
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "app.conf", body);
        let store = ConfigStore::from_file(&path, "db").expect("load");
        assert_eq!(store.get_str("host"), Some("dbhost"));
        // DEFAULT keys fall through into the named section.
        assert_eq!(store.get_int("shared"), Some(1));
        assert!(store.get("web").is_none());
    }

    #[test]
    fn loads_flat_json_with_native_types() {
        let body = r#"{
            "Port": "8080",
            "workers": 4,
            "debug": true,
            "ratio": 0.5,
            "name": "svc",
            "limits": {"depth": 2}
        }"#;
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "config.json", body);
        let store = ConfigStore::from_file(&path, "DEFAULT").expect("load");
        assert_eq!(store.get_int("port"), Some(8080));
        assert_eq!(store.get_int("workers"), Some(4));
        assert_eq!(store.get("debug"), Some(&Value::Bool(true)));
        assert_eq!(
            store.get("ratio"),
            Some(&Value::Other(serde_json::json!(0.5)))
        );
        assert_eq!(store.get_str("name"), Some("svc"));
        // Nested objects are stored opaque, not expanded.
        assert_eq!(
            store.get("limits"),
            Some(&Value::Other(serde_json::json!({"depth": 2})))
        );
    }

    #[rstest]
    #[case::lower("config.json")]
    #[case::upper("CONFIG.JSON")]
    fn extension_alone_selects_the_parser(#[case] name: &str) {
        // Valid JSON that is not valid sectioned text: only the extension
        // decides which parser runs.
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, name, r#"{"a": 1}"#);
        let store = ConfigStore::from_file(&path, "DEFAULT").expect("load");
        assert_eq!(store.get_int("a"), Some(1));
    }

    #[test]
    fn json_content_under_other_extension_is_a_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "config.conf", r#"{"a": 1}"#);
        let err = ConfigStore::from_file(&path, "DEFAULT").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn append_overwrites_only_colliding_keys() {
        let dir = TempDir::new().expect("tempdir");
        let first = write_config(&dir, "a.conf", "[DEFAULT]\nhost = one\nport = 1\n");
        let second = write_config(&dir, "b.conf", "[DEFAULT]\nhost = two\n");
        let mut store = ConfigStore::from_file(&first, "DEFAULT").expect("first");
        store.append(&second, "DEFAULT").expect("second");
        assert_eq!(store.get_str("host"), Some("two"));
        assert_eq!(store.get_int("port"), Some(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn append_layers_across_formats() {
        let dir = TempDir::new().expect("tempdir");
        let ini = write_config(&dir, "a.conf", "[DEFAULT]\nhost = text\n");
        let json = write_config(&dir, "b.json", r#"{"host": "json", "extra": "x"}"#);
        let mut store = ConfigStore::from_file(&ini, "DEFAULT").expect("ini");
        store.append(&json, "DEFAULT").expect("json");
        assert_eq!(store.get_str("host"), Some("json"));
        assert_eq!(store.get_str("extra"), Some("x"));
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let err = ConfigStore::from_file(PathBuf::from("/nonexistent/app.conf"), "DEFAULT")
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::File { .. }));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "config.json", "{ not json");
        let err = ConfigStore::from_file(&path, "DEFAULT").expect_err("must fail");
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn non_object_json_top_level_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "config.json", "[1, 2, 3]");
        let err = ConfigStore::from_file(&path, "DEFAULT").expect_err("must fail");
        assert!(matches!(err, ConfigError::TopLevelNotObject { .. }));
    }

    #[test]
    fn unknown_section_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "app.conf", SAMPLE_INI);
        let err = ConfigStore::from_file(&path, "nowhere").expect_err("must fail");
        assert!(matches!(err, ConfigError::UnknownSection { .. }));
    }

    #[rstest]
    #[case::yes("YES", true)]
    #[case::word_true("true", true)]
    #[case::on("On", true)]
    #[case::one("1", true)]
    #[case::no("no", false)]
    #[case::other("whatever", false)]
    fn get_bool_truth_table(#[case] raw: &str, #[case] expected: bool) {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "app.conf", &format!("[DEFAULT]\nflag = {raw}\n"));
        let store = ConfigStore::from_file(&path, "DEFAULT").expect("load");
        assert_eq!(store.get_bool("flag"), expected);
    }

    #[test]
    fn get_bool_on_unset_key_is_false() {
        assert!(!ConfigStore::new().get_bool("anything"));
    }

    #[test]
    fn get_bool_passes_native_booleans_through() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "config.json", r#"{"on": true, "off": false}"#);
        let store = ConfigStore::from_file(&path, "DEFAULT").expect("load");
        assert!(store.get_bool("on"));
        assert!(!store.get_bool("off"));
    }

    #[test]
    fn get_or_returns_default_exactly_when_absent() {
        let mut store = ConfigStore::new();
        store.set("present", 5);
        assert_eq!(store.get_or("present", Value::Int(0)), Value::Int(5));
        assert_eq!(store.get_or("absent", Value::Int(0)), Value::Int(0));
    }

    #[test]
    fn set_overwrites_case_insensitively() {
        let mut store = ConfigStore::new();
        store.set("Flag", "yes");
        assert!(store.get_bool("flag"));
        store.set("FLAG", false);
        assert!(!store.get_bool("flag"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["flag"]);
    }

    #[test]
    fn local_instances_share_nothing() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "app.conf", SAMPLE_INI);
        let a = ConfigStore::from_file(&path, "DEFAULT").expect("a");
        let mut b = ConfigStore::from_file(&path, "DEFAULT").expect("b");
        b.set("host", "elsewhere");
        assert_eq!(a.get_str("host"), Some("localhost"));
        assert_eq!(b.get_str("host"), Some("elsewhere"));
    }

    #[test]
    fn failed_load_leaves_store_unchanged() {
        let dir = TempDir::new().expect("tempdir");
        let good = write_config(&dir, "a.conf", SAMPLE_INI);
        let mut store = ConfigStore::from_file(&good, "DEFAULT").expect("load");
        let before = store.clone();
        let err = store.append(dir.path().join("missing.conf"), "DEFAULT");
        assert!(err.is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn serialises_to_a_flat_object() {
        let mut store = ConfigStore::new();
        store.set("port", 8080);
        store.set("host", "localhost");
        let json = serde_json::to_value(&store).expect("serialise");
        assert_eq!(
            json,
            serde_json::json!({"port": 8080, "host": "localhost"})
        );
    }
}
