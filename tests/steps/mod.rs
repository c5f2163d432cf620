//! Behavioural steps for the configuration store.
#![allow(
    clippy::expect_used,
    clippy::needless_pass_by_value,
    reason = "simplify test failure output"
)]

use cucumber::{World, given, then, when};
use std::path::PathBuf;
use tempfile::TempDir;

use flexconf::{ConfigError, ConfigStore, Value};
use test_support::write_config;

#[derive(Debug, Default, World)]
pub struct StoreWorld {
    dir: Option<TempDir>,
    path: Option<PathBuf>,
    override_path: Option<PathBuf>,
    result: Option<Result<ConfigStore, ConfigError>>,
}

impl StoreWorld {
    fn dir(&mut self) -> &TempDir {
        if self.dir.is_none() {
            self.dir = Some(TempDir::new().expect("create temp dir"));
        }
        self.dir.as_ref().expect("temp dir present")
    }

    fn store(&self) -> &ConfigStore {
        match self.result.as_ref() {
            Some(Ok(store)) => store,
            other => panic!("expected a loaded store, got {other:?}"),
        }
    }
}

#[given(regex = r#"^a sectioned config file with timeout \"(.+)\" and host \"(.+)\"$"#)]
fn sectioned_file(world: &mut StoreWorld, timeout: String, host: String) {
    let body = format!("[DEFAULT]\ntimeout = {timeout}\nhost = {host}\n");
    let path = write_config(world.dir(), "app.conf", &body);
    world.path = Some(path);
}

#[given(regex = r#"^a sectioned config file with flag \"(.+)\"$"#)]
fn sectioned_file_with_flag(world: &mut StoreWorld, flag: String) {
    let body = format!("[DEFAULT]\nflag = {flag}\n");
    let path = write_config(world.dir(), "app.conf", &body);
    world.path = Some(path);
}

#[given(regex = r#"^a JSON config file with port \"(.+)\" and verbose flag$"#)]
fn json_file(world: &mut StoreWorld, port: String) {
    let body = format!(r#"{{"port": "{port}", "verbose": true}}"#);
    let path = write_config(world.dir(), "config.json", &body);
    world.path = Some(path);
}

#[given(regex = r#"^a JSON override file setting host to \"(.+)\"$"#)]
fn json_override_file(world: &mut StoreWorld, host: String) {
    let body = format!(r#"{{"host": "{host}"}}"#);
    let path = write_config(world.dir(), "override.json", &body);
    world.override_path = Some(path);
}

#[given("a missing config file")]
fn missing_file(world: &mut StoreWorld) {
    world.path = Some(PathBuf::from("/nonexistent/nowhere.conf"));
}

#[when(regex = r#"^the store is loaded from the file with section \"(.+)\"$"#)]
fn load_store(world: &mut StoreWorld, section: String) {
    let path = world.path.as_ref().expect("path set");
    world.result = Some(ConfigStore::from_file(path, &section));
}

#[when("the override file is appended")]
fn append_override(world: &mut StoreWorld) {
    let path = world.override_path.clone().expect("override path set");
    match world.result.as_mut() {
        Some(Ok(store)) => store
            .append(&path, ConfigStore::DEFAULT_SECTION)
            .expect("append override"),
        other => panic!("expected a loaded store, got {other:?}"),
    }
}

#[then(regex = r#"^key \"(.+)\" holds the integer (-?\d+)$"#)]
fn key_holds_integer(world: &mut StoreWorld, key: String, expected: i64) {
    assert_eq!(world.store().get_int(&key), Some(expected));
}

#[then(regex = r#"^key \"(.+)\" holds the string \"(.+)\"$"#)]
fn key_holds_string(world: &mut StoreWorld, key: String, expected: String) {
    assert_eq!(world.store().get_str(&key), Some(expected.as_str()));
}

#[then(regex = r#"^key \"(.+)\" is absent$"#)]
fn key_is_absent(world: &mut StoreWorld, key: String) {
    assert_eq!(world.store().get(&key), None);
}

#[then(regex = r#"^key \"(.+)\" is true$"#)]
fn key_is_native_true(world: &mut StoreWorld, key: String) {
    assert_eq!(world.store().get(&key), Some(&Value::Bool(true)));
}

#[then(regex = r#"^key \"(.+)\" reads as (true|false)$"#)]
fn key_reads_as(world: &mut StoreWorld, key: String, expected: String) {
    assert_eq!(world.store().get_bool(&key), expected == "true");
}

#[then("loading fails")]
fn loading_fails(world: &mut StoreWorld) {
    match world.result.take() {
        Some(Err(_)) => {}
        other => panic!("expected an error, got {other:?}"),
    }
}
