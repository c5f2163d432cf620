//! Process-wide configuration access.
//!
//! The primary API is an explicit [`ConfigStore`] passed to whoever needs
//! it. This module is the thin ambient wrapper for programs that want one
//! store shared process-wide: initialise it early, read it anywhere.
//!
//! Initialisation is expected to happen once near process start, before
//! concurrent readers exist. Repeated `init`/`append` calls layer further
//! files onto the same store, last file winning on key collisions. The
//! store sits behind an `RwLock`, so late mutation is safe, merely
//! discouraged.

use std::path::Path;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::error::ConfigError;
use crate::store::ConfigStore;
use crate::value::Value;

static GLOBAL: LazyLock<RwLock<ConfigStore>> = LazyLock::new(|| RwLock::new(ConfigStore::new()));

fn read() -> std::sync::RwLockReadGuard<'static, ConfigStore> {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> std::sync::RwLockWriteGuard<'static, ConfigStore> {
    GLOBAL.write().unwrap_or_else(PoisonError::into_inner)
}

/// Load `path` into the process-wide store.
///
/// Layers onto whatever the store already holds, so a second call acts
/// exactly like [`append`].
///
/// # Errors
///
/// Propagates [`ConfigError`] from the underlying load; the store is left
/// unchanged on failure.
pub fn init(path: impl AsRef<Path>, section: &str) -> Result<(), ConfigError> {
    write().append(path, section)
}

/// Layer another file onto the process-wide store.
///
/// # Errors
///
/// Propagates [`ConfigError`] from the underlying load.
pub fn append(path: impl AsRef<Path>, section: &str) -> Result<(), ConfigError> {
    write().append(path, section)
}

/// Case-insensitive lookup against the process-wide store.
#[must_use]
pub fn get(name: &str) -> Option<Value> {
    read().get(name).cloned()
}

/// Lookup with a caller-supplied fallback for absent keys.
#[must_use]
pub fn get_or(name: &str, default: Value) -> Value {
    read().get_or(name, default)
}

/// The named value as text, when present and textual.
#[must_use]
pub fn get_str(name: &str) -> Option<String> {
    read().get_str(name).map(str::to_owned)
}

/// The named value as an integer, when present and coerced to one.
#[must_use]
pub fn get_int(name: &str) -> Option<i64> {
    read().get_int(name)
}

/// Boolean interpretation of the named value; absent keys are false.
#[must_use]
pub fn get_bool(name: &str) -> bool {
    read().get_bool(name)
}

/// Set or overwrite a value in the process-wide store.
pub fn set(name: &str, value: impl Into<Value>) {
    write().set(name, value);
}

/// A point-in-time copy of the process-wide store.
///
/// The copy is independent: mutating it does not touch the global store.
#[must_use]
pub fn snapshot() -> ConfigStore {
    read().clone()
}

/// Clear the process-wide store.
///
/// Intended for tests that must start from a clean slate; production code
/// has no reason to call this.
pub fn reset() {
    *write() = ConfigStore::new();
}
