//! Scoped environment-variable manipulation for tests.
//!
//! Environment mutation is process-global, so tests using these guards must
//! run under `#[serial_test::serial]`.

use std::ffi::OsString;

/// Sets or removes an environment variable and restores the previous state
/// on drop.
#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    previous: Option<OsString>,
}

impl EnvVarGuard {
    /// Set `key` to `value` for the lifetime of the returned guard.
    #[must_use]
    pub fn set(key: &str, value: &str) -> Self {
        let previous = std::env::var_os(key);
        // SAFETY: callers hold the serial-test lock, so no other thread
        // reads the environment concurrently.
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_owned(),
            previous,
        }
    }

    /// Remove `key` for the lifetime of the returned guard.
    #[must_use]
    pub fn remove(key: &str) -> Self {
        let previous = std::env::var_os(key);
        // SAFETY: as above.
        unsafe { std::env::remove_var(key) };
        Self {
            key: key.to_owned(),
            previous,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: as above; drop runs in the same serial context.
        unsafe {
            match &self.previous {
                Some(value) => std::env::set_var(&self.key, value),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}
