//! Test support utilities shared across the workspace.

pub mod env_guard;
pub mod fixtures;

pub use env_guard::EnvVarGuard;
pub use fixtures::{SAMPLE_INI, SAMPLE_JSON, write_config};
