//! Attribute-style configuration loading for the flexconf project.
//!
//! # Overview
//! This crate exposes:
//! - [`ConfigStore`] — a case-insensitive key/value store filled from
//!   sectioned-text (INI-style) or flat JSON files, with best-effort
//!   integer coercion and merge-not-replace layering across files.
//! - [`Value`] — the tagged value type behind each key, with typed
//!   accessors and the shared boolean interpretation rules.
//! - [`global`] — a thin wrapper holding one process-wide store for
//!   programs that want ambient access after a single early `init`.
//!
//! # Examples
//! ```no_run
//! use flexconf::ConfigStore;
//!
//! let mut cfg = ConfigStore::from_file("/etc/app/app.conf", "DEFAULT")?;
//! cfg.append("/etc/app/overrides.json", "DEFAULT")?;
//! if cfg.get_bool("verbose") {
//!     println!("timeout: {:?}", cfg.get_int("timeout"));
//! }
//! # Ok::<(), flexconf::ConfigError>(())
//! ```

pub mod error;
pub mod global;
mod ini;
pub mod store;
pub mod value;

pub use error::ConfigError;
pub use ini::DEFAULT_SECTION;
pub use store::ConfigStore;
pub use value::Value;
