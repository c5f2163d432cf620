//! Daemon settings for flexconfd.
//!
//! Settings are materialised from a [`flexconf::ConfigStore`], so the
//! daemon's own configuration exercises the loader it ships. The default
//! file is `/etc/flexconfd/config.json`; any non-`.json` extension is read
//! as sectioned text. Every key is optional and falls back to a documented
//! default, in keeping with the loader's treat-config-as-optional policy.

use std::path::{Path, PathBuf};

use clap::Parser;
use flexconf::{ConfigError, ConfigStore, Value};
use thiserror::Error;

/// Default description used for logs and help output.
const DEFAULT_DESCRIPTION: &str = "flexconfd heartbeat daemon";
/// Default working directory entered before the main loop starts.
const DEFAULT_WORKING_DIRECTORY: &str = "/";
/// Default logfile used when daemonizing.
const DEFAULT_LOGFILE: &str = "/var/log/flexconfd.log";
/// Default seconds between heartbeat ticks.
const DEFAULT_TICK_INTERVAL_SECS: i64 = 1;

/// Level names accepted in `log_levels` values.
const LEVEL_TOKENS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors raised while materialising [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The underlying configuration file failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// `tick_interval` is present but not a positive number of seconds.
    #[error("tick_interval must be a positive number of seconds, got {0}")]
    InvalidTickInterval(i64),
    /// `log_levels` is present but not a flat object.
    #[error("log_levels must be an object mapping targets to levels")]
    LogLevelsNotAnObject,
    /// A `log_levels` entry holds an unusable level.
    #[error("unrecognised log level '{level}' for target '{target}'")]
    InvalidLogLevel {
        /// Target the override was meant for.
        target: String,
        /// The rejected level value.
        level: String,
    },
}

/// Runtime settings for the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Human-readable description of the program.
    pub program_description: String,
    /// Directory entered before the main loop starts.
    pub working_directory: PathBuf,
    /// Logfile used when `--daemonize` is given.
    pub logfile: PathBuf,
    /// Seconds between heartbeat ticks.
    pub tick_interval_secs: u64,
    /// Per-target log level overrides, as `(target, level)` pairs.
    pub log_levels: Vec<(String, String)>,
}

impl Settings {
    /// Default location of the daemon configuration file.
    pub const DEFAULT_PATH: &'static str = "/etc/flexconfd/config.json";

    /// Load a configuration file into a local store and materialise
    /// settings from it.
    ///
    /// # Errors
    ///
    /// Propagates load failures and rejects out-of-range values.
    pub fn load(path: &Path, section: &str) -> Result<Self, SettingsError> {
        let store = ConfigStore::from_file(path, section)?;
        Self::from_store(&store)
    }

    /// Materialise settings from an already-loaded store.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive `tick_interval` and malformed `log_levels`;
    /// absent keys fall back to defaults.
    pub fn from_store(store: &ConfigStore) -> Result<Self, SettingsError> {
        let tick = store
            .get_int("tick_interval")
            .unwrap_or(DEFAULT_TICK_INTERVAL_SECS);
        let tick_interval_secs =
            u64::try_from(tick).map_err(|_| SettingsError::InvalidTickInterval(tick))?;
        if tick_interval_secs == 0 {
            return Err(SettingsError::InvalidTickInterval(tick));
        }

        Ok(Self {
            program_description: store
                .get_str("program_description")
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_owned(),
            working_directory: PathBuf::from(
                store
                    .get_str("working_directory")
                    .unwrap_or(DEFAULT_WORKING_DIRECTORY),
            ),
            logfile: PathBuf::from(store.get_str("logfile").unwrap_or(DEFAULT_LOGFILE)),
            tick_interval_secs,
            log_levels: parse_log_levels(store.get("log_levels"))?,
        })
    }
}

/// Interpret the optional `log_levels` entry.
///
/// Only JSON sources can express it: a nested object mapping a log target
/// to either a level name or a Python-style numeric level (10 = debug,
/// 20 = info, 30 = warning, 40 = error, 50 = critical). The nested object
/// reaches us opaque in [`Value::Other`] because the store never expands
/// nested namespaces.
fn parse_log_levels(value: Option<&Value>) -> Result<Vec<(String, String)>, SettingsError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let Value::Other(serde_json::Value::Object(map)) = value else {
        return Err(SettingsError::LogLevelsNotAnObject);
    };
    let mut levels = Vec::with_capacity(map.len());
    for (target, raw) in map {
        levels.push((target.clone(), level_token(target, raw)?));
    }
    Ok(levels)
}

fn level_token(target: &str, raw: &serde_json::Value) -> Result<String, SettingsError> {
    let invalid = || SettingsError::InvalidLogLevel {
        target: target.to_owned(),
        level: raw.to_string(),
    };
    match raw {
        serde_json::Value::String(s) => {
            let lowered = s.to_lowercase();
            // Python logging names map onto tracing levels.
            let token = match lowered.as_str() {
                "warning" => "warn",
                "critical" => "error",
                other => other,
            };
            if LEVEL_TOKENS.contains(&token) {
                Ok(token.to_owned())
            } else {
                Err(invalid())
            }
        }
        serde_json::Value::Number(n) => {
            let level = n.as_i64().ok_or_else(invalid)?;
            Ok(numeric_level(level).to_owned())
        }
        _ => Err(invalid()),
    }
}

/// Map a Python `logging` numeric level onto a tracing level name.
fn numeric_level(level: i64) -> &'static str {
    match level {
        i64::MIN..=0 => "trace",
        1..=10 => "debug",
        11..=20 => "info",
        21..=30 => "warn",
        _ => "error",
    }
}

/// Command-line arguments for the daemon.
#[derive(Debug, Parser)]
#[command(name = "flexconfd", about = DEFAULT_DESCRIPTION)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, value_name = "FILE", default_value = Settings::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Section to read from sectioned-text configuration files.
    #[arg(short, long, default_value = ConfigStore::DEFAULT_SECTION)]
    pub section: String,

    /// Log to the configured logfile instead of stdout.
    ///
    /// Process detachment itself is left to the init system.
    #[arg(short, long)]
    pub daemonize: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
