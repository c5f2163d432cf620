//! Library components for the flexconfd daemon.
//!
//! # Overview
//! This crate exposes:
//! - [`config::Settings`] — typed daemon settings materialised from a
//!   [`flexconf::ConfigStore`], with CLI argument parsing.
//! - [`logging`] — tracing subscriber setup: filter construction from
//!   settings and verbosity, stdout or logfile output.
//! - [`service`] — the lifecycle harness (`init`/`run`/`close` hooks,
//!   signal-driven shutdown).
//! - [`server::Heartbeat`] — the illustrative long-running task.

pub mod config;
pub mod logging;
pub mod server;
pub mod service;
