//! Entry point for the flexconfd daemon binary.
//!
//! Loads the process-wide configuration, sets up logging, then drives the
//! heartbeat server under the lifecycle harness until a termination signal
//! arrives.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use flexconfd::config::{Args, Settings};
use flexconfd::server::Heartbeat;
use flexconfd::{logging, service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    flexconf::global::init(&args.config, &args.section)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    let store = flexconf::global::snapshot();
    let settings = Settings::from_store(&store)?;

    let filter = logging::build_filter(&settings, args.verbose)?;
    let writer = logging::writer_for(args.daemonize, &settings.logfile)?;
    logging::init(filter, writer);

    info!(description = %settings.program_description, "starting");
    debug!(
        config = %serde_json::to_string(&store).unwrap_or_default(),
        "effective configuration"
    );

    std::env::set_current_dir(&settings.working_directory).with_context(|| {
        format!(
            "entering working directory {}",
            settings.working_directory.display()
        )
    })?;

    service::run(Heartbeat::new(Duration::from_secs(settings.tick_interval_secs))).await
}
