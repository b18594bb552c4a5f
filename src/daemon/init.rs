//! Daemon initialization functions.
//!
//! Handles setting up logging, loading configuration and building the mmsg runner.

use tracing::info;

use crate::cli::Cli;
use crate::config::{AppConfig, load_config};
use crate::mmsg::MmsgCommand;

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so that stdout stays machine-readable.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // By default, only log from mangobar crate at info level
    // Users can override with RUST_LOG environment variable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mangobar=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Load the config file and apply command-line overrides.
pub fn load_effective_config(cli: &Cli) -> AppConfig {
    let mut config = load_config(cli.config.as_deref());
    cli.apply_overrides(&mut config);
    config
}

/// Build the mmsg runner described by the config.
pub fn init_mmsg(config: &AppConfig) -> MmsgCommand {
    let mmsg = MmsgCommand::new(config.mmsg_path.clone()).with_timeout(config.command_timeout());
    info!(
        program = mmsg.program(),
        timeout_ms = mmsg.timeout().as_millis() as u64,
        "Using mmsg"
    );
    mmsg
}
