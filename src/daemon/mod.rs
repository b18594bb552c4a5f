//! Daemon module for mangobar.
//!
//! Wires configuration, logging and the compositor bridge together and runs
//! the requested command on a single-threaded tokio runtime.

mod init;
mod watch;

use anyhow::{Context, Result};
use tracing::info;

use crate::bridge::{BridgeOptions, CompositorBridge};
use crate::cli::{Cli, Commands};
use crate::display::{client_label, layout_label, tag_row};
use crate::mmsg::{self, Action};

pub use init::{init_logging, init_mmsg, load_effective_config};
pub use watch::{WatchLine, run_watch_loop, write_line};

/// Run mangobar.
///
/// This is the main entry point after argument parsing.
pub fn run(cli: Cli) -> Result<()> {
    init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "Starting mangobar");

    let config = load_effective_config(&cli);
    let runner = init_mmsg(&config);
    let options = BridgeOptions::from(&config);

    crate::tokio_runtime::block_on(async move {
        match cli.command() {
            Commands::Watch => {
                let bridge = CompositorBridge::create(runner, options).await;
                run_watch_loop(&bridge, &mut std::io::stdout()).await
            }
            Commands::State => {
                let mut bridge = CompositorBridge::create(runner, options).await;
                bridge.dispose();
                write_line(&mut std::io::stdout(), &bridge.snapshot())
            }
            Commands::Tags => {
                let mut bridge = CompositorBridge::create(runner, options).await;
                bridge.dispose();
                println!("{}", tag_row(&bridge.snapshot()));
                Ok(())
            }
            Commands::Layout => {
                let mut bridge = CompositorBridge::create(runner, options).await;
                bridge.dispose();
                println!("{}", layout_label(bridge.snapshot().current_layout.as_deref()));
                Ok(())
            }
            Commands::Client => {
                let mut bridge = CompositorBridge::create(runner, options).await;
                bridge.dispose();
                println!("{}", client_label(&bridge.snapshot()));
                Ok(())
            }
            Commands::SwitchTag { tag } => {
                mmsg::dispatch(&runner, options.monitor.as_deref(), &Action::SwitchTag(tag)).await;
                Ok(())
            }
            Commands::NextLayout => {
                mmsg::dispatch(&runner, options.monitor.as_deref(), &Action::NextLayout).await;
                Ok(())
            }
        }
    })
    .context("Failed to start tokio runtime")?
}
