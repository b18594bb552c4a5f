use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "mangobar")]
#[command(about = "Status bar backend for the mango Wayland compositor")]
pub struct Cli {
    /// Monitor to follow, e.g. DP-3 (overrides the config file)
    #[arg(short, long, global = true)]
    pub monitor: Option<String>,

    /// Path to a config file instead of ~/.config/mangobar/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Name or path of the mmsg binary
    #[arg(long, global = true)]
    pub mmsg: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Poll the compositor and print every change as a JSON line (default)
    Watch,
    /// Print the current state as JSON and exit
    State,
    /// Print the tag row, e.g. "1* [2] 3 4"
    Tags,
    /// Print the abbreviated layout label
    Layout,
    /// Print the focused window title
    Client,
    /// View a tag on the monitor
    SwitchTag {
        /// Tag number, starting at 1
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        tag: u32,
    },
    /// Advance the monitor to its next layout
    NextLayout,
}

impl Cli {
    /// Layer command-line flags over file configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(monitor) = &self.monitor {
            config.monitor = Some(monitor.clone());
        }
        if let Some(mmsg) = &self.mmsg {
            config.mmsg_path = mmsg.clone();
        }
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Watch)
    }
}
