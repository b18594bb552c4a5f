use anyhow::Result;
use clap::Parser;

use mangobar::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    mangobar::daemon::run(cli)
}
