use anyhow::Result;
use clap::Parser;

use crate::cli_commands::Commands;

#[derive(Parser)]
#[command(name = "syncline")]
#[command(about = "Sync a local project directory with a platform project", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::cli_exec::handle_command(cli.command)
}
