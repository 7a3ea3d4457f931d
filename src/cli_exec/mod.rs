use anyhow::Result;

use crate::cli_commands::Commands;

mod auth;
mod context;
mod dispatch;
mod sync;

pub(crate) fn handle_command(command: Commands) -> Result<()> {
    dispatch::handle_command(command)
}
