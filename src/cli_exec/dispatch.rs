use anyhow::Result;

use crate::cli_commands::Commands;

use super::auth::{handle_login_command, handle_logout_command};
use super::sync::{
    handle_create_push_command, handle_link_command, handle_projects_command, handle_pull_command,
    handle_push_command,
};

pub(super) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(args),
        Commands::Logout(args) => handle_logout_command(args),
        Commands::Projects(args) => handle_projects_command(args),
        Commands::Link(args) => handle_link_command(args),
        Commands::Pull(args) => handle_pull_command(args),
        Commands::Push(args) => handle_push_command(args),
        Commands::CreatePush(args) => handle_create_push_command(args),
    }
}
