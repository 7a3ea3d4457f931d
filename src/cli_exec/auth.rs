use anyhow::Result;

use syncline::progress::StdoutProgress;
use syncline::sync::{LoginOptions, login, logout};

use crate::cli_commands::auth::{LoginArgs, LogoutArgs};

use super::context::command_context;

pub(super) fn handle_login_command(args: LoginArgs) -> Result<()> {
    let ctx = command_context(args.url)?;
    let opts = LoginOptions {
        open_browser: !args.no_browser,
    };
    let user = login(&ctx.base_url, &ctx.credentials, &opts, &mut StdoutProgress)?;
    println!("Logged in to {} as {} <{}>", ctx.base_url, user.name, user.email);
    Ok(())
}

pub(super) fn handle_logout_command(args: LogoutArgs) -> Result<()> {
    let ctx = command_context(args.url)?;
    logout(&ctx.base_url, &ctx.credentials, &mut StdoutProgress)?;
    println!("Logged out of {}", ctx.base_url);
    Ok(())
}
