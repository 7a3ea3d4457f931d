use anyhow::{Context, Result};

use syncline::model::RemoteBinding;
use syncline::progress::StdoutProgress;
use syncline::remote::PlatformClient;
use syncline::sync::{
    CreatePushOptions, PullOptions, PushOptions, PushOutcome, create_push_project, pull_project,
    push_project,
};

use crate::cli_commands::sync::{CreatePushArgs, LinkArgs, ProjectsArgs, PullArgs, PushArgs};

use super::context::{CommandContext, command_context, require_project_id, require_token};

fn authed_client(ctx: &CommandContext) -> Result<PlatformClient> {
    let token = require_token(ctx)?;
    PlatformClient::new(&ctx.base_url, Some(token))
}

pub(super) fn handle_projects_command(args: ProjectsArgs) -> Result<()> {
    let json = args.json;
    let ctx = command_context(args.url)?;
    let client = authed_client(&ctx)?;
    let projects = client.list_projects()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&projects).context("serialize projects json")?
        );
    } else if projects.is_empty() {
        println!("No projects");
    } else {
        for p in projects {
            println!(
                "{}  {}  {}/{}  v{}  ({})",
                p.id, p.name, p.org_slug, p.slug, p.sync_version, p.role
            );
        }
    }
    Ok(())
}

pub(super) fn handle_link_command(args: LinkArgs) -> Result<()> {
    let project_id = args.project_id;
    let ctx = command_context(args.url)?;

    let mut cfg = ctx.store.read_config()?;
    let mut binding = cfg.remote.take().unwrap_or_default();
    binding.base_url = Some(ctx.base_url.clone());
    binding.project_id = Some(project_id.clone());
    cfg.remote = Some(binding);
    ctx.store.write_config(&cfg)?;

    println!("Linked to project {} at {}", project_id, ctx.base_url);
    Ok(())
}

pub(super) fn handle_pull_command(args: PullArgs) -> Result<()> {
    let force = args.force;
    let ctx = command_context(args.url)?;
    let client = authed_client(&ctx)?;
    let project_id = require_project_id(&ctx)?;

    let summary = pull_project(
        &client,
        &project_id,
        &ctx.project_dir,
        &PullOptions { force },
        &mut StdoutProgress,
    )?;
    println!(
        "Pulled version {}: {} downloaded, {} unchanged, {} deleted",
        summary.version, summary.downloaded, summary.unchanged, summary.deleted
    );
    Ok(())
}

pub(super) fn handle_push_command(args: PushArgs) -> Result<()> {
    let force = args.force;
    let ctx = command_context(args.url)?;
    let client = authed_client(&ctx)?;
    let project_id = require_project_id(&ctx)?;

    match push_project(
        &client,
        &project_id,
        &ctx.project_dir,
        &PushOptions { force },
        &mut StdoutProgress,
    )? {
        PushOutcome::NoChanges => println!("Nothing to push"),
        PushOutcome::Pushed {
            version,
            uploaded,
            deleted,
        } => println!(
            "Pushed version {}: {} uploaded, {} deleted",
            version,
            uploaded.len(),
            deleted.len()
        ),
    }
    Ok(())
}

pub(super) fn handle_create_push_command(args: CreatePushArgs) -> Result<()> {
    let CreatePushArgs {
        url,
        org_id,
        name,
        figma_project_id,
    } = args;
    let ctx = command_context(url)?;
    let client = authed_client(&ctx)?;

    let result = create_push_project(
        &client,
        &org_id,
        &ctx.project_dir,
        &CreatePushOptions {
            name,
            figma_project_id,
        },
        &mut StdoutProgress,
    )?;
    println!(
        "Created project {} at version {} ({} files uploaded)",
        result.project_id,
        result.sync_version,
        result.uploaded.len()
    );
    Ok(())
}
