use clap::Args;

#[derive(Args)]
pub(crate) struct ProjectsArgs {
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct LinkArgs {
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// Platform project id to link this directory to
    #[arg(long)]
    pub(crate) project_id: String,
}

#[derive(Args)]
pub(crate) struct PullArgs {
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// Re-download every file and delete local files unknown to the remote
    #[arg(long)]
    pub(crate) force: bool,
}

#[derive(Args)]
pub(crate) struct PushArgs {
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// Upload every local file, not just changed ones
    #[arg(long)]
    pub(crate) force: bool,
}

#[derive(Args)]
pub(crate) struct CreatePushArgs {
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// Organization to create the project under
    #[arg(long)]
    pub(crate) org_id: String,

    /// Project name (defaults server-side)
    #[arg(long)]
    pub(crate) name: Option<String>,

    /// Figma project to associate with the new project
    #[arg(long)]
    pub(crate) figma_project_id: Option<String>,
}
