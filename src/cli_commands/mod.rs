use clap::Subcommand;

pub(crate) mod auth;
pub(crate) mod sync;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in to the platform via device code
    Login(auth::LoginArgs),

    /// Log out (revoke and remove the stored credential)
    Logout(auth::LogoutArgs),

    /// List projects you can sync
    Projects(sync::ProjectsArgs),

    /// Link this directory to an existing platform project
    Link(sync::LinkArgs),

    /// Download remote changes into this directory
    Pull(sync::PullArgs),

    /// Upload local changes to the linked project
    Push(sync::PushArgs),

    /// Create a platform project from this directory and push everything
    #[command(name = "create-push")]
    CreatePush(sync::CreatePushArgs),
}
