use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Platform base URL (defaults to $SYNCLINE_URL, then the linked
    /// project's config, then http://localhost:3000)
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// Do not try to open the verification URL in a browser
    #[arg(long)]
    pub(crate) no_browser: bool,
}

#[derive(Args)]
pub(crate) struct LogoutArgs {
    #[arg(long)]
    pub(crate) url: Option<String>,
}
