//! The four user-facing sync operations (login, pull, push, create-push)
//! composed from the credential store, platform client, walker, diff engine,
//! and sync-state store. All operations are sequential: one outstanding
//! network or file operation at a time, and sync state is written only after
//! every file operation of a command has completed.

use anyhow::{Context, Result};
use time::format_description::well_known::Rfc3339;

mod diff;
mod login;
mod pull;
mod push;

pub use self::diff::{compute_push_diff, hash_file, md5_etag, strip_etag_quotes, with_sidecar_configs};
pub use self::login::{LoginOptions, login, logout};
pub use self::pull::{PullOptions, PullSummary, pull_project};
pub use self::push::{
    CreatePushOptions, PushOptions, PushOutcome, create_push_project, push_project,
};

pub(crate) fn now_rfc3339() -> Result<String> {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format lastSync timestamp")
}
