//! Typed failure conditions of the sync client. These are carried inside
//! `anyhow` chains so command handlers can add context while callers and
//! tests can still `downcast_ref` and match on the condition.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    /// The server declared the device code expired (HTTP 410).
    #[error("device code expired on the server (run `syncline login` to try again)")]
    AuthExpired,

    /// The server does not know the device code (HTTP 404).
    #[error("device code was not recognized by the server")]
    AuthInvalid,

    /// The client-side polling deadline elapsed without approval.
    #[error("timed out waiting for sign-in approval (run `syncline login` to try again)")]
    AuthTimeout,

    #[error("not logged in to {base_url} (run `syncline login` first)")]
    NotAuthenticated { base_url: String },

    #[error(
        "no linked project (run `syncline link --project-id ...` or `syncline create-push`)"
    )]
    NotLinked,

    /// The remote project advanced past the version this push was based on
    /// (HTTP 409). Never retried automatically.
    #[error(
        "remote project has changed since the last sync (local base version {base_version}); run `syncline pull`, then push again"
    )]
    VersionConflict {
        base_version: u64,
        remote_version: Option<u64>,
    },

    /// Any other non-2xx response, with the server message when one could be
    /// parsed from the JSON error body.
    #[error("{label} failed with status {status}: {message}")]
    Transport {
        label: String,
        status: u16,
        message: String,
    },
}
