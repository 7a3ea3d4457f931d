//! Client for keeping a local project directory in sync with a platform
//! project over its CLI API: device-code login, content-addressed pull/push
//! with optimistic-concurrency conflict detection, and persisted sync state.

pub mod credentials;
pub mod error;
pub mod model;
pub mod progress;
pub mod remote;
pub mod store;
pub mod sync;
pub mod walker;
