mod config;
mod manifest;

pub use self::config::*;
pub use self::manifest::*;
