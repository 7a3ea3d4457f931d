//! Progress reporting port. Sync operations never print; they report through
//! an observer injected per invocation so callers decide how (and whether) to
//! surface per-file progress and server-side warnings.

use crate::remote::{ServerWarning, WarningKind};

pub trait ProgressObserver {
    fn progress(&mut self, message: &str);
    fn warning(&mut self, warning: &ServerWarning);
}

/// Discards everything.
pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn progress(&mut self, _message: &str) {}
    fn warning(&mut self, _warning: &ServerWarning) {}
}

/// Prints progress to stdout and warnings to stderr; used by the CLI.
pub struct StdoutProgress;

impl ProgressObserver for StdoutProgress {
    fn progress(&mut self, message: &str) {
        println!("{message}");
    }

    fn warning(&mut self, warning: &ServerWarning) {
        let path = warning.path.as_deref().unwrap_or("<unknown path>");
        match warning.kind {
            WarningKind::Excluded => {
                eprintln!("warning: {path} was excluded by the server");
            }
            WarningKind::Failed => {
                eprintln!("warning: {path} failed on the server: {}", warning.message);
            }
        }
    }
}
