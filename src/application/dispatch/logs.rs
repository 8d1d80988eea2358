//! `cat-logs`: dump server and prover logs.

use tracing::debug;

use super::{Completion, Dispatcher};
use crate::port::ProcessRunner;

/// Log files printed by `cat-logs`, with their headings.
pub const LOG_FILES: [(&str, &str); 2] = [
    ("SERVER LOGS", "server.log"),
    ("PROVER LOGS", "dummy_prover.log"),
];

impl<R: ProcessRunner> Dispatcher<R> {
    /// Print the server and prover logs from the project root.
    ///
    /// Never fails: unreadable logs and output errors are logged and skipped.
    /// With `exit_code` the caller is asked to terminate with that status.
    pub fn cat_logs(&self, exit_code: Option<i32>) -> Completion {
        for (heading, file) in LOG_FILES {
            let path = self.settings.workdir.join(file);
            match std::fs::read(&path) {
                Ok(contents) => {
                    let mut block = format!("\n{heading}:\n ").into_bytes();
                    block.extend_from_slice(&contents);
                    block.push(b'\n');
                    if let Err(e) = self.emit(&block) {
                        debug!(error = %e, "Failed to write logs");
                    }
                }
                Err(e) => debug!(path = %path.display(), error = %e, "Log not readable"),
            }
        }

        match exit_code {
            Some(code) => Completion::Exit(code),
            None => Completion::Done,
        }
    }
}
