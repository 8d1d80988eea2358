//! Nested command groups handled by sibling tools.
//!
//! `verify-keys` and `data-restore` are not interpreted here: their argument
//! lists go verbatim to the configured delegate binary.

use tracing::debug;

use super::Dispatcher;
use crate::error::Result;
use crate::port::ProcessRunner;

impl<R: ProcessRunner> Dispatcher<R> {
    /// Hand `args` to the release build of `bin`.
    ///
    /// # Errors
    ///
    /// Returns the delegate's failure unchanged.
    pub async fn forward(&self, bin: &str, args: Vec<String>) -> Result<()> {
        debug!(bin, ?args, "Forwarding to delegate");
        let invocation = self.cargo_bin(bin, args);
        self.runner.run(&invocation).await
    }
}
