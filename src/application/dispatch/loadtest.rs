//! `loadtest`: run the loadtest binary with forwarded options.

use super::Dispatcher;
use crate::error::Result;
use crate::port::ProcessRunner;

const LOADTEST_BIN: &str = "loadtest";

impl<R: ProcessRunner> Dispatcher<R> {
    /// Echo `options` and pass them unchanged to the loadtest binary.
    ///
    /// # Errors
    ///
    /// Returns the loadtest failure unchanged, or an output error.
    pub async fn loadtest(&self, options: Vec<String>) -> Result<()> {
        self.emit(format!("{options:?}\n").as_bytes())?;
        let invocation = self.cargo_bin(LOADTEST_BIN, options);
        self.runner.run(&invocation).await
    }
}
