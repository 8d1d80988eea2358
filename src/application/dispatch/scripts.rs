//! Operations backed by JavaScript tooling: `revert-reason` and `explorer`.

use super::Dispatcher;
use crate::application::workdir::ScopedDir;
use crate::error::Result;
use crate::port::{Invocation, ProcessRunner};

const CONTRACTS_DIR: &str = "contracts";
const EXPLORER_DIR: &str = "infrastructure/explorer";

impl<R: ProcessRunner> Dispatcher<R> {
    /// Run the contracts' revert-reason script for `tx_hash`.
    ///
    /// A missing `web3_url` is passed as an empty argument so the script
    /// always receives two positionals.
    ///
    /// # Errors
    ///
    /// Returns the script's failure unchanged.
    pub async fn revert_reason(&self, tx_hash: &str, web3_url: Option<&str>) -> Result<()> {
        let contracts = ScopedDir::existing(&self.settings.workdir, CONTRACTS_DIR);
        let invocation = contracts.run(Invocation::new("npx").args([
            "ts-node",
            "revert-reason.ts",
            tx_hash,
            web3_url.unwrap_or_default(),
        ]));
        self.runner.run(&invocation).await
    }

    /// Serve the explorer; blocks until the server exits.
    ///
    /// # Errors
    ///
    /// Returns the package runner's failure unchanged.
    pub async fn explorer(&self) -> Result<()> {
        let invocation = Invocation::new("yarn")
            .args(["--cwd", EXPLORER_DIR, "serve"])
            .current_dir(&self.settings.workdir);
        self.runner.run(&invocation).await
    }
}
