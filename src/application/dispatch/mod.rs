//! Operation dispatcher.
//!
//! Maps each [`Operation`] to its handler. Handlers build [`Invocation`]s for
//! external collaborators and run them through the injected
//! [`ProcessRunner`], so tests can swap in a fake and assert on the exact
//! argument lists.
//!
//! # Handlers
//!
//! - [`keys`] - `plonk-setup`
//! - [`scripts`] - `revert-reason`, `explorer`
//! - [`prover`] - `exit-proof`
//! - [`logs`] - `cat-logs`
//! - [`accounts`] - `test-accounts`
//! - [`loadtest`] - `loadtest`
//! - [`delegate`] - `verify-keys`, `data-restore`

pub mod accounts;
pub mod delegate;
pub mod keys;
pub mod loadtest;
pub mod logs;
mod operation;
pub mod prover;
pub mod scripts;

use std::io::Write;

use parking_lot::Mutex;
use tracing::info;

pub use operation::{Completion, Operation};

use crate::error::Result;
use crate::infrastructure::config::settings::Settings;
use crate::port::{Invocation, ProcessRunner};

/// Runs operations against a fixed configuration and process runner.
pub struct Dispatcher<R> {
    settings: Settings,
    runner: R,
    stdout: Mutex<Box<dyn Write + Send>>,
}

impl<R: ProcessRunner> Dispatcher<R> {
    /// Create a dispatcher that prints to the process's stdout.
    #[must_use]
    pub fn new(settings: Settings, runner: R) -> Self {
        Self {
            settings,
            runner,
            stdout: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    /// Redirect operation output (logs, accounts, echoed options).
    #[must_use]
    pub fn with_stdout(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stdout = Mutex::new(Box::new(writer));
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `operation` to completion.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error; a failed child surfaces as
    /// [`Error::ExternalProcess`](crate::error::Error::ExternalProcess)
    /// carrying its exit status.
    pub async fn execute(&self, operation: Operation) -> Result<Completion> {
        info!(operation = operation.name(), "Dispatching");

        match operation {
            Operation::VerifyKeys { args } => {
                self.forward(&self.settings.delegates.verify_keys, args).await?;
            }
            Operation::DataRestore { args } => {
                self.forward(&self.settings.delegates.data_restore, args).await?;
            }
            Operation::TestAccounts => self.test_accounts()?,
            Operation::Explorer => self.explorer().await?,
            Operation::CatLogs { exit_code } => return Ok(self.cat_logs(exit_code)),
            Operation::PlonkSetup => self.plonk_setup().await?,
            Operation::RevertReason { tx_hash, web3_url } => {
                self.revert_reason(&tx_hash, web3_url.as_deref()).await?;
            }
            Operation::ExitProof {
                account,
                token,
                help,
            } => {
                self.exit_proof(account.as_deref(), token.as_deref(), help).await?;
            }
            Operation::Loadtest { options } => self.loadtest(options).await?,
        }

        Ok(Completion::Done)
    }

    /// Write `bytes` to the operation output and flush.
    fn emit(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(bytes)?;
        out.flush()
    }

    /// `cargo run --release --bin <bin> -- <args...>` from the project root.
    fn cargo_bin<I, S>(&self, bin: &str, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new("cargo")
            .args(["run", "--release", "--bin", bin, "--"])
            .args(args)
            .current_dir(&self.settings.workdir)
    }
}
