//! `exit-proof`: generate an exit proof with the example prover.

use tracing::warn;

use super::Dispatcher;
use crate::error::Result;
use crate::port::{Invocation, ProcessRunner};

/// What the prover is asked to do.
///
/// Both ids are required for a proof. When either is missing, or help was
/// asked for explicitly, the prover prints its own usage instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofRequest<'a> {
    Help,
    Prove { account: &'a str, token: &'a str },
}

impl<'a> ProofRequest<'a> {
    #[must_use]
    pub fn from_options(account: Option<&'a str>, token: Option<&'a str>, help: bool) -> Self {
        match (account, token) {
            (Some(account), Some(token)) if !help => Self::Prove { account, token },
            _ => Self::Help,
        }
    }

    /// Flags passed after `--` to the prover.
    #[must_use]
    pub fn prover_args(&self) -> Vec<&'a str> {
        match *self {
            Self::Help => vec!["--help"],
            Self::Prove { account, token } => vec!["--account_id", account, "--token", token],
        }
    }
}

impl<R: ProcessRunner> Dispatcher<R> {
    /// Generate an exit proof for `account` and `token`.
    ///
    /// # Errors
    ///
    /// Returns the prover's failure unchanged.
    pub async fn exit_proof(
        &self,
        account: Option<&str>,
        token: Option<&str>,
        help: bool,
    ) -> Result<()> {
        let request = ProofRequest::from_options(account, token, help);
        if request == ProofRequest::Help && !help {
            warn!("--account and --token are both required; showing prover help");
        }

        let invocation = Invocation::new("cargo")
            .args([
                "run",
                "--example",
                "generate_exit_proof",
                "--release",
                "--",
            ])
            .args(request.prover_args())
            .current_dir(&self.settings.workdir);
        self.runner.run(&invocation).await
    }
}
