//! The operations the dispatcher knows how to run.

/// A parsed operation with its options.
///
/// Inbound adapters translate their own argument representation into this
/// enum; the dispatcher never sees raw command-line strings except where an
/// operation forwards them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Forward to the key verification tool.
    VerifyKeys { args: Vec<String> },
    /// Forward to the data restore tool.
    DataRestore { args: Vec<String> },
    /// Print mnemonic-derived test wallets.
    TestAccounts,
    /// Serve the block explorer locally.
    Explorer,
    /// Print server and prover logs, optionally exiting with a given status.
    CatLogs { exit_code: Option<i32> },
    /// Download missing universal setup keys.
    PlonkSetup,
    /// Look up the revert reason of a transaction.
    RevertReason {
        tx_hash: String,
        web3_url: Option<String>,
    },
    /// Generate an exit proof; shows the prover help when `help` is set or
    /// an id is missing.
    ExitProof {
        account: Option<String>,
        token: Option<String>,
        help: bool,
    },
    /// Run the loadtest binary with forwarded options.
    Loadtest { options: Vec<String> },
}

impl Operation {
    /// The registry name of this operation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::VerifyKeys { .. } => "verify-keys",
            Self::DataRestore { .. } => "data-restore",
            Self::TestAccounts => "test-accounts",
            Self::Explorer => "explorer",
            Self::CatLogs { .. } => "cat-logs",
            Self::PlonkSetup => "plonk-setup",
            Self::RevertReason { .. } => "revert-reason",
            Self::ExitProof { .. } => "exit-proof",
            Self::Loadtest { .. } => "loadtest",
        }
    }
}

/// How an operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Return normally; the binary exits with status 0.
    Done,
    /// Terminate the process with exactly this status.
    Exit(i32),
}
