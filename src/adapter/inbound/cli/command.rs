//! Command-line interface definitions.
//!
//! Defines the CLI structure for the `zk` binary using `clap`. All operator
//! operations live under the `run` group; each subcommand maps one-to-one
//! onto an [`Operation`].
//!
//! The `zk` flags are accepted only before `run`. Anything after a
//! forwarding operation belongs to the tool it forwards to.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dispatch::Operation;

/// zkSync development and operations toolbox
#[derive(Parser, Debug)]
#[command(name = "zk")]
#[command(version)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log format [pretty, json]
    #[arg(long)]
    pub log_format: Option<String>,

    /// Decrease output verbosity
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the zk CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run miscellaneous applications
    #[command(subcommand)]
    Run(RunCommand),
}

/// Subcommands for `zk run`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RunCommand {
    /// Verify or unpack proving keys (forwarded to the key tool)
    #[command(disable_help_flag = true)]
    VerifyKeys(ForwardArgs),
    /// Restore state from L1 data (forwarded to the data restore tool)
    #[command(disable_help_flag = true)]
    DataRestore(ForwardArgs),
    /// Print ethereum test accounts
    TestAccounts,
    /// Run zksync explorer locally
    Explorer,
    /// Print server and prover logs
    CatLogs(CatLogsArgs),
    /// Download missing keys
    PlonkSetup,
    /// Get the revert reason for ethereum transaction
    RevertReason(RevertReasonArgs),
    /// Generate exit proof
    #[command(disable_help_flag = true)]
    ExitProof(ExitProofArgs),
    /// Run the loadtest
    Loadtest(LoadtestArgs),
}

/// Arguments handed verbatim to a delegate tool.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ForwardArgs {
    /// Arguments for the delegate tool
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for `cat-logs`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CatLogsArgs {
    /// Exit with this status after printing
    #[arg(allow_negative_numbers = true)]
    pub exit_code: Option<i32>,
}

/// Arguments for `revert-reason`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RevertReasonArgs {
    /// Transaction hash
    pub tx_hash: String,
    /// Web3 endpoint to query
    pub web3_url: Option<String>,
}

/// Arguments for `exit-proof`.
///
/// The built-in help flag is replaced by a plain `--help` option so that
/// `exit-proof --help` reaches the prover's own help output.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ExitProofArgs {
    /// Account id
    #[arg(long, value_name = "ID")]
    pub account: Option<String>,
    /// Token id
    #[arg(long, value_name = "ID")]
    pub token: Option<String>,
    /// Show the prover's help instead of generating a proof
    #[arg(long)]
    pub help: bool,
}

/// Arguments for `loadtest`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LoadtestArgs {
    /// Options passed through to the loadtest binary
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub options: Vec<String>,
}

impl From<RunCommand> for Operation {
    fn from(command: RunCommand) -> Self {
        match command {
            RunCommand::VerifyKeys(ForwardArgs { args }) => Self::VerifyKeys { args },
            RunCommand::DataRestore(ForwardArgs { args }) => Self::DataRestore { args },
            RunCommand::TestAccounts => Self::TestAccounts,
            RunCommand::Explorer => Self::Explorer,
            RunCommand::CatLogs(args) => Self::CatLogs {
                exit_code: args.exit_code,
            },
            RunCommand::PlonkSetup => Self::PlonkSetup,
            RunCommand::RevertReason(args) => Self::RevertReason {
                tx_hash: args.tx_hash,
                web3_url: args.web3_url,
            },
            RunCommand::ExitProof(args) => Self::ExitProof {
                account: args.account,
                token: args.token,
                help: args.help,
            },
            RunCommand::Loadtest(args) => Self::Loadtest {
                options: args.options,
            },
        }
    }
}
