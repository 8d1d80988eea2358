//! zk - Operator command dispatcher for zkSync development and operations.
//!
//! This crate maps named operator commands (`zk run <operation>`) onto
//! filesystem actions and external processes: downloading universal setup
//! keys, printing test wallets, dumping logs, and launching the prover,
//! loadtest and explorer tooling.
//!
//! # Architecture
//!
//! - **`application::dispatch`** - The [`Dispatcher`](application::dispatch::Dispatcher)
//!   and one handler per operation
//! - **`port`** - The [`ProcessRunner`](port::ProcessRunner) seam every
//!   external program is reached through
//! - **`adapter::outbound::process`** - Real child processes via `tokio::process`
//! - **`adapter::inbound::cli`** - `clap` definitions, operation registry,
//!   `miette` diagnostics
//!
//! # Modules
//!
//! - [`adapter`] - CLI front end and process runner
//! - [`application`] - Dispatcher, handlers, wallet derivation, directory scoping
//! - [`error`] - Error types for the crate
//! - [`infrastructure`] - Settings and logging
//! - [`port`] - Trait seams for external collaborators
//!
//! # Features
//!
//! - `testkit` - Expose [`testkit`] (fake process runner, output capture) to
//!   integration tests
//!
//! # Example
//!
//! ```no_run
//! use zk::adapter::outbound::process::SystemRunner;
//! use zk::application::dispatch::{Dispatcher, Operation};
//! use zk::infrastructure::config::settings::Settings;
//!
//! # async fn example() -> zk::error::Result<()> {
//! let dispatcher = Dispatcher::new(Settings::load(None)?, SystemRunner::new());
//! dispatcher.execute(Operation::PlonkSetup).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
