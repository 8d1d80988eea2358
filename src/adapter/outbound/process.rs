//! Process runner backed by real child processes.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::{Invocation, ProcessRunner};

/// Spawns children with inherited stdio and waits for them.
///
/// Children are killed if the waiting future is dropped, so an interrupted
/// dispatcher never leaves a prover or downloader running behind it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn command(invocation: &Invocation) -> Command {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.arguments())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }
        command
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        debug!(command = %invocation, "Spawning");

        let spawn_error = |source| Error::Spawn {
            program: invocation.program().to_string(),
            source,
        };
        let mut child = Self::command(invocation).spawn().map_err(spawn_error)?;
        let status = child.wait().await.map_err(spawn_error)?;

        if status.success() {
            debug!(command = %invocation, "Exited successfully");
            return Ok(());
        }

        Err(Error::ExternalProcess {
            program: invocation.program().to_string(),
            code: status.code(),
        })
    }
}
