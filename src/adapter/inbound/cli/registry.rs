//! Operation registry and name-based dispatch.
//!
//! The registry is derived from the `run` command definition, so the names
//! and options listed here are exactly the ones the parser accepts.
//!
//! [`dispatch`] is the library entry point for running an operation by name
//! with raw arguments. The `zk` binary parses its full command line through
//! [`Cli`] and only uses this module for operation names and usage text when
//! reporting an unknown command.

use std::sync::OnceLock;

use clap::{ArgAction, CommandFactory, FromArgMatches, Subcommand};

use super::command::{Cli, RunCommand};
use crate::application::dispatch::{Completion, Dispatcher, Operation};
use crate::error::{Error, Result};
use crate::port::ProcessRunner;

/// A typed option accepted by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Long flag name or positional value name.
    pub name: String,
    pub positional: bool,
    pub required: bool,
    /// Whether the option consumes a value.
    pub takes_value: bool,
    pub default: Option<String>,
}

/// Name, description and options of a registered operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: String,
    pub options: Vec<OptionDescriptor>,
}

static REGISTRY: OnceLock<Vec<OperationDescriptor>> = OnceLock::new();

fn run_command() -> clap::Command {
    RunCommand::augment_subcommands(clap::Command::new("run"))
}

fn describe(command: &clap::Command) -> OperationDescriptor {
    let options = command
        .get_arguments()
        .map(|arg| OptionDescriptor {
            name: arg
                .get_long()
                .map(str::to_string)
                .or_else(|| {
                    arg.get_value_names()
                        .and_then(|names| names.first())
                        .map(ToString::to_string)
                })
                .unwrap_or_else(|| arg.get_id().to_string()),
            positional: arg.is_positional(),
            required: arg.is_required_set(),
            takes_value: !matches!(
                arg.get_action(),
                ArgAction::SetTrue | ArgAction::SetFalse | ArgAction::Count
            ),
            default: arg
                .get_default_values()
                .first()
                .map(|value| value.to_string_lossy().into_owned()),
        })
        .collect();

    OperationDescriptor {
        name: command.get_name().to_string(),
        description: command
            .get_about()
            .map(ToString::to_string)
            .unwrap_or_default(),
        options,
    }
}

/// All registered operations, in declaration order.
pub fn operations() -> &'static [OperationDescriptor] {
    REGISTRY.get_or_init(|| run_command().get_subcommands().map(describe).collect())
}

/// Names of all registered operations.
#[must_use]
pub fn names() -> Vec<&'static str> {
    operations().iter().map(|op| op.name.as_str()).collect()
}

/// Look up an operation by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static OperationDescriptor> {
    operations().iter().find(|op| op.name == name)
}

/// Parse `args` for the operation called `name`.
///
/// # Errors
///
/// Returns [`Error::UnknownCommand`] when no such operation exists, and
/// [`Error::Usage`] when the arguments do not fit it.
pub fn parse(name: &str, args: &[String]) -> Result<Operation> {
    let Some(descriptor) = find(name) else {
        return Err(Error::UnknownCommand {
            name: name.to_string(),
            known: names(),
        });
    };

    let argv = ["run", descriptor.name.as_str()]
        .into_iter()
        .map(str::to_string)
        .chain(args.iter().cloned());
    let matches = run_command()
        .subcommand_required(true)
        .try_get_matches_from(argv)?;
    let command = RunCommand::from_arg_matches(&matches)?;
    Ok(command.into())
}

/// Look up `name`, parse `args` for it and run it on `dispatcher`.
///
/// Nothing is spawned when the name is unknown or the arguments are invalid.
///
/// # Errors
///
/// Returns lookup, parse or handler errors.
pub async fn dispatch<R: ProcessRunner>(
    dispatcher: &Dispatcher<R>,
    name: &str,
    args: &[String],
) -> Result<Completion> {
    let operation = parse(name, args)?;
    dispatcher.execute(operation).await
}

/// Usage text for `zk run`, used when reporting unknown commands.
#[must_use]
pub fn usage() -> String {
    let mut cli = Cli::command();
    cli.find_subcommand_mut("run")
        .map(|run| run.render_help().to_string())
        .unwrap_or_default()
}
