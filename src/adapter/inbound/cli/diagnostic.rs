//! Miette-based error diagnostics for CLI error presentation.
//!
//! Converts crate errors into diagnostics with a stable code and, where the
//! operator can do something about it, a help line.

use miette::Diagnostic;
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Unknown operation name, rendered with the list of known operations.
#[derive(Debug, Error, Diagnostic)]
#[error("unknown command '{name}'")]
#[diagnostic(code(zk::unknown_command))]
pub struct UnknownCommandError {
    pub name: String,

    #[help]
    pub help: Option<String>,
}

/// A child process failed; its own output has already been shown.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(zk::process))]
pub struct ProcessError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Configuration error with an optional fix suggestion.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(zk::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Any other failure.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(zk::error))]
pub struct GenericError {
    pub message: String,
}

/// Build the diagnostic report for `err`.
#[must_use]
pub fn report(err: &Error) -> miette::Report {
    match err {
        Error::UnknownCommand { name, known } => UnknownCommandError {
            name: name.clone(),
            help: Some(format!("available operations: {}", known.join(", "))),
        }
        .into(),
        Error::Spawn { program, .. } => ProcessError {
            message: err.to_string(),
            help: Some(format!("is `{program}` installed and on PATH?")),
        }
        .into(),
        Error::ExternalProcess { .. } => ProcessError {
            message: err.to_string(),
            help: None,
        }
        .into(),
        Error::Config(ConfigError::MissingEnv { var }) => ConfigDiagnostic {
            message: err.to_string(),
            help: Some(format!("export {var} or add it to .env")),
        }
        .into(),
        Error::Config(_) => ConfigDiagnostic {
            message: err.to_string(),
            help: None,
        }
        .into(),
        _ => GenericError {
            message: err.to_string(),
        }
        .into(),
    }
}
