use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {var} is not set")]
    MissingEnv { var: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String, known: Vec<&'static str> },

    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("{program} exited with {}", describe_code(*.code))]
    ExternalProcess { program: String, code: Option<i32> },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("filesystem error at {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("wallet derivation failed: {0}")]
    Wallet(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Process exit status the binary should terminate with for this error.
    ///
    /// A failed child hands its own status through unchanged; everything else
    /// maps to 1 except usage errors, which keep clap's status.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExternalProcess { code: Some(code), .. } if *code != 0 => *code,
            Self::Usage(err) => err.exit_code(),
            _ => 1,
        }
    }

    pub(crate) fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
