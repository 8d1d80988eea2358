//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Shift the configured level by CLI verbosity flags.
    ///
    /// Each `-v` raises the level one step; `--quiet` pins it to `error`.
    #[must_use]
    pub fn adjusted(mut self, verbose: u8, quiet: bool) -> Self {
        if quiet {
            self.level = "error".into();
            return self;
        }
        if verbose > 0 {
            let current = LEVELS
                .iter()
                .position(|level| level.eq_ignore_ascii_case(&self.level))
                .unwrap_or(2);
            let raised = (current + usize::from(verbose)).min(LEVELS.len() - 1);
            self.level = LEVELS[raised].into();
        }
        self
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr so stdout stays clean for command output.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        // A subscriber may already be installed by a test harness.
        let _ = result;
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
