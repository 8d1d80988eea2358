//! Dispatcher configuration loading and validation.
//!
//! Provides the [`Settings`] struct handed to the dispatcher at construction.
//! Values come from built-in defaults, an optional TOML file, and two
//! environment variables: `ZKSYNC_HOME` (project root) and `TEST_MNEMONIC`.
//!
//! # Example
//!
//! ```no_run
//! use zk::infrastructure::config::settings::Settings;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load(None)?;
//!     settings.logging.init();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Environment variable holding the project root.
pub const HOME_ENV: &str = "ZKSYNC_HOME";
/// Environment variable holding the test-account mnemonic.
pub const MNEMONIC_ENV: &str = "TEST_MNEMONIC";
/// Environment variable pointing at an optional TOML config file.
pub const CONFIG_ENV: &str = "ZK_CONFIG";

/// Universal setup key download settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Base URL the setup files are served from.
    pub base_url: String,
    /// Downloader program; invoked as `<downloader> -c <url>`.
    pub downloader: String,
    /// Smallest power-of-two exponent to fetch.
    pub min_power: u32,
    /// Largest power-of-two exponent to fetch (inclusive).
    pub max_power: u32,
    /// Pause between consecutive downloads, in milliseconds.
    pub download_pause_ms: u64,
}

impl KeysConfig {
    /// Exponents to fetch, in ascending order.
    #[must_use]
    pub fn powers(&self) -> RangeInclusive<u32> {
        self.min_power..=self.max_power
    }

    /// File name of the setup key for `power`.
    #[must_use]
    pub fn file_name(power: u32) -> String {
        format!("setup_2^{power}.key")
    }

    /// Download URL of the setup key for `power`, with `^` percent-encoded.
    #[must_use]
    pub fn url(&self, power: u32) -> String {
        format!(
            "{}/setup_2%5E{power}.key",
            self.base_url.trim_end_matches('/')
        )
    }

    #[must_use]
    pub fn download_pause(&self) -> Duration {
        Duration::from_millis(self.download_pause_ms)
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            base_url: "https://universal-setup.ams3.digitaloceanspaces.com".into(),
            downloader: "axel".into(),
            min_power: 20,
            max_power: 26,
            download_pause_ms: 1000,
        }
    }
}

/// Binaries that the nested `verify-keys` and `data-restore` groups forward to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DelegatesConfig {
    pub verify_keys: String,
    pub data_restore: String,
}

impl Default for DelegatesConfig {
    fn default() -> Self {
        Self {
            verify_keys: "key_generator".into(),
            data_restore: "zksync_data_restore".into(),
        }
    }
}

/// Dispatcher configuration.
///
/// Parse from TOML with [`Settings::parse_toml`] or load file and
/// environment together with [`Settings::load`].
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Project root every relative path is resolved against.
    ///
    /// Never read from the file; taken from `ZKSYNC_HOME` or the starting
    /// directory.
    #[serde(skip)]
    pub workdir: PathBuf,

    /// Mnemonic for `test-accounts`. Only ever read from `TEST_MNEMONIC`.
    #[serde(skip)]
    pub mnemonic: Option<String>,

    /// Setup key download settings.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Delegate binaries for nested command groups.
    #[serde(default)]
    pub delegates: DelegatesConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            mnemonic: None,
            keys: KeysConfig::default(),
            delegates: DelegatesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Build settings for a given project root without consulting the
    /// environment.
    #[must_use]
    pub fn from_parts(workdir: impl Into<PathBuf>, mnemonic: Option<String>) -> Self {
        Self {
            workdir: workdir.into(),
            mnemonic,
            ..Self::default()
        }
    }

    /// Parse configuration from TOML content. Environment is not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an optional TOML file plus the process environment.
    ///
    /// When `path` is `None`, `ZK_CONFIG` is consulted; when neither is set
    /// the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let settings = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
                        path: path.clone(),
                        source,
                    })?;
                Self::parse_toml(&content)?
            }
            None => Self::default(),
        };

        Ok(settings.with_process_env())
    }

    /// Built-in defaults with the process environment applied; no
    /// configuration file is read.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_process_env()
    }

    fn with_process_env(self) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.with_env(cwd, |var| std::env::var(var).ok())
    }

    /// Apply environment overrides using `lookup` instead of the process
    /// environment.
    #[must_use]
    pub fn with_env(mut self, cwd: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.workdir = lookup(HOME_ENV)
            .filter(|home| !home.is_empty())
            .map_or(cwd, PathBuf::from);
        self.mnemonic = lookup(MNEMONIC_ENV).filter(|phrase| !phrase.trim().is_empty());
        self
    }

    /// The mnemonic, or a configuration error naming the missing variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when no mnemonic is configured.
    pub fn require_mnemonic(&self) -> Result<&str> {
        self.mnemonic
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnv { var: MNEMONIC_ENV }.into())
    }

    fn validate(&self) -> Result<()> {
        if self.keys.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "keys.base_url",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.keys.downloader.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "keys.downloader",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.keys.min_power > self.keys.max_power {
            return Err(ConfigError::InvalidValue {
                field: "keys.min_power",
                reason: format!(
                    "{} is greater than max_power {}",
                    self.keys.min_power, self.keys.max_power
                ),
            }
            .into());
        }
        Ok(())
    }
}
