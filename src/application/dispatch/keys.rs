//! `plonk-setup`: fetch missing universal setup keys.

use tracing::{debug, info};

use super::Dispatcher;
use crate::application::workdir::ScopedDir;
use crate::error::Result;
use crate::infrastructure::config::settings::KeysConfig;
use crate::port::{Invocation, ProcessRunner};

/// Directory, relative to the project root, holding the setup keys.
pub const SETUP_DIR: &str = "keys/setup";

impl<R: ProcessRunner> Dispatcher<R> {
    /// Download every setup key in the configured power range that is not
    /// already present in `keys/setup`.
    ///
    /// Downloads run one after another with a pause in between. The first
    /// failed download aborts the operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileSystem`](crate::error::Error::FileSystem) if the
    /// key directory cannot be created, or the downloader's failure.
    pub async fn plonk_setup(&self) -> Result<()> {
        let keys = &self.settings.keys;
        let setup = ScopedDir::enter(&self.settings.workdir, SETUP_DIR)?;

        for power in keys.powers() {
            let file = KeysConfig::file_name(power);
            if setup.contains(&file) {
                debug!(%file, "Setup key present, skipping");
                continue;
            }

            info!(%file, "Downloading setup key");
            let download = setup.run(
                Invocation::new(keys.downloader.as_str())
                    .arg("-c")
                    .arg(keys.url(power)),
            );
            self.runner.run(&download).await?;

            let pause = keys.download_pause();
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        Ok(())
    }
}
