//! Scoped working-directory context.
//!
//! Operations that "work inside" a directory get a [`ScopedDir`] instead of
//! changing the process-wide current directory. Files are resolved through
//! it and child processes are started in it, so nothing needs restoring when
//! the operation ends, however it ends.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::port::Invocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedDir {
    path: PathBuf,
}

impl ScopedDir {
    /// Enter `relative` under `root`, creating it (and any parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileSystem`] if the directory cannot be created.
    pub fn enter(root: &Path, relative: impl AsRef<Path>) -> Result<Self> {
        let path = root.join(relative);
        std::fs::create_dir_all(&path).map_err(|source| Error::file_system(&path, source))?;
        Ok(Self { path })
    }

    /// Enter `relative` under `root` without touching the filesystem.
    #[must_use]
    pub fn existing(root: &Path, relative: impl AsRef<Path>) -> Self {
        Self {
            path: root.join(relative),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve `name` inside this directory.
    #[must_use]
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    #[must_use]
    pub fn contains(&self, name: impl AsRef<Path>) -> bool {
        self.join(name).exists()
    }

    /// Stamp `invocation` with this directory as its working directory.
    #[must_use]
    pub fn run(&self, invocation: Invocation) -> Invocation {
        invocation.current_dir(&self.path)
    }
}
