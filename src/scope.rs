//! Scoped changes to process state.

use std::io;
use std::path::{Path, PathBuf};

/// Changes the working directory and restores the previous one when dropped,
/// including on early return and panic unwinding.
///
/// The working directory is process-wide, so guards should not be held on
/// several threads at once.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct WorkingDir {
    previous: PathBuf,
}

impl WorkingDir {
    /// # Errors
    ///
    /// Returns `Err` if the current directory cannot be read or `path` cannot
    /// be entered. The working directory is unchanged in that case.
    pub fn enter(path: impl AsRef<Path>) -> io::Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(path.as_ref())?;
        tracing::debug!(from = %previous.display(), to = %path.as_ref().display(), "entered directory");
        Ok(Self { previous })
    }

    /// The directory that will be restored.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            tracing::warn!(dir = %self.previous.display(), error = %e, "failed to restore working directory");
        }
    }
}
