use crate::paths::CourtlogPaths;
use anyhow::{bail, Context};
use fs2::FileExt;
use std::fs::File;
use tracing::debug;

/// Held by whichever process is mutating the match; `.courtlog/LOCK` is
/// unlocked again on drop.
pub struct WorkspaceLock {
    file: File,
}

impl WorkspaceLock {
    /// Fails straight away, without waiting, if another process holds it.
    pub fn acquire(paths: &CourtlogPaths) -> anyhow::Result<Self> {
        let path = &paths.lock_file;
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("opening lock file {}", path.display()))?;
        if file.try_lock_exclusive().is_err() {
            bail!(
                "another courtlog process is recording this match ({})",
                path.display()
            );
        }
        debug!(path = %path.display(), "workspace locked");
        Ok(Self { file })
    }
}

impl Drop for WorkspaceLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
