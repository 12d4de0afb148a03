//! # Snapshot File Lock
//!
//! Advisory exclusive lock (flock on Unix, LockFile on Windows) taken by
//! every writer for the whole load-mutate-save cycle, so stores in separate
//! processes, or separate stores in one process, never interleave commits.

use crate::error::{CatalogError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Exclusive lock on a data file, released on drop.
#[derive(Debug)]
pub struct SnapshotLock {
    file: File,
    path: PathBuf,
}

impl SnapshotLock {
    /// Block until the lock at `path` is ours. The lock file is created if
    /// missing and left in place afterwards.
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(CatalogError::Io)?;

        if FileExt::try_lock_exclusive(&file).is_err() {
            debug!(path = %path.display(), "Waiting for snapshot lock");
            FileExt::lock_exclusive(&file).map_err(|e| {
                CatalogError::Storage(format!(
                    "Failed to lock {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        // Keep the file; waiters may already hold a handle to it.
        let _ = FileExt::unlock(&self.file);
    }
}
