//! Advisory locking using flock(2) to serialize read-modify-write cycles.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

/// An exclusive file lock. Released on drop (file close releases flock).
pub struct FileLock {
    _file: File,
}

impl FileLock {
    /// Acquire an exclusive lock on the sidecar file, blocking until available.
    pub fn exclusive(path: &Path) -> Result<Self> {
        let file = open_sidecar(path).with_context(|| format!("open lock file {}", path.display()))?;
        Self::hold(file, path)
    }

    /// Lock for one transaction over `store`. `None` means run unlocked.
    ///
    /// The sidecar at `lock_path` is preferred. When it cannot be created
    /// (missing or read-only directory) the store file itself is locked, and
    /// a store that does not exist yet is left unlocked so that reads still
    /// see an empty store.
    pub fn for_store(enabled: bool, lock_path: &Path, store: &Path) -> Result<Option<Self>> {
        if !enabled {
            return Ok(None);
        }
        let sidecar_err = match open_sidecar(lock_path) {
            Ok(file) => return Self::hold(file, lock_path).map(Some),
            Err(e) => e,
        };
        match File::open(store) {
            Ok(file) => {
                tracing::warn!(
                    lock = %lock_path.display(),
                    error = %sidecar_err,
                    "lock file unavailable, locking the store instead"
                );
                Self::hold(file, store).map(Some)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    lock = %lock_path.display(),
                    error = %sidecar_err,
                    "lock file unavailable and store absent, running unlocked"
                );
                Ok(None)
            }
            Err(_) => Err(sidecar_err)
                .with_context(|| format!("open lock file {}", lock_path.display())),
        }
    }

    fn hold(file: File, path: &Path) -> Result<Self> {
        file.lock_exclusive()
            .with_context(|| format!("acquire lock {}", path.display()))?;
        tracing::debug!(path = %path.display(), "acquired store lock");
        Ok(Self { _file: file })
    }
}

fn open_sidecar(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
}

/// Whether another handle can take the lock on `path` within `timeout`.
#[cfg(test)]
pub(crate) fn acquired_within(path: &Path, timeout: std::time::Duration) -> bool {
    let path = path.to_path_buf();
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let lock = File::open(&path)
            .or_else(|_| open_sidecar(&path))
            .and_then(|f| f.lock_exclusive().map(|_| f));
        let _ = tx.send(lock.is_ok());
    });
    rx.recv_timeout(timeout).unwrap_or(false)
}
