//! apply::lock
//!
//! Exclusive per-directory lock for rename runs.
//!
//! # Architecture
//!
//! The directory lock ensures only one filament run can rename files in a
//! directory at a time. Renames must be serialized for the rollback
//! guarantee to be meaningful: a concurrent run could otherwise observe or
//! disturb a half-applied sequence.
//!
//! # Storage
//!
//! - `<dir>/.filament.lock` - Lock file with OS-level exclusive lock
//!
//! # Invariants
//!
//! - Lock must be held for the entire rename run, including rollback
//! - Lock is automatically released on drop (RAII pattern)
//! - Lock acquisition is non-blocking (fails fast if locked)

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Name of the lock file inside the sequenced directory.
pub const LOCK_FILE: &str = ".filament.lock";

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("directory is locked by another filament process")]
    AlreadyLocked,

    /// Failed to create the lock file.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),
}

/// An exclusive lock on a directory.
///
/// The lock is released when this guard is dropped, so it stays held even if
/// the rename run panics partway through.
#[derive(Debug)]
pub struct DirLock {
    /// Path to the lock file.
    path: PathBuf,
    /// Open handle with the lock held; `None` after release.
    file: Option<File>,
}

impl DirLock {
    /// Attempt to acquire the lock for `dir`.
    ///
    /// Uses OS-level file locking via `fs2`, which works across processes.
    /// Non-blocking: if another process holds the lock this returns
    /// [`LockError::AlreadyLocked`] immediately.
    pub fn acquire(dir: &Path) -> Result<Self, LockError> {
        let path = dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e)))?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(LockError::AlreadyLocked),
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn acquire_succeeds() {
        let temp = TempDir::new().expect("temp dir");
        let lock = DirLock::acquire(temp.path()).expect("acquire lock");
        assert!(lock.is_held());
        assert!(lock.path().exists());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let temp = TempDir::new().expect("temp dir");
        let _lock = DirLock::acquire(temp.path()).expect("first acquire");

        let result = DirLock::acquire(temp.path());
        assert!(matches!(result, Err(LockError::AlreadyLocked)));
    }

    #[test]
    fn released_on_drop() {
        let temp = TempDir::new().expect("temp dir");
        {
            let lock = DirLock::acquire(temp.path()).expect("first acquire");
            assert!(lock.is_held());
        }
        let lock = DirLock::acquire(temp.path()).expect("second acquire");
        assert!(lock.is_held());
    }

    #[test]
    fn lock_file_lives_in_the_directory() {
        let temp = TempDir::new().expect("temp dir");
        let lock = DirLock::acquire(temp.path()).expect("acquire");
        assert_eq!(lock.path(), temp.path().join(LOCK_FILE));
    }
}
