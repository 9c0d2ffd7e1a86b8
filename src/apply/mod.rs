//! apply
//!
//! The rename applicator: turns an ordered chain into on-disk renames.
//!
//! # Contract
//!
//! Each record is renamed to `<position><separator><original filename>`,
//! with positions 1-based in chain order. Renames are all-or-nothing: every
//! applied rename is journaled, and on any failure the journal is replayed
//! in reverse to restore the directory exactly as it was found before the
//! error is surfaced.
//!
//! # Invariants
//!
//! - An exclusive [`DirLock`] is held for the entire run, rollback included
//! - Target names are checked before the first rename; an existing file is
//!   never overwritten (`std::fs::rename` would clobber it silently)
//! - The chain itself is never mutated; this layer only touches the
//!   filesystem

pub mod lock;

pub use lock::{DirLock, LockError, LOCK_FILE};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::SequencedRecord;

/// Errors from applying renames.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Could not acquire the directory lock.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// A target name already exists; nothing was renamed.
    #[error("target '{path}' already exists; no files were renamed")]
    TargetExists { path: PathBuf },

    /// A rename failed; all prior renames were rolled back.
    #[error("failed to rename '{from}' to '{to}': {source} (all prior renames were rolled back)")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// A rename failed and the rollback could not fully restore the
    /// directory. The filesystem is in a partially renamed state.
    #[error(
        "failed to rename '{from}' to '{to}': {source}; \
         rollback incomplete: {restored} restored, could not restore {failed:?}"
    )]
    RollbackIncomplete {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
        restored: usize,
        failed: Vec<PathBuf>,
    },
}

/// One rename, planned or applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    /// Original path.
    pub from: PathBuf,
    /// Sequenced path.
    pub to: PathBuf,
}

/// Compute the rename steps for a chain without touching the filesystem.
pub fn plan(dir: &Path, chain: &[SequencedRecord], separator: &str) -> Vec<RenameStep> {
    chain
        .iter()
        .map(|entry| RenameStep {
            from: dir.join(&entry.record.filename),
            to: dir.join(format!(
                "{}{}{}",
                entry.position, separator, entry.record.filename
            )),
        })
        .collect()
}

/// Apply the chain's renames to `dir`.
///
/// Returns the applied steps in order. On failure the directory is left
/// exactly as it was found, unless the rollback itself fails, in which case
/// [`ApplyError::RollbackIncomplete`] reports what could not be restored.
pub fn apply(
    dir: &Path,
    chain: &[SequencedRecord],
    separator: &str,
) -> Result<Vec<RenameStep>, ApplyError> {
    let _lock = DirLock::acquire(dir)?;

    let steps = plan(dir, chain, separator);

    // Collision check up front so a failure here renames nothing.
    for step in &steps {
        if step.to.exists() {
            return Err(ApplyError::TargetExists {
                path: step.to.clone(),
            });
        }
    }

    let mut applied: Vec<RenameStep> = Vec::with_capacity(steps.len());
    for step in steps {
        if let Err(source) = fs::rename(&step.from, &step.to) {
            return Err(rollback(applied, step, source));
        }
        applied.push(step);
    }

    Ok(applied)
}

/// Reverse already-applied renames after `failed_step` failed.
fn rollback(applied: Vec<RenameStep>, failed_step: RenameStep, source: std::io::Error) -> ApplyError {
    let mut restored = 0usize;
    let mut failed: Vec<PathBuf> = Vec::new();

    for step in applied.iter().rev() {
        match fs::rename(&step.to, &step.from) {
            Ok(()) => restored += 1,
            Err(_) => failed.push(step.to.clone()),
        }
    }

    if failed.is_empty() {
        ApplyError::Rename {
            from: failed_step.from,
            to: failed_step.to,
            source,
        }
    } else {
        ApplyError::RollbackIncomplete {
            from: failed_step.from,
            to: failed_step.to,
            source,
            restored,
            failed,
        }
    }
}
