//! sequence command - Order revision files and rename them
//!
//! The end-to-end flow:
//!
//! 1. Scan the directory and extract (filename, revision_id, revises_id)
//! 2. Reconstruct the chain (build + flatten)
//! 3. Rename each file with its 1-based position prefix
//!
//! # Integrity Contract
//!
//! - Any chain invariant violation aborts before a single rename is attempted
//! - Renames are all-or-nothing; a failure partway through reverses every
//!   rename already applied (see [`crate::apply`])

use std::path::Path;

use anyhow::{Context as _, Result};

use super::common::{settings, warn_skipped};
use crate::apply;
use crate::cli::Context;
use crate::core::chain;
use crate::extract::scan_directory;
use crate::ui::output;

/// Options for the `sequence` command.
#[derive(Debug, Default)]
pub struct SequenceOptions {
    /// Show the planned renames without making changes.
    pub dry_run: bool,
    /// Separator flag; `None` falls back to configuration.
    pub separator: Option<String>,
    /// Extension filter flags; empty falls back to configuration.
    pub extensions: Vec<String>,
    /// Skip files without metadata instead of failing.
    pub skip_missing: bool,
}

/// Order the revision files in `directory` and rename them in sequence.
pub fn sequence(ctx: &Context, directory: &Path, options: SequenceOptions) -> Result<()> {
    let run = settings(
        ctx,
        directory,
        options.separator,
        options.extensions,
        options.skip_missing,
    )?;

    let outcome = scan_directory(&run.directory, &run.scan)
        .with_context(|| format!("Failed to scan '{}'", run.directory.display()))?;
    warn_skipped(ctx, &outcome);
    for record in &outcome.records {
        output::debug(
            format!(
                "extracted {}: revision_id={} revises_id={}",
                record.filename,
                record.revision_id,
                record
                    .revises_id
                    .as_ref()
                    .map(|id| id.as_str())
                    .unwrap_or("<root>")
            ),
            ctx.verbosity,
        );
    }

    let chain = chain::sequence(outcome.records)
        .context("Revision chain could not be reconstructed")?;

    if options.dry_run {
        output::print("Planned renames (dry run, nothing changed):", ctx.verbosity);
        for step in apply::plan(&run.directory, &chain, &run.separator) {
            output::print(format!("  {}", output::format_step(&step)), ctx.verbosity);
        }
        return Ok(());
    }

    let applied = apply::apply(&run.directory, &chain, &run.separator)
        .context("Failed to apply renames")?;
    for step in &applied {
        output::print(output::format_step(step), ctx.verbosity);
    }
    output::print(
        format!("Sequenced {} files in '{}'", applied.len(), run.directory.display()),
        ctx.verbosity,
    );

    Ok(())
}
