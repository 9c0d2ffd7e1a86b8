//! check command - Validate the chain and print the computed order
//!
//! Runs the same extraction and chain reconstruction as `sequence` but never
//! touches the filesystem. With `--json` the order is emitted as a JSON
//! array for scripting.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::common::{settings, warn_skipped};
use crate::cli::Context;
use crate::core::chain;
use crate::core::types::SequencedRecord;
use crate::extract::scan_directory;
use crate::ui::output;

/// Options for the `check` command.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Emit the computed order as JSON.
    pub json: bool,
    /// Extension filter flags; empty falls back to configuration.
    pub extensions: Vec<String>,
    /// Skip files without metadata instead of failing.
    pub skip_missing: bool,
}

/// Validate the revision chain in `directory` and print the order.
pub fn check(ctx: &Context, directory: &Path, options: CheckOptions) -> Result<()> {
    let run = settings(ctx, directory, None, options.extensions, options.skip_missing)?;

    let outcome = scan_directory(&run.directory, &run.scan)
        .with_context(|| format!("Failed to scan '{}'", run.directory.display()))?;
    warn_skipped(ctx, &outcome);

    let chain = chain::sequence(outcome.records)
        .context("Revision chain could not be reconstructed")?;

    if options.json {
        // JSON goes to stdout unconditionally; --quiet silences the rest.
        println!("{}", serde_json::to_string_pretty(&chain)?);
        return Ok(());
    }

    for entry in &chain {
        output::print(format_entry(entry), ctx.verbosity);
    }
    output::print(
        format!("Chain is valid: {} revisions", chain.len()),
        ctx.verbosity,
    );

    Ok(())
}

fn format_entry(entry: &SequencedRecord) -> String {
    match &entry.record.revises_id {
        Some(revises) => format!(
            "{:>3}  {}  ({} <- {})",
            entry.position, entry.record.filename, entry.record.revision_id, revises
        ),
        None => format!(
            "{:>3}  {}  ({})",
            entry.position, entry.record.filename, entry.record.revision_id
        ),
    }
}
