//! Shared helpers for command handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::extract::{ScanOptions, ScanOutcome};
use crate::ui::output;

/// Settings for one run, with config and CLI flags merged.
///
/// CLI flags take precedence over the directory config, which takes
/// precedence over the global config.
#[derive(Debug)]
pub struct RunSettings {
    /// Resolved absolute-or-cwd-relative directory to scan.
    pub directory: PathBuf,
    /// Separator between prefix and original filename.
    pub separator: String,
    /// Scan options for extraction.
    pub scan: ScanOptions,
}

/// Resolve the directory, load configuration, and merge CLI flags.
pub fn settings(
    ctx: &Context,
    directory: &Path,
    separator_flag: Option<String>,
    extensions_flag: Vec<String>,
    skip_missing_flag: bool,
) -> Result<RunSettings> {
    let directory = ctx.resolve(directory);
    let config = Config::load(Some(&directory)).context("Failed to load configuration")?;

    let separator = separator_flag.unwrap_or_else(|| config.separator().to_string());
    let extensions = if extensions_flag.is_empty() {
        config.extensions().to_vec()
    } else {
        extensions_flag
    };
    let skip_missing = skip_missing_flag || config.skip_missing();

    Ok(RunSettings {
        directory,
        separator,
        scan: ScanOptions {
            extensions,
            skip_missing,
        },
    })
}

/// Report skipped files as warnings.
pub fn warn_skipped(ctx: &Context, outcome: &ScanOutcome) {
    for (filename, reason) in &outcome.skipped {
        output::warn(
            format!("skipping '{}': {}", filename, reason),
            ctx.verbosity,
        );
    }
}
