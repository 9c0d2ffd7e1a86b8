//! cli
//!
//! Command-line interface layer for filament.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT reconstruct chains or rename files directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! handlers in [`commands`], which drive [`crate::extract`],
//! [`crate::core::chain`] and [`crate::apply`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Execution context shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory to resolve relative paths against.
    pub cwd: Option<PathBuf>,
    /// Output verbosity derived from `--quiet` / `--debug`.
    pub verbosity: Verbosity,
}

impl Context {
    /// Resolve a possibly-relative directory argument against `--cwd`.
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        match (&self.cwd, dir.is_absolute()) {
            (Some(cwd), false) => cwd.join(dir),
            _ => dir.to_path_buf(),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_relative_paths() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/base")),
            verbosity: Verbosity::Normal,
        };
        assert_eq!(ctx.resolve(Path::new("drafts")), PathBuf::from("/base/drafts"));
        assert_eq!(ctx.resolve(Path::new("/abs")), PathBuf::from("/abs"));
    }

    #[test]
    fn resolve_without_cwd_keeps_path() {
        let ctx = Context {
            cwd: None,
            verbosity: Verbosity::Normal,
        };
        assert_eq!(ctx.resolve(Path::new("drafts")), PathBuf::from("drafts"));
    }
}
