//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the target directory and merges configuration with flags
//! 2. Drives extraction, chain reconstruction, and (for `sequence`) renaming
//! 3. Formats and displays output
//!
//! Handlers never rename files themselves; all mutations go through
//! [`crate::apply`].

mod check;
mod common;
mod completion;
mod sequence;

// Re-export command functions for testing and direct invocation
pub use check::{check, CheckOptions};
pub use completion::completion;
pub use sequence::{sequence, SequenceOptions};

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Sequence {
            directory,
            dry_run,
            separator,
            extensions,
            skip_missing,
        } => sequence(
            ctx,
            &directory,
            SequenceOptions {
                dry_run,
                separator,
                extensions,
                skip_missing,
            },
        ),
        Command::Check {
            directory,
            json,
            extensions,
            skip_missing,
        } => check(
            ctx,
            &directory,
            CheckOptions {
                json,
                extensions,
                skip_missing,
            },
        ),
        Command::Completion { shell } => completion(shell),
    }
}
