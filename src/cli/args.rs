//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Filament - order revision files into their edit chain
#[derive(Parser, Debug)]
#[command(name = "filament")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if filament was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Order revision files and rename them with numeric prefixes
    #[command(
        name = "sequence",
        visible_alias = "seq",
        long_about = "Order the revision files in a directory and rename them in sequence.\n\n\
            Each revision file declares a 'revision_id' and the 'revises_id' of the \
            file it revises. Filament reconstructs the chain from those references, \
            starting at the root (the file that revises nothing), and renames every \
            file with a 1-based numeric prefix reflecting its position.\n\n\
            Renames are all-or-nothing: if any rename fails, every rename already \
            applied is reversed before the error is reported.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Sequence the revision files in ./drafts
    fil sequence ./drafts

    # Preview the renames without touching anything
    fil sequence ./drafts --dry-run

    # Only consider .py files, use '-' between prefix and name
    fil sequence ./drafts --ext py --separator -

    # Ignore files without revision metadata instead of failing
    fil sequence ./drafts --skip-missing

FILE METADATA:
    revision_id = 'rev2'     <- this file's identifier
    revises_id = 'rev1'      <- the file it revises ('None' for the root)"
    )]
    Sequence {
        /// Directory containing the revision files
        directory: PathBuf,

        /// Show the planned renames without making changes
        #[arg(long)]
        dry_run: bool,

        /// Separator between the numeric prefix and the original name
        #[arg(long, value_name = "SEP")]
        separator: Option<String>,

        /// Only scan files with this extension (repeatable)
        #[arg(long = "ext", value_name = "EXT")]
        extensions: Vec<String>,

        /// Skip files without revision metadata instead of failing
        #[arg(long)]
        skip_missing: bool,
    },

    /// Validate the chain and print the computed order without renaming
    #[command(
        name = "check",
        long_about = "Validate the revision chain in a directory and print the computed order.\n\n\
            Runs the same extraction and chain reconstruction as 'sequence' but never \
            touches the filesystem. Use this to verify a directory before renaming, \
            or to export the order for scripting with --json.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Verify the chain and see the order
    fil check ./drafts

    # Machine-readable output for scripting
    fil check ./drafts --json

READING THE OUTPUT:
    1  rev1.py   (rev1)
    2  rev2.py   (rev2 <- rev1)
    3  rev3.py   (rev3 <- rev2)"
    )]
    Check {
        /// Directory containing the revision files
        directory: PathBuf,

        /// Emit the computed order as JSON
        #[arg(long)]
        json: bool,

        /// Only scan files with this extension (repeatable)
        #[arg(long = "ext", value_name = "EXT")]
        extensions: Vec<String>,

        /// Skip files without revision metadata instead of failing
        #[arg(long)]
        skip_missing: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for filament.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    fil completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    fil completion zsh >> ~/.zshrc

    # Fish
    fil completion fish > ~/.config/fish/completions/fil.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
