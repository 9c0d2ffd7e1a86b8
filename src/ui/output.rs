//! ui::output
//!
//! Terminal output for the fil commands.
//!
//! # Design
//!
//! Progress lines (rename steps, run summaries) go to stdout so they can be
//! piped; warnings, per-file diagnostics, and errors go to stderr. Everything
//! except errors honors the verbosity derived from `--quiet` / `--debug`.

use std::fmt::Display;

use crate::apply::RenameStep;

/// How much a run is allowed to say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Progress and warnings.
    Normal,
    /// Everything, including per-file diagnostics.
    Debug,
}

impl Verbosity {
    /// Derive the run's verbosity from the global flags; `--quiet` wins.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a progress line to stdout unless the run is quiet.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a diagnostic line to stderr, only under `--debug`.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error to stderr. Errors are never suppressed.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning to stderr unless the run is quiet.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a rename step for display.
pub fn format_step(step: &RenameStep) -> String {
    let from = step
        .from
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| step.from.display().to_string());
    let to = step
        .to
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| step.to.display().to_string());
    format!("{} -> {}", from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        // Quiet wins over debug.
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn step_formats_as_filenames() {
        let step = RenameStep {
            from: PathBuf::from("/some/dir/a.py"),
            to: PathBuf::from("/some/dir/1_a.py"),
        };
        assert_eq!(format_step(&step), "a.py -> 1_a.py");
    }
}
