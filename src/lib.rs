//! Filament - a CLI for sequencing revision files
//!
//! Filament orders a directory of revision files that form a linear edit
//! history. Each file declares its own identifier and the identifier of the
//! file it revises; filament reconstructs the chain from those references and
//! renames the files with a numeric prefix reflecting their order.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`core`] - Domain types, chain construction and flattening, configuration
//! - [`extract`] - Safe metadata extraction from revision files
//! - [`apply`] - Rename applicator with locking and rollback
//! - [`ui`] - Output formatting utilities
//!
//! # Correctness Invariants
//!
//! Filament maintains the following invariants:
//!
//! 1. A chain is computed only from a record set that satisfies every input
//!    invariant (unique ids, single root, no dangling references, no cycles)
//! 2. No rename is attempted once any invariant violation has been detected
//! 3. Renames are all-or-nothing: a failure partway through reverses every
//!    rename already applied before the error is surfaced

pub mod apply;
pub mod cli;
pub mod core;
pub mod extract;
pub mod ui;
