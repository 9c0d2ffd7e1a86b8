//! core
//!
//! Core domain types and operations for filament.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RevisionId, Record, SequencedRecord
//! - [`chain`] - Chain construction and flattening
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Chain operations are pure transformations over their input
//! - All ordering is deterministic

pub mod chain;
pub mod config;
pub mod types;
