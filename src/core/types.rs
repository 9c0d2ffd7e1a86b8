//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`RevisionId`] - Validated revision identifier
//! - [`Record`] - One revision file with its identifier metadata
//! - [`SequencedRecord`] - A record carrying its computed 1-based position
//!
//! # Validation
//!
//! [`RevisionId`] enforces validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs downstream in
//! chain construction.
//!
//! # Examples
//!
//! ```
//! use filament::core::types::RevisionId;
//!
//! let id = RevisionId::new("rev1").unwrap();
//! assert_eq!(id.as_str(), "rev1");
//!
//! assert!(RevisionId::new("").is_err());
//! assert!(RevisionId::new("has space").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid revision id: {0}")]
    InvalidRevisionId(String),
}

/// A validated revision identifier.
///
/// Revision ids come from file metadata and are used as lookup keys when
/// reconstructing the chain:
/// - Cannot be empty
/// - Cannot contain whitespace
/// - Cannot contain ASCII control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RevisionId(String);

impl RevisionId {
    /// Create a new validated revision id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRevisionId` if the id is empty or contains
    /// whitespace or control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.is_empty() {
            return Err(TypeError::InvalidRevisionId(
                "revision id cannot be empty".into(),
            ));
        }
        if id.chars().any(|c| c.is_whitespace()) {
            return Err(TypeError::InvalidRevisionId(format!(
                "revision id '{}' cannot contain whitespace",
                id
            )));
        }
        if id.chars().any(|c| c.is_control()) {
            return Err(TypeError::InvalidRevisionId(
                "revision id cannot contain control characters".into(),
            ));
        }
        Ok(())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RevisionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RevisionId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RevisionId> for String {
    fn from(id: RevisionId) -> String {
        id.0
    }
}

/// One revision file with its identifier metadata.
///
/// The `filename` is opaque to the core: it identifies the backing storage
/// location and is only interpreted by the rename applicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the backing file, relative to the scanned directory.
    pub filename: String,
    /// Unique identifier of this revision.
    pub revision_id: RevisionId,
    /// Identifier of the revision this file revises; `None` for the root.
    pub revises_id: Option<RevisionId>,
}

impl Record {
    /// Create a new record.
    pub fn new(
        filename: impl Into<String>,
        revision_id: RevisionId,
        revises_id: Option<RevisionId>,
    ) -> Self {
        Self {
            filename: filename.into(),
            revision_id,
            revises_id,
        }
    }

    /// Whether this record is the chain root (no predecessor).
    pub fn is_root(&self) -> bool {
        self.revises_id.is_none()
    }
}

/// A record carrying its computed 1-based position in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequencedRecord {
    /// 1-based position in chain order.
    pub position: usize,
    /// The underlying record.
    #[serde(flatten)]
    pub record: Record,
}
