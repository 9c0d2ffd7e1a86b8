//! core::chain
//!
//! Chain construction and flattening.
//!
//! # Architecture
//!
//! The revision chain is reconstructed in two steps:
//!
//! 1. **Build**: index records by `revision_id`, find the unique root (the
//!    record with no `revises_id`), and attach every record as a child of the
//!    record it revises, in input order.
//! 2. **Flatten**: walk the tree depth-first from the root, visiting children
//!    in ascending order of their own descendant count (stable, so siblings
//!    with equal counts keep input order).
//!
//! # Invariants
//!
//! - `revision_id` values are pairwise distinct
//! - Exactly one record has no `revises_id`
//! - Every `revises_id` refers to an existing `revision_id`
//! - Every record is reachable from the root (no cycles)
//!
//! Violations are surfaced as [`ChainError`]; the builder never attempts a
//! partial reconstruction. Both steps are pure transformations over their
//! input: records are moved into the tree and moved back out into the chain,
//! never copied.

use std::collections::HashMap;

use thiserror::Error;

use super::types::{Record, RevisionId, SequencedRecord};

/// Errors from chain construction.
///
/// All variants are unrecoverable for the current run: an order computed
/// from an incomplete or ambiguous record set must never reach the rename
/// applicator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The input record set was empty.
    #[error("no revision records in input")]
    EmptyInput,

    /// No record lacks a parent reference.
    #[error("no root revision found: every record revises another")]
    NoRootFound,

    /// More than one record lacks a parent reference.
    #[error("multiple root revisions found: '{first}' and '{second}' both revise nothing")]
    MultipleRootsFound {
        /// First rootless record, in input order.
        first: RevisionId,
        /// Second rootless record, in input order.
        second: RevisionId,
    },

    /// A `revises_id` points to a nonexistent `revision_id`.
    #[error("revision '{revision_id}' revises unknown revision '{revises_id}'")]
    DanglingReference {
        /// The record with the unresolvable reference.
        revision_id: RevisionId,
        /// The reference that did not resolve.
        revises_id: RevisionId,
    },

    /// Two records share a `revision_id`.
    #[error("duplicate revision id '{revision_id}'")]
    DuplicateRevisionId {
        /// The id that appeared more than once.
        revision_id: RevisionId,
    },

    /// A record is unreachable from the root (its ancestry loops).
    #[error("revision '{revision_id}' is not reachable from the root: its ancestry forms a cycle")]
    CycleDetected {
        /// A record on the cycle.
        revision_id: RevisionId,
    },
}

/// A node in the revision tree: one record plus its direct children.
///
/// Children hold the records whose `revises_id` equals this node's
/// `revision_id`, in input enumeration order. That order is not yet the
/// final chain order; [`flatten`] applies the descendant-count tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionNode {
    /// The record at this node.
    pub record: Record,
    /// Direct children, in input enumeration order.
    pub children: Vec<RevisionNode>,
}

impl RevisionNode {
    /// Number of revisions reachable below this node.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Total number of revisions in this subtree, including this node.
    pub fn len(&self) -> usize {
        1 + self.descendant_count()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Build the revision tree from an unordered record set.
///
/// Records are indexed by `revision_id` for O(1) lookup, the unique root is
/// identified, and every record is attached under the record it revises.
/// Records are moved into the tree, not copied.
///
/// # Errors
///
/// - [`ChainError::EmptyInput`] if `records` is empty
/// - [`ChainError::DuplicateRevisionId`] if two records share an id
/// - [`ChainError::NoRootFound`] if every record revises another
/// - [`ChainError::MultipleRootsFound`] if more than one record revises nothing
/// - [`ChainError::DanglingReference`] if a `revises_id` does not resolve
/// - [`ChainError::CycleDetected`] if a record's ancestry never reaches the root
pub fn build(records: Vec<Record>) -> Result<RevisionNode, ChainError> {
    if records.is_empty() {
        return Err(ChainError::EmptyInput);
    }

    // Index by revision id, rejecting duplicates instead of silently
    // overwriting the earlier record.
    let mut index: HashMap<RevisionId, usize> = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if index.insert(record.revision_id.clone(), pos).is_some() {
            return Err(ChainError::DuplicateRevisionId {
                revision_id: record.revision_id.clone(),
            });
        }
    }

    // Scan all records for rootless ones; exactly one is required.
    let mut root_pos: Option<usize> = None;
    for (pos, record) in records.iter().enumerate() {
        match &record.revises_id {
            None => match root_pos {
                None => root_pos = Some(pos),
                Some(first) => {
                    return Err(ChainError::MultipleRootsFound {
                        first: records[first].revision_id.clone(),
                        second: record.revision_id.clone(),
                    })
                }
            },
            Some(revises_id) => {
                if !index.contains_key(revises_id) {
                    return Err(ChainError::DanglingReference {
                        revision_id: record.revision_id.clone(),
                        revises_id: revises_id.clone(),
                    });
                }
            }
        }
    }
    let root_pos = root_pos.ok_or(ChainError::NoRootFound)?;

    // Child adjacency in input enumeration order.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (pos, record) in records.iter().enumerate() {
        if let Some(revises_id) = &record.revises_id {
            children[index[revises_id]].push(pos);
        }
    }

    // Move records into the tree. Each slot is taken exactly once: the root
    // appears in no child list and every other record in exactly one.
    let mut slots: Vec<Option<Record>> = records.into_iter().map(Some).collect();
    let root = match attach(root_pos, &children, &mut slots) {
        Some(root) => root,
        None => return Err(ChainError::NoRootFound),
    };

    // Records still in their slots were never reached from the root: their
    // ancestry loops among non-root records.
    if let Some(stray) = slots.iter().flatten().next() {
        return Err(ChainError::CycleDetected {
            revision_id: stray.revision_id.clone(),
        });
    }

    Ok(root)
}

/// Recursively attach a record and its descendants.
fn attach(pos: usize, children: &[Vec<usize>], slots: &mut [Option<Record>]) -> Option<RevisionNode> {
    let record = slots[pos].take()?;
    let attached = children[pos]
        .iter()
        .filter_map(|&child| attach(child, children, slots))
        .collect();
    Some(RevisionNode {
        record,
        children: attached,
    })
}

/// Flatten the revision tree into the final chain order.
///
/// Depth-first pre-order from the root. At each node, children are visited
/// in ascending order of their own descendant count; ties keep the relative
/// order established at build time (the sort is stable). Shallower subtrees
/// are therefore emitted before deeper ones.
///
/// Every record appears exactly once, root first, and a parent always
/// precedes all of its descendants.
pub fn flatten(root: RevisionNode) -> Vec<Record> {
    let mut chain = Vec::with_capacity(root.len());
    walk(root, &mut chain);
    chain
}

fn walk(node: RevisionNode, chain: &mut Vec<Record>) {
    let RevisionNode {
        record,
        mut children,
    } = node;
    chain.push(record);
    children.sort_by_cached_key(RevisionNode::descendant_count);
    for child in children {
        walk(child, chain);
    }
}

/// Build and flatten in one step, assigning 1-based positions.
///
/// This is the form consumed by the rename applicator.
pub fn sequence(records: Vec<Record>) -> Result<Vec<SequencedRecord>, ChainError> {
    let root = build(records)?;
    Ok(flatten(root)
        .into_iter()
        .enumerate()
        .map(|(idx, record)| SequencedRecord {
            position: idx + 1,
            record,
        })
        .collect())
}
