// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the public API.
//!
//! Elements are carried as their `Debug` rendering so that the error types do
//! not depend on the element type.

use crate::pqtree::ShapeKind;
use crate::tree::NodeId;
use std::fmt::Debug;
use thiserror::Error;

/// Invalid arguments to a [`PqTree`](crate::PqTree) operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PqError {
    /// A PQ-tree needs at least one element.
    #[error("ground set is empty")]
    EmptyGroundSet,

    /// The ground set lists the same element twice.
    #[error("element {element} appears more than once in the ground set")]
    DuplicateElement { element: String },

    /// A constraint names an element outside the ground set.
    #[error("element {element} is not in the ground set")]
    UnknownElement { element: String },
}

impl PqError {
    pub(crate) fn duplicate(element: &impl Debug) -> Self {
        PqError::DuplicateElement {
            element: format!("{element:?}"),
        }
    }

    pub(crate) fn unknown(element: &impl Debug) -> Self {
        PqError::UnknownElement {
            element: format!("{element:?}"),
        }
    }
}

/// A structural invariant of the PQ-tree does not hold.
///
/// Reported by [`PqTree::validate`](crate::PqTree::validate). Any of these
/// after a reduction is a bug in the reduction, never a property of the
/// constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("tree has no root")]
    MissingRoot,

    /// P-nodes need two children, Q-nodes three.
    #[error("{shape} {node} has only {count} children")]
    TooFewChildren {
        node: NodeId,
        shape: ShapeKind,
        count: usize,
    },

    #[error("leaf {node} has children")]
    LeafWithChildren { node: NodeId },

    /// A node's parent link disagrees with its parent's child list.
    #[error("parent link of {node} is inconsistent")]
    ParentMismatch { node: NodeId },

    /// The leaf map does not point at the leaf holding the element.
    #[error("leaf map entry for {element} is stale")]
    LeafMismatch { element: String },

    #[error("expected {expected} leaves, found {found}")]
    LeafCount { expected: usize, found: usize },

    #[error("{live} live nodes but only {reachable} reachable from the root")]
    Unreachable { live: usize, reachable: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(PqError::EmptyGroundSet.to_string(), "ground set is empty");
        assert_eq!(
            PqError::unknown(&"x").to_string(),
            "element \"x\" is not in the ground set"
        );
        assert_eq!(
            PqError::duplicate(&7).to_string(),
            "element 7 appears more than once in the ground set"
        );
        assert_eq!(
            InvariantViolation::LeafCount {
                expected: 5,
                found: 4
            }
            .to_string(),
            "expected 5 leaves, found 4"
        );
    }
}
