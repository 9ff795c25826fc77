// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Why a reduction stopped.

use super::state::Census;
use crate::pqtree::ShapeKind;
use crate::tree::NodeId;
use thiserror::Error;

/// A normal rejection: the target set cannot be made contiguous.
///
/// This is not an error to propagate. `accept` turns it into `false` after
/// the tree has been restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReductionFailure {
    /// No template matches a node of the pertinent subtree.
    #[error("no template matches {shape} {node} (pertinent root: {at_root}) with children {census}")]
    NoTemplate {
        node: NodeId,
        shape: ShapeKind,
        at_root: bool,
        census: Census,
    },
}

impl ReductionFailure {
    /// The node at which the reduction stopped.
    pub fn node(&self) -> NodeId {
        match self {
            ReductionFailure::NoTemplate { node, .. } => *node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::NodeState::*;
    use crate::tree::Tree;

    #[test]
    fn test_display() {
        let mut tree = Tree::new();
        let node = tree.new_node(());
        let failure = ReductionFailure::NoTemplate {
            node,
            shape: ShapeKind::Q,
            at_root: false,
            census: Census::of(&[Full, Empty, Full]),
        };
        assert_eq!(
            failure.to_string(),
            "no template matches Q-node #0 (pertinent root: false) with children 2 full, 1 empty, 0 partial, 0 doubly partial"
        );
        assert_eq!(failure.node(), node);
    }
}
