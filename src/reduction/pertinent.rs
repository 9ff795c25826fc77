// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pertinent subtree computation.
//!
//! Every target leaf walks up to the root, bumping a per-node counter of
//! target leaves seen below. The deepest node whose counter reaches the size
//! of the target set is the pertinent root; the nodes with a non-zero counter
//! under it form the pertinent subtree, which is all the reduction touches.

use crate::tree::{NodeId, Tree};

/// The part of the tree one reduction works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pertinent {
    /// Deepest node spanning every target leaf.
    pub(crate) root: NodeId,
    /// Pertinent nodes in children-before-parent order, ending at `root`.
    pub(crate) schedule: Vec<NodeId>,
}

impl Pertinent {
    /// Locate the pertinent subtree for a set of distinct target leaves.
    ///
    /// # Panics
    ///
    /// Panics if `leaves` is empty, or if no single node spans every leaf,
    /// which can only happen when the tree is malformed.
    pub(crate) fn compute<D>(tree: &Tree<D>, leaves: &[NodeId]) -> Self {
        assert!(!leaves.is_empty(), "pertinent subtree of an empty set");
        let target = leaves.len();

        let mut seen = vec![0usize; tree.capacity()];
        for &leaf in leaves {
            let mut node = Some(leaf);
            while let Some(id) = node {
                seen[id.index()] += 1;
                node = tree.parent(id);
            }
        }

        let mut node = Some(leaves[0]);
        let root = loop {
            match node {
                Some(id) if seen[id.index()] == target => break id,
                Some(id) => node = tree.parent(id),
                None => panic!(
                    "no node spans all {target} target leaves: PQ-tree is malformed"
                ),
            }
        };

        let schedule = tree.postorder(root, |id| seen[id.index()] > 0).collect();
        Self { root, schedule }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// r -> [x -> [1, 2], y -> [3, 4], 5]
    fn sample() -> (Tree<u32>, Vec<NodeId>, [NodeId; 3]) {
        let mut tree = Tree::new();
        let r = tree.new_node(0);
        let x = tree.new_node(10);
        let y = tree.new_node(20);
        tree.set_root(r);
        tree.new_edge(r, x);
        tree.new_edge(r, y);
        let leaves: Vec<_> = (1..=5).map(|e| tree.new_node(e)).collect();
        tree.new_edge(x, leaves[0]);
        tree.new_edge(x, leaves[1]);
        tree.new_edge(y, leaves[2]);
        tree.new_edge(y, leaves[3]);
        tree.new_edge(r, leaves[4]);
        (tree, leaves, [r, x, y])
    }

    #[test]
    fn test_root_is_deepest_spanning_node() {
        let (tree, leaves, [_, x, _]) = sample();
        let pertinent = Pertinent::compute(&tree, &[leaves[0], leaves[1]]);
        assert_eq!(pertinent.root, x);
        assert_eq!(pertinent.schedule, vec![leaves[0], leaves[1], x]);
    }

    #[test]
    fn test_schedule_skips_empty_subtrees() {
        let (tree, leaves, [r, x, _]) = sample();
        let pertinent = Pertinent::compute(&tree, &[leaves[4], leaves[1]]);
        assert_eq!(pertinent.root, r);
        // y and its leaves hold no target leaf, so they are never visited
        assert_eq!(pertinent.schedule, vec![leaves[1], x, leaves[4], r]);
    }

    #[test]
    fn test_single_leaf_is_its_own_root() {
        let (tree, leaves, _) = sample();
        let pertinent = Pertinent::compute(&tree, &[leaves[2]]);
        assert_eq!(pertinent.root, leaves[2]);
        assert_eq!(pertinent.schedule, vec![leaves[2]]);
    }

    #[test]
    #[should_panic(expected = "malformed")]
    fn test_disconnected_leaf_is_fatal() {
        let (mut tree, leaves, [_, _, y]) = sample();
        tree.delete_edge(y, leaves[3]);
        let _ = Pertinent::compute(&tree, &[leaves[0], leaves[3]]);
    }
}
