// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Structural self-check.

use super::{PqTree, Shape};
use crate::error::InvariantViolation;
use std::fmt::Debug;
use std::hash::Hash;

impl<T> PqTree<T>
where
    T: Eq + Hash + Clone + Debug,
{
    /// Check every structural invariant of the tree.
    ///
    /// - parent and child links agree, and the root has no parent;
    /// - every live node is reachable from the root;
    /// - leaves have no children and the leaf map points at them;
    /// - P-nodes have at least two children and Q-nodes at least three,
    ///   except that the root of a one-element tree is a P-node with one leaf.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let root = self.tree.root().ok_or(InvariantViolation::MissingRoot)?;
        if self.tree.parent(root).is_some() {
            return Err(InvariantViolation::ParentMismatch { node: root });
        }

        let min_p_children = if self.ground.len() == 1 { 1 } else { 2 };
        let mut reachable = 0;
        let mut leaves = 0;
        for id in self.tree.postorder(root, |_| true) {
            reachable += 1;
            let children = self.tree.children(id);
            if let Some(&child) = children.iter().find(|&&c| self.tree.parent(c) != Some(id)) {
                return Err(InvariantViolation::ParentMismatch { node: child });
            }

            let shape = self.tree.data(id);
            let min = match shape {
                Shape::Leaf(element) => {
                    leaves += 1;
                    if !children.is_empty() {
                        return Err(InvariantViolation::LeafWithChildren { node: id });
                    }
                    if self.leaves.get(element) != Some(&id) {
                        return Err(InvariantViolation::LeafMismatch {
                            element: format!("{element:?}"),
                        });
                    }
                    continue;
                }
                Shape::P => min_p_children,
                Shape::Q => 3,
            };
            if children.len() < min {
                return Err(InvariantViolation::TooFewChildren {
                    node: id,
                    shape: shape.kind(),
                    count: children.len(),
                });
            }
        }

        if leaves != self.ground.len() || self.leaves.len() != self.ground.len() {
            return Err(InvariantViolation::LeafCount {
                expected: self.ground.len(),
                found: leaves,
            });
        }
        if reachable != self.tree.len() {
            return Err(InvariantViolation::Unreachable {
                live: self.tree.len(),
                reachable,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pqtree::ShapeKind;

    #[test]
    fn test_fresh_tree_is_valid() {
        assert_eq!(PqTree::new(1..=5).unwrap().validate(), Ok(()));
        assert_eq!(PqTree::new([1]).unwrap().validate(), Ok(()));
    }

    #[test]
    fn test_detects_unary_q_node() {
        let mut tree = PqTree::new(1..=3).unwrap();
        let root = tree.tree.root().unwrap();
        let q = tree.tree.new_node(Shape::Q);
        let leaf = tree.tree.children(root)[0];
        tree.tree.delete_edge(root, leaf);
        tree.tree.new_edge(q, leaf);
        tree.tree.new_edge(root, q);
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::TooFewChildren {
                node: q,
                shape: ShapeKind::Q,
                count: 1
            })
        );
    }

    #[test]
    fn test_detects_stale_leaf_map() {
        let mut tree = PqTree::new(1..=3).unwrap();
        let two = tree.leaves[&2];
        tree.leaves.insert(1, two);
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::LeafMismatch {
                element: "1".to_string()
            })
        );
    }

    #[test]
    fn test_detects_unreachable_node() {
        let mut tree = PqTree::new(1..=3).unwrap();
        tree.tree.new_node(Shape::P);
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::Unreachable {
                live: 5,
                reachable: 4
            })
        );
    }
}
