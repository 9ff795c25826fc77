// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Lazy filtered postorder traversal.

use super::{NodeId, Tree};

/// Depth-first, children-before-parent iterator over a [`Tree`].
///
/// Created by [`Tree::postorder`].
pub struct Postorder<'a, D, F> {
    tree: &'a Tree<D>,
    keep: F,
    /// (node, index of the next child to look at)
    stack: Vec<(NodeId, usize)>,
}

impl<'a, D, F> Postorder<'a, D, F>
where
    F: FnMut(NodeId) -> bool,
{
    pub(super) fn new(tree: &'a Tree<D>, start: NodeId, mut keep: F) -> Self {
        let mut stack = Vec::new();
        if keep(start) {
            stack.push((start, 0));
        }
        Self { tree, keep, stack }
    }
}

impl<D, F> Iterator for Postorder<'_, D, F>
where
    F: FnMut(NodeId) -> bool,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let top = self.stack.last_mut()?;
            let children = self.tree.children(top.0);
            if top.1 < children.len() {
                let child = children[top.1];
                top.1 += 1;
                if (self.keep)(child) {
                    self.stack.push((child, 0));
                }
            } else {
                let id = top.0;
                self.stack.pop();
                return Some(id);
            }
        }
    }
}
