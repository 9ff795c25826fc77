// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bottom-up template reduction.
//!
//! The pertinent subtree is visited children-before-parents. At each node the
//! states of its children are tallied, the ordered [`Template`] catalogue is
//! scanned, and the first matching template rewrites the node and yields its
//! own state for the parent to see. A node that no template matches ends the
//! pass with a [`ReductionFailure`]; undoing whatever was already rewritten is
//! the caller's job.
//!
//! # Templates
//!
//! | # | Template | Node | Where |
//! |---|---|---|---|
//! | 1 | `Leaf` | leaf | anywhere |
//! | 2-9 | `PEmpty` .. `PRootDoublePartial` | P-node | see each variant |
//! | 10-17 | `QEmpty` .. `QRootDoublePartial` | Q-node | see each variant |
//!
//! The order is significant: several predicates overlap, and later templates
//! are only reached when earlier ones did not match.

pub mod errors;
mod p_templates;
pub(crate) mod pertinent;
pub mod state;
pub mod template;
mod q_templates;

pub use errors::ReductionFailure;
pub use state::{Census, NodeState};
pub use template::Template;

use crate::pqtree::{Shape, ShapeKind};
use crate::trace::{TemplateEvent, Tracer};
use crate::tree::{NodeId, Tree};
use pertinent::Pertinent;
use state::NodeStates;

/// Snapshot of one node as the template catalogue sees it.
#[derive(Debug, Clone)]
pub(crate) struct NodeView {
    pub(crate) id: NodeId,
    pub(crate) shape: ShapeKind,
    pub(crate) at_root: bool,
    pub(crate) children: Vec<NodeId>,
    pub(crate) states: Vec<NodeState>,
    pub(crate) census: Census,
}

impl NodeView {
    /// Children in order, paired with their states.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (NodeId, NodeState)> + '_ {
        self.children.iter().copied().zip(self.states.iter().copied())
    }

    /// Children in order that are in the given state.
    pub(crate) fn children_in(&self, state: NodeState) -> Vec<NodeId> {
        self.entries()
            .filter(|&(_, s)| s == state)
            .map(|(id, _)| id)
            .collect()
    }

    /// Positions of the partial children.
    pub(crate) fn partial_positions(&self) -> Vec<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, &s)| s == NodeState::Partial)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Mutable state threaded through the templates of one reduction.
pub(crate) struct ReductionContext<'a, T> {
    pub(crate) tree: &'a mut Tree<Shape<T>>,
    pub(crate) states: NodeStates,
}

impl<'a, T: Clone> ReductionContext<'a, T> {
    pub(crate) fn new(tree: &'a mut Tree<Shape<T>>) -> Self {
        let states = NodeStates::with_capacity(tree.capacity());
        Self { tree, states }
    }

    pub(crate) fn state(&self, id: NodeId) -> NodeState {
        self.states.get(id)
    }

    pub(crate) fn view(&self, id: NodeId, at_root: bool) -> NodeView {
        let children = self.tree.children(id).to_vec();
        let states: Vec<_> = children.iter().map(|&c| self.state(c)).collect();
        NodeView {
            id,
            shape: self.tree.data(id).kind(),
            at_root,
            census: Census::of(&states),
            children,
            states,
        }
    }

    /// Gather detached `members` under one new node in state `state`.
    ///
    /// A single member is returned as is rather than wrapped, so no unary
    /// internal node is ever created. Returns `None` for no members.
    pub(crate) fn group(
        &mut self,
        shape: Shape<T>,
        members: Vec<NodeId>,
        state: NodeState,
    ) -> Option<NodeId> {
        match members.len() {
            0 => None,
            1 => Some(members[0]),
            _ => {
                let id = self.tree.new_node(shape);
                self.states.set(id, state);
                self.attach(id, members);
                Some(id)
            }
        }
    }

    /// Append detached `children` to `parent` in order.
    pub(crate) fn attach(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        for child in children {
            self.tree.new_edge(parent, child);
        }
    }

    /// Dissolve a detached partial node, returning its children oriented so
    /// the full run comes last (`full_last`) or first.
    pub(crate) fn dissolve_partial(&mut self, partial: NodeId, full_last: bool) -> Vec<NodeId> {
        let mut children = self.tree.detach_children(partial);
        self.tree.delete_node(partial);
        debug_assert!(
            children.len() >= 2,
            "partial node {partial} has fewer than two children"
        );
        let full_first = self.state(children[0]) == NodeState::Full;
        if full_first == full_last {
            children.reverse();
        }
        children
    }

    /// Put a full group at the full end of a partial child that stays in place.
    pub(crate) fn extend_full_end(&mut self, partial: NodeId, full: NodeId) {
        let mut children = self.tree.detach_children(partial);
        if self.state(children[0]) == NodeState::Full {
            children.insert(0, full);
        } else {
            children.push(full);
        }
        self.attach(partial, children);
    }
}

/// Run the template catalogue over the pertinent subtree.
///
/// Returns the number of templates applied. On failure the tree is left
/// partially rewritten.
pub(crate) fn reduce<T: Clone>(
    tree: &mut Tree<Shape<T>>,
    pertinent: &Pertinent,
    tracer: &mut Tracer<'_>,
) -> Result<usize, ReductionFailure> {
    let mut ctx = ReductionContext::new(tree);
    for &node in &pertinent.schedule {
        let view = ctx.view(node, node == pertinent.root);
        let Some(template) = Template::select(&view) else {
            return Err(ReductionFailure::NoTemplate {
                node,
                shape: view.shape,
                at_root: view.at_root,
                census: view.census,
            });
        };
        let state = template.apply(&mut ctx, &view);
        ctx.states.set(node, state);
        tracer.template_applied(&TemplateEvent {
            node,
            template,
            state,
        });
    }
    Ok(pertinent.schedule.len())
}
