// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Arena-backed rooted ordered tree.
//!
//! Nodes live in a slot vector and are addressed by [`NodeId`] handles.
//! Deleted nodes leave a vacant slot that is recycled through a free list.
//! Each node carries an arbitrary payload `D`, an optional parent, and an
//! ordered list of children.
//!
//! # Rollback
//!
//! Every mutation goes through a small set of primitives that record the
//! previous slot contents on the tree's [`Trail`] while a checkpoint is open.
//! [`Tree::rewind`] then restores the tree exactly, including slot count,
//! free list and root, so node ids are stable across a rejected rewrite.
//!
//! # Example
//!
//! ```
//! use pq_tree::tree::Tree;
//!
//! let mut tree = Tree::new();
//! let root = tree.new_node("root");
//! let a = tree.new_node("a");
//! let b = tree.new_node("b");
//! tree.set_root(root);
//! tree.new_edge(root, a);
//! tree.new_edge(root, b);
//!
//! let order: Vec<_> = tree.postorder(root, |_| true).map(|id| *tree.data(id)).collect();
//! assert_eq!(order, vec!["a", "b", "root"]);
//! ```

mod postorder;

pub use postorder::Postorder;

use crate::trail::Trail;
use std::collections::HashMap;
use std::fmt;

/// Dense node handle.
///
/// The inner value is an index into the tree's slot array, so per-call
/// side tables can be plain vectors indexed by [`NodeId::index`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Slot index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node: payload plus topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<D> {
    pub(crate) data: D,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Rooted ordered tree with arena storage.
#[derive(Debug, Clone)]
pub struct Tree<D> {
    slots: Vec<Option<Node<D>>>,
    free: Vec<u32>,
    root: Option<NodeId>,
    trail: Trail<Node<D>>,
}

impl<D> Default for Tree<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Tree<D> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            trail: Trail::new(),
        }
    }

    fn node(&self, id: NodeId) -> &Node<D> {
        match self.slots.get(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("stale node id {id}"),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upper bound (exclusive) on [`NodeId::index`] for any live node.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether the handle refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Iterate over all live node ids in slot order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| NodeId(index as u32))
    }

    /// The root, if one has been set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Payload of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn data(&self, id: NodeId) -> &D {
        &self.node(id).data
    }

    /// Ordered children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent of a node, `None` for the root and for detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Lazy children-before-parent traversal starting at `start`.
    ///
    /// Only nodes for which `keep` returns true are visited, and the subtree
    /// below a rejected node is skipped entirely. If `keep(start)` is false
    /// the traversal is empty.
    pub fn postorder<F>(&self, start: NodeId, keep: F) -> Postorder<'_, D, F>
    where
        F: FnMut(NodeId) -> bool,
    {
        Postorder::new(self, start, keep)
    }

    /// Number of open rollback checkpoints.
    pub fn checkpoint_depth(&self) -> usize {
        self.trail.checkpoint_depth()
    }
}

impl<D: Clone> Tree<D> {
    /// Mutable access to a slot, recording its previous contents first.
    fn slot_mut(&mut self, id: NodeId) -> &mut Node<D> {
        let index = id.index();
        if self.trail.is_recording() {
            let old = self.slots.get(index).cloned().flatten();
            self.trail.record(id.0, old);
        }
        match self.slots.get_mut(index) {
            Some(Some(node)) => node,
            _ => panic!("stale node id {id}"),
        }
    }

    /// Creates a detached node carrying `data`.
    pub fn new_node(&mut self, data: D) -> NodeId {
        let node = Node {
            data,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            // Reuse a vacant slot.
            self.trail.record(index, None);
            self.slots[index as usize] = Some(node);
            NodeId(index)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Some(node));
            NodeId(index)
        }
    }

    /// Deletes a node, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the node still has a parent or children (detach them first).
    pub fn delete_node(&mut self, id: NodeId) {
        let node = self.node(id);
        assert!(
            node.parent.is_none() && node.children.is_empty(),
            "cannot delete node {id} while it still has edges"
        );
        if self.trail.is_recording() {
            let old = self.slots[id.index()].clone();
            self.trail.record(id.0, old);
        }
        self.slots[id.index()] = None;
        self.free.push(id.0);
        if self.root == Some(id) {
            self.root = None;
        }
    }

    /// Makes `id` the root.
    pub fn set_root(&mut self, id: NodeId) {
        assert!(self.node(id).parent.is_none(), "root {id} must not have a parent");
        self.root = Some(id);
    }

    /// Replaces the payload of a node.
    pub fn set_data(&mut self, id: NodeId, data: D) {
        self.slot_mut(id).data = data;
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` is already attached somewhere.
    pub fn new_edge(&mut self, parent: NodeId, child: NodeId) {
        assert_ne!(parent, child, "node {parent} cannot be its own child");
        assert!(
            self.node(child).parent.is_none(),
            "node {child} already has a parent"
        );
        self.slot_mut(child).parent = Some(parent);
        self.slot_mut(parent).children.push(child);
    }

    /// Removes the edge `parent -> child`.
    ///
    /// # Panics
    ///
    /// Panics if there is no such edge.
    pub fn delete_edge(&mut self, parent: NodeId, child: NodeId) {
        let position = self
            .node(parent)
            .children
            .iter()
            .position(|&c| c == child)
            .unwrap_or_else(|| panic!("no edge {parent} -> {child}"));
        self.slot_mut(parent).children.remove(position);
        self.slot_mut(child).parent = None;
    }

    /// Removes every edge from `id` to its children and returns the children
    /// in their previous order.
    pub fn detach_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.slot_mut(id).children);
        for &child in &children {
            self.slot_mut(child).parent = None;
        }
        children
    }

    /// Fully independent structural copy with dense ids.
    ///
    /// Returns the copy and the correspondence from every live id in `self`
    /// to its id in the copy. The copy has no free slots and an empty trail.
    pub fn clone_compacted(&self) -> (Tree<D>, HashMap<NodeId, NodeId>) {
        let mut map = HashMap::with_capacity(self.len());
        for id in self.node_ids() {
            let next = NodeId(map.len() as u32);
            map.insert(id, next);
        }
        let slots = self
            .slots
            .iter()
            .flatten()
            .map(|node| {
                Some(Node {
                    data: node.data.clone(),
                    parent: node.parent.map(|p| map[&p]),
                    children: node.children.iter().map(|c| map[c]).collect(),
                })
            })
            .collect();
        let copy = Tree {
            slots,
            free: Vec::new(),
            root: self.root.map(|r| map[&r]),
            trail: Trail::new(),
        };
        (copy, map)
    }

    /// Opens a rollback checkpoint.
    ///
    /// Returns the checkpoint depth after opening it.
    pub fn checkpoint(&mut self) -> usize {
        let root = self.root.map(|r| r.0);
        self.trail
            .checkpoint(self.slots.len(), self.free.clone(), root)
    }

    /// Restores the tree to the most recent checkpoint and closes it.
    ///
    /// Returns false if no checkpoint was open.
    pub fn rewind(&mut self) -> bool {
        let Some((checkpoint, undo)) = self.trail.rewind() else {
            return false;
        };
        for entry in undo {
            self.slots[entry.index as usize] = entry.old;
        }
        self.slots.truncate(checkpoint.slots);
        self.free = checkpoint.free;
        self.root = checkpoint.root.map(NodeId);
        true
    }

    /// Closes the most recent checkpoint, keeping all changes.
    pub fn commit(&mut self) -> bool {
        self.trail.commit()
    }
}
