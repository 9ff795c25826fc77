// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-call node classification.
//!
//! States live in a side table created fresh for every reduction, never on
//! the nodes themselves, so nothing leaks from one call into the next.

use crate::tree::NodeId;
use std::fmt;

/// Relationship of a node's leaf-descendants to the current target set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeState {
    /// No leaf-descendant is in the target set.
    #[default]
    Empty,
    /// Every leaf-descendant is in the target set.
    Full,
    /// The target leaves form one run touching one end of the child order.
    Partial,
    /// The target leaves form one run touching neither end.
    ///
    /// Only ever produced at the pertinent root, which nothing above consumes.
    DoublyPartial,
}

/// Arena-indexed state table for one reduction.
///
/// Nodes never recorded read as [`NodeState::Empty`]: the reduction only
/// visits nodes with at least one target leaf below them, so anything it did
/// not visit is empty.
#[derive(Debug, Default)]
pub(crate) struct NodeStates {
    states: Vec<NodeState>,
}

impl NodeStates {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            states: vec![NodeState::Empty; capacity],
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> NodeState {
        self.states.get(id.index()).copied().unwrap_or_default()
    }

    pub(crate) fn set(&mut self, id: NodeId, state: NodeState) {
        let index = id.index();
        if index >= self.states.len() {
            self.states.resize(index + 1, NodeState::Empty);
        }
        self.states[index] = state;
    }
}

/// Counts of a node's children by state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Census {
    pub full: usize,
    pub empty: usize,
    pub partial: usize,
    pub doubly_partial: usize,
}

impl Census {
    /// Tally a sequence of child states.
    pub fn of(states: &[NodeState]) -> Self {
        let mut census = Census::default();
        for state in states {
            match state {
                NodeState::Full => census.full += 1,
                NodeState::Empty => census.empty += 1,
                NodeState::Partial => census.partial += 1,
                NodeState::DoublyPartial => census.doubly_partial += 1,
            }
        }
        census
    }

    /// Total number of children counted.
    pub fn len(&self) -> usize {
        self.full + self.empty + self.partial + self.doubly_partial
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children with at least one target leaf below them.
    pub fn non_empty(&self) -> usize {
        self.len() - self.empty
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} full, {} empty, {} partial, {} doubly partial",
            self.full, self.empty, self.partial, self.doubly_partial
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NodeState::*;

    #[test]
    fn test_census() {
        let census = Census::of(&[Full, Empty, Partial, Full, DoublyPartial]);
        assert_eq!(census.full, 2);
        assert_eq!(census.empty, 1);
        assert_eq!(census.partial, 1);
        assert_eq!(census.doubly_partial, 1);
        assert_eq!(census.len(), 5);
        assert_eq!(census.non_empty(), 4);
        assert_eq!(
            census.to_string(),
            "2 full, 1 empty, 1 partial, 1 doubly partial"
        );
    }

    #[test]
    fn test_unrecorded_nodes_read_empty() {
        let mut tree = crate::tree::Tree::new();
        let a = tree.new_node(());
        let b = tree.new_node(());

        let mut states = NodeStates::with_capacity(1);
        assert_eq!(states.get(a), Empty);
        assert_eq!(states.get(b), Empty);

        // Setting beyond the initial capacity grows the table
        states.set(b, Full);
        assert_eq!(states.get(b), Full);
        assert_eq!(states.get(a), Empty);
    }
}
