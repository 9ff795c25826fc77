// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Undoing a rejected reduction.
//!
//! Reductions never add, remove or move leaves between slots, so the leaf
//! map only needs restoring when the whole tree is replaced.

use super::config::RollbackStrategy;
use super::Shape;
use crate::tree::{NodeId, Tree};
use std::collections::HashMap;
use std::hash::Hash;

/// Open rollback for one reduction.
pub(super) enum Rollback<T> {
    Snapshot {
        tree: Tree<Shape<T>>,
        leaves: HashMap<T, NodeId>,
    },
    Trail,
}

impl<T: Eq + Hash + Clone> Rollback<T> {
    /// Prepare to undo whatever happens to `tree` next.
    pub(super) fn begin(
        strategy: RollbackStrategy,
        tree: &mut Tree<Shape<T>>,
        leaves: &HashMap<T, NodeId>,
    ) -> Self {
        match strategy {
            RollbackStrategy::Snapshot => {
                let (copy, renumbered) = tree.clone_compacted();
                let leaves = leaves
                    .iter()
                    .map(|(element, leaf)| (element.clone(), renumbered[leaf]))
                    .collect();
                Rollback::Snapshot { tree: copy, leaves }
            }
            RollbackStrategy::Trail => {
                tree.checkpoint();
                Rollback::Trail
            }
        }
    }

    pub(super) fn commit(self, tree: &mut Tree<Shape<T>>) {
        if let Rollback::Trail = self {
            tree.commit();
        }
    }

    /// Put `tree` and `leaves` back as they were at [`Rollback::begin`].
    pub(super) fn restore(self, tree: &mut Tree<Shape<T>>, leaves: &mut HashMap<T, NodeId>) {
        match self {
            Rollback::Snapshot {
                tree: copy,
                leaves: saved,
            } => {
                *tree = copy;
                *leaves = saved;
            }
            Rollback::Trail => {
                let rewound = tree.rewind();
                debug_assert!(rewound, "trail rollback without an open checkpoint");
            }
        }
    }
}
