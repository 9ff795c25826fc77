// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The PQ-tree.
//!
//! A [`PqTree`] over a ground set represents every permutation of the ground
//! set in which each accepted constraint set appears as one contiguous run.
//! Constraints are added one at a time with [`PqTree::accept`]; a constraint
//! that cannot be satisfied together with the earlier ones is rejected and
//! leaves the tree exactly as it was.
//!
//! # Example
//!
//! ```
//! use pq_tree::PqTree;
//!
//! let mut tree = PqTree::new(1..=5).unwrap();
//! assert!(tree.accept(&[1, 2]));
//! assert!(tree.accept(&[4, 5]));
//! assert!(tree.accept(&[2, 3, 4]));
//! assert_eq!(tree.to_bracket_string(), "[1 2 3 4 5]");
//! assert_eq!(tree.count_orderings(), Some(2));
//!
//! // 1 and 5 sit at opposite ends now
//! assert!(!tree.accept(&[1, 5]));
//! assert_eq!(tree.to_bracket_string(), "[1 2 3 4 5]");
//! ```

mod bracket;
pub mod config;
mod rollback;
mod shape;
mod validate;

pub use config::{PqConfig, PqTreeBuilder, RollbackStrategy};
pub use shape::{Shape, ShapeKind};

use crate::error::PqError;
use crate::ordering;
use crate::reduction::{self, pertinent::Pertinent};
use crate::trace::{CommitEvent, NoopSink, PertinentEvent, ReductionSink, Statistics, Tracer};
use crate::tree::{NodeId, Tree};
use rollback::Rollback;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// PQ-tree over a ground set of `T`.
#[derive(Debug, Clone)]
pub struct PqTree<T> {
    tree: Tree<Shape<T>>,
    leaves: HashMap<T, NodeId>,
    ground: Vec<T>,
    config: PqConfig,
    statistics: Statistics,
}

impl<T> PqTree<T>
where
    T: Eq + Hash + Clone + Debug,
{
    /// A tree allowing every permutation of `ground`: one P-node over all
    /// the leaves.
    pub fn new(ground: impl IntoIterator<Item = T>) -> Result<Self, PqError> {
        Self::with_config(ground, PqConfig::default())
    }

    /// Like [`PqTree::new`], with explicit settings. See [`PqTreeBuilder`].
    pub fn with_config(
        ground: impl IntoIterator<Item = T>,
        config: PqConfig,
    ) -> Result<Self, PqError> {
        let ground: Vec<T> = ground.into_iter().collect();
        if ground.is_empty() {
            return Err(PqError::EmptyGroundSet);
        }

        let mut tree = Tree::new();
        let root = tree.new_node(Shape::P);
        tree.set_root(root);
        let mut leaves = HashMap::with_capacity(ground.len());
        for element in &ground {
            let leaf = tree.new_node(Shape::Leaf(element.clone()));
            if leaves.insert(element.clone(), leaf).is_some() {
                return Err(PqError::duplicate(element));
            }
            tree.new_edge(root, leaf);
        }

        Ok(Self {
            tree,
            leaves,
            ground,
            config,
            statistics: Statistics::new(),
        })
    }

    /// Add the constraint that `set` be contiguous.
    ///
    /// Returns `false`, with the tree unchanged, if no permutation the tree
    /// allows keeps `set` contiguous. Duplicates in `set` are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `set` names an element outside the ground set. Use
    /// [`PqTree::try_accept`] to get that as an error instead.
    pub fn accept(&mut self, set: &[T]) -> bool {
        match self.try_accept(set) {
            Ok(accepted) => accepted,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_accept(&mut self, set: &[T]) -> Result<bool, PqError> {
        self.try_accept_with(set, &mut NoopSink)
    }

    /// [`PqTree::try_accept`], reporting each step to `sink`.
    pub fn try_accept_with(
        &mut self,
        set: &[T],
        sink: &mut dyn ReductionSink,
    ) -> Result<bool, PqError> {
        let leaves = self.resolve(set)?;
        let mut tracer = Tracer::new(&mut self.statistics, sink);
        if leaves.len() <= 1 {
            tracer.trivial(leaves.len());
            return Ok(true);
        }

        let pertinent = Pertinent::compute(&self.tree, &leaves);
        tracer.pertinent(&PertinentEvent {
            root: pertinent.root,
            leaves: leaves.len(),
            nodes: pertinent.schedule.len(),
        });

        let rollback = Rollback::begin(self.config.rollback, &mut self.tree, &self.leaves);
        match reduction::reduce(&mut self.tree, &pertinent, &mut tracer) {
            Ok(templates) => {
                rollback.commit(&mut self.tree);
                tracer.committed(&CommitEvent {
                    root: pertinent.root,
                    templates,
                    live_nodes: self.tree.len(),
                });
            }
            Err(failure) => {
                tracer.rejected(&failure);
                rollback.restore(&mut self.tree, &mut self.leaves);
                tracer.rolled_back(self.config.rollback);
                return Ok(false);
            }
        }

        if self.config.verify {
            self.verify_accepted(set);
        }
        Ok(true)
    }

    /// Distinct leaves for `set`, in first-mention order.
    fn resolve(&self, set: &[T]) -> Result<Vec<NodeId>, PqError> {
        let mut seen = HashSet::with_capacity(set.len());
        let mut leaves = Vec::with_capacity(set.len());
        for element in set {
            let leaf = *self
                .leaves
                .get(element)
                .ok_or_else(|| PqError::unknown(element))?;
            if seen.insert(leaf) {
                leaves.push(leaf);
            }
        }
        Ok(leaves)
    }

    fn verify_accepted(&self, set: &[T]) {
        if let Err(violation) = self.validate() {
            panic!("PQ-tree malformed after accepting {set:?}: {violation}");
        }
        if !self.check(set) {
            panic!(
                "accepted {set:?} but it is not contiguous in {:?}",
                self.extract_ordering()
            );
        }
    }

    /// One permutation the tree allows: the leaves left to right.
    pub fn extract_ordering(&self) -> Vec<T> {
        ordering::frontier(&self.tree)
    }

    /// Whether `set` is contiguous in [`PqTree::extract_ordering`].
    ///
    /// An element outside the ground set makes the answer `false`.
    pub fn check(&self, set: &[T]) -> bool {
        ordering::is_contiguous(&self.extract_ordering(), set)
    }

    /// Number of permutations the tree allows, or `None` past `u128::MAX`.
    pub fn count_orderings(&self) -> Option<u128> {
        ordering::count_orderings(&self.tree)
    }

    /// The ground set, in construction order.
    pub fn ground_set(&self) -> &[T] {
        &self.ground
    }

    pub fn contains(&self, element: &T) -> bool {
        self.leaves.contains_key(element)
    }

    /// Size of the ground set.
    pub fn len(&self) -> usize {
        self.ground.len()
    }

    /// Always `false`: a tree is never built over an empty ground set.
    pub fn is_empty(&self) -> bool {
        self.ground.is_empty()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn config(&self) -> PqConfig {
        self.config
    }
}
