// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! PQ-trees with Booth–Lueker template reduction.
//!
//! A PQ-tree compactly represents every permutation of a ground set that
//! keeps a growing family of subsets contiguous. It answers consecutive-ones
//! and interval-ordering questions incrementally: each new subset is either
//! folded into the tree or rejected, in which case the tree is unchanged.
//!
//! # Architecture
//!
//! ## Tree substrate
//!
//! [`tree::Tree`] is an arena of nodes addressed by [`tree::NodeId`], with a
//! free list and a [`trail::Trail`] recording overwritten slots so a
//! checkpoint can be rewound exactly.
//!
//! ## Reduction
//!
//! Accepting a set runs three phases:
//!
//! 1. **Pertinent subtree**: per-node counters of target leaves locate the
//!    deepest node spanning the set.
//! 2. **Templates**: a postorder pass applies the first matching rule of the
//!    ordered [`Template`] catalogue at each pertinent node.
//! 3. **Commit or roll back**: if some node matches no template the tree is
//!    restored, by snapshot or by trail per [`RollbackStrategy`].
//!
//! ## Observation
//!
//! [`trace::ReductionSink`] receives every step, the `tracing` facade logs
//! them, and [`trace::Statistics`] counts them.
//!
//! # References
//!
//! - Booth, K. S. and Lueker, G. S. (1976). "Testing for the consecutive ones
//!   property, interval graphs, and graph planarity using PQ-tree algorithms."
//!   Journal of Computer and System Sciences 13(3), 335–379.

pub mod error;
pub mod ordering;
pub mod pqtree;
pub mod reduction;
pub mod trace;
pub mod trail;
pub mod tree;

// Re-export commonly used types
pub use error::{InvariantViolation, PqError};
pub use pqtree::{PqConfig, PqTree, PqTreeBuilder, RollbackStrategy, Shape, ShapeKind};
pub use reduction::{NodeState, ReductionFailure, Template};
pub use trace::{NoopSink, Outcome, ReductionSink, Statistics};
