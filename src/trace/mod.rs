// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Observing reductions.
//!
//! [`ReductionSink`] has one method per event, each defaulting to a no-op,
//! so a sink only implements what it cares about. Every event also goes to
//! the `tracing` facade and into the tree's [`Statistics`].
//!
//! ```
//! use pq_tree::trace::{ReductionSink, TemplateEvent};
//! use pq_tree::{PqTree, Template};
//!
//! #[derive(Default)]
//! struct Templates(Vec<Template>);
//!
//! impl ReductionSink for Templates {
//!     fn on_template(&mut self, e: &TemplateEvent) {
//!         self.0.push(e.template);
//!     }
//! }
//!
//! let mut tree = PqTree::new(1..=4).unwrap();
//! let mut sink = Templates::default();
//! assert_eq!(tree.try_accept_with(&[1, 2], &mut sink), Ok(true));
//! assert_eq!(sink.0, vec![Template::Leaf, Template::Leaf, Template::PRootSplit]);
//! ```

pub mod statistics;

pub use statistics::{Outcome, Statistics};

use crate::pqtree::RollbackStrategy;
use crate::reduction::{NodeState, ReductionFailure, Template};
use crate::tree::NodeId;
use tracing::{debug, trace};

/// The pertinent subtree has been located.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PertinentEvent {
    /// Deepest node spanning the whole target set.
    pub root: NodeId,
    /// Distinct target leaves.
    pub leaves: usize,
    /// Nodes the reduction will visit.
    pub nodes: usize,
}

/// A template rewrote one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateEvent {
    pub node: NodeId,
    pub template: Template,
    /// State of the node as its parent will see it.
    pub state: NodeState,
}

/// A reduction succeeded and its rewrites were kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitEvent {
    pub root: NodeId,
    /// Number of templates applied.
    pub templates: usize,
    /// Live nodes in the tree afterwards.
    pub live_nodes: usize,
}

/// Receives reduction events.
pub trait ReductionSink {
    /// Called once the pertinent subtree is known.
    fn on_pertinent(&mut self, e: &PertinentEvent) {
        _ = e;
    }

    /// Called after each template application.
    fn on_template(&mut self, e: &TemplateEvent) {
        _ = e;
    }

    /// Called when no template matches, before the tree is restored.
    fn on_rejected(&mut self, failure: &ReductionFailure) {
        _ = failure;
    }

    /// Called after the tree has been restored.
    fn on_rolled_back(&mut self, strategy: RollbackStrategy) {
        _ = strategy;
    }

    fn on_committed(&mut self, e: &CommitEvent) {
        _ = e;
    }

    /// Called for sets of at most one element, which need no reduction.
    fn on_trivial(&mut self, size: usize) {
        _ = size;
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl ReductionSink for NoopSink {}

/// Funnel for everything observable about one call.
pub(crate) struct Tracer<'a> {
    statistics: &'a mut Statistics,
    sink: &'a mut dyn ReductionSink,
}

impl<'a> Tracer<'a> {
    pub(crate) fn new(statistics: &'a mut Statistics, sink: &'a mut dyn ReductionSink) -> Self {
        Self { statistics, sink }
    }

    pub(crate) fn trivial(&mut self, size: usize) {
        debug!(size, "trivial constraint accepted");
        self.statistics.increment_outcome(Outcome::Trivial);
        self.sink.on_trivial(size);
    }

    pub(crate) fn pertinent(&mut self, e: &PertinentEvent) {
        debug!(root = %e.root, leaves = e.leaves, nodes = e.nodes, "pertinent subtree");
        self.sink.on_pertinent(e);
    }

    pub(crate) fn template_applied(&mut self, e: &TemplateEvent) {
        trace!(node = %e.node, template = e.template.name(), state = ?e.state, "template applied");
        self.statistics.increment_template(e.template);
        self.sink.on_template(e);
    }

    pub(crate) fn rejected(&mut self, failure: &ReductionFailure) {
        debug!(%failure, "constraint rejected");
        self.statistics.increment_outcome(Outcome::Rejected);
        self.sink.on_rejected(failure);
    }

    pub(crate) fn rolled_back(&mut self, strategy: RollbackStrategy) {
        let strategy_name: &'static str = strategy.into();
        trace!(strategy = strategy_name, "tree restored");
        self.statistics.increment_outcome(Outcome::RolledBack);
        self.sink.on_rolled_back(strategy);
    }

    pub(crate) fn committed(&mut self, e: &CommitEvent) {
        debug!(root = %e.root, templates = e.templates, live_nodes = e.live_nodes, "constraint accepted");
        self.statistics.increment_outcome(Outcome::Accepted);
        self.sink.on_committed(e);
    }
}
