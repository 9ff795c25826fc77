// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use pq_tree::trace::{CommitEvent, PertinentEvent, ReductionSink, TemplateEvent};
use pq_tree::{PqTree, PqTreeBuilder, ReductionFailure, RollbackStrategy};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness. Set `RUST_LOG=pq_tree=trace`
/// to see every template application.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A tree over `1..=n` using the given rollback strategy, always verifying.
pub fn tree(n: u32, rollback: RollbackStrategy) -> PqTree<u32> {
    PqTreeBuilder::new()
        .with_rollback(rollback)
        .with_verify(true)
        .build(1..=n)
        .unwrap()
}

/// Every permutation of `elements`.
pub fn permutations(elements: &[u32]) -> Vec<Vec<u32>> {
    if elements.len() <= 1 {
        return vec![elements.to_vec()];
    }
    let mut result = Vec::new();
    for (i, &first) in elements.iter().enumerate() {
        let mut rest = elements.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}

fn contiguous(permutation: &[u32], set: &[u32]) -> bool {
    let positions: Vec<usize> = permutation
        .iter()
        .enumerate()
        .filter(|(_, e)| set.contains(e))
        .map(|(i, _)| i)
        .collect();
    match (positions.first(), positions.last()) {
        (Some(first), Some(last)) => last - first + 1 == positions.len(),
        _ => true,
    }
}

/// Brute-force reference: the permutations of `1..=n` that satisfy every
/// constraint accepted so far.
#[derive(Debug, Clone)]
pub struct Oracle {
    alive: Vec<Vec<u32>>,
}

impl Oracle {
    pub fn new(n: u32) -> Self {
        let ground: Vec<u32> = (1..=n).collect();
        Self {
            alive: permutations(&ground),
        }
    }

    /// Keep only the permutations in which `set` is contiguous, unless that
    /// leaves none, in which case nothing changes and the answer is `false`.
    pub fn accept(&mut self, set: &[u32]) -> bool {
        let kept: Vec<_> = self
            .alive
            .iter()
            .filter(|p| contiguous(p, set))
            .cloned()
            .collect();
        if kept.is_empty() {
            return false;
        }
        self.alive = kept;
        true
    }

    pub fn count(&self) -> u128 {
        self.alive.len() as u128
    }

    pub fn allows(&self, ordering: &[u32]) -> bool {
        self.alive.iter().any(|p| p == ordering)
    }
}

/// One recorded sink callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Pertinent(PertinentEvent),
    Template(TemplateEvent),
    Rejected(ReductionFailure),
    RolledBack(RollbackStrategy),
    Committed(CommitEvent),
    Trivial(usize),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl ReductionSink for RecordingSink {
    fn on_pertinent(&mut self, e: &PertinentEvent) {
        self.events.push(Event::Pertinent(*e));
    }

    fn on_template(&mut self, e: &TemplateEvent) {
        self.events.push(Event::Template(*e));
    }

    fn on_rejected(&mut self, failure: &ReductionFailure) {
        self.events.push(Event::Rejected(failure.clone()));
    }

    fn on_rolled_back(&mut self, strategy: RollbackStrategy) {
        self.events.push(Event::RolledBack(strategy));
    }

    fn on_committed(&mut self, e: &CommitEvent) {
        self.events.push(Event::Committed(*e));
    }

    fn on_trivial(&mut self, size: usize) {
        self.events.push(Event::Trivial(size));
    }
}
