// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configuration and builder.

use super::PqTree;
use crate::error::PqError;
use std::fmt::Debug;
use std::hash::Hash;
use strum_macros::{EnumIter, IntoStaticStr};

/// How a rejected reduction is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, IntoStaticStr)]
pub enum RollbackStrategy {
    /// Clone the whole tree before reducing; restore the clone on rejection.
    #[default]
    Snapshot,
    /// Record overwritten slots on the tree's trail; rewind on rejection.
    Trail,
}

/// Per-tree settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PqConfig {
    pub rollback: RollbackStrategy,
    /// Re-validate the tree and cross-check the accepted set after every
    /// successful reduction. A mismatch panics.
    pub verify: bool,
}

impl Default for PqConfig {
    fn default() -> Self {
        Self {
            rollback: RollbackStrategy::default(),
            verify: cfg!(debug_assertions) || cfg!(feature = "verify"),
        }
    }
}

/// Builder for a [`PqTree`] with non-default settings.
///
/// ```
/// use pq_tree::{PqTreeBuilder, RollbackStrategy};
///
/// let mut tree = PqTreeBuilder::new()
///     .with_rollback(RollbackStrategy::Trail)
///     .with_verify(true)
///     .build(1..=4)
///     .unwrap();
/// assert!(tree.accept(&[2, 3]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PqTreeBuilder {
    config: PqConfig,
}

impl PqTreeBuilder {
    /// Start from the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rollback strategy
    pub fn with_rollback(mut self, rollback: RollbackStrategy) -> Self {
        self.config.rollback = rollback;
        self
    }

    /// Turn post-reduction verification on or off
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.config.verify = verify;
        self
    }

    pub fn config(&self) -> PqConfig {
        self.config
    }

    /// Build the tree over `ground`.
    pub fn build<T, I>(self, ground: I) -> Result<PqTree<T>, PqError>
    where
        T: Eq + Hash + Clone + Debug,
        I: IntoIterator<Item = T>,
    {
        PqTree::with_config(ground, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PqConfig::default();
        assert_eq!(config.rollback, RollbackStrategy::Snapshot);
        assert_eq!(
            config.verify,
            cfg!(debug_assertions) || cfg!(feature = "verify")
        );
    }

    #[test]
    fn test_builder() {
        let builder = PqTreeBuilder::new()
            .with_rollback(RollbackStrategy::Trail)
            .with_verify(false);
        assert_eq!(
            builder.config(),
            PqConfig {
                rollback: RollbackStrategy::Trail,
                verify: false
            }
        );
        let tree = builder.build(["a", "b"]).unwrap();
        assert_eq!(tree.config().rollback, RollbackStrategy::Trail);
    }
}
