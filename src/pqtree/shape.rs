// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Node payloads.

use strum_macros::{Display, EnumIter};

/// What a PQ-tree node is.
///
/// Children of a P-node may be permuted arbitrarily; children of a Q-node
/// keep their order up to reversal. Leaves carry a ground-set element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape<T> {
    P,
    Q,
    Leaf(T),
}

impl<T> Shape<T> {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::P => ShapeKind::P,
            Shape::Q => ShapeKind::Q,
            Shape::Leaf(_) => ShapeKind::Leaf,
        }
    }

    /// The element held by a leaf.
    pub fn element(&self) -> Option<&T> {
        match self {
            Shape::Leaf(element) => Some(element),
            _ => None,
        }
    }
}

/// [`Shape`] without the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ShapeKind {
    #[strum(to_string = "P-node")]
    P,
    #[strum(to_string = "Q-node")]
    Q,
    #[strum(to_string = "leaf")]
    Leaf,
}
