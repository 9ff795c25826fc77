// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bracket notation: P-nodes as `(a b)`, Q-nodes as `[a b]`, leaves as their
//! element.

use super::{PqTree, Shape};
use crate::tree::{NodeId, Tree};
use std::fmt;

fn write_node<T: fmt::Display>(
    tree: &Tree<Shape<T>>,
    id: NodeId,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let (open, close) = match tree.data(id) {
        Shape::Leaf(element) => return write!(f, "{element}"),
        Shape::P => ('(', ')'),
        Shape::Q => ('[', ']'),
    };
    write!(f, "{open}")?;
    for (i, &child) in tree.children(id).iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write_node(tree, child, f)?;
    }
    write!(f, "{close}")
}

impl<T: fmt::Display> fmt::Display for PqTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tree.root() {
            Some(root) => write_node(&self.tree, root, f),
            None => Ok(()),
        }
    }
}

impl<T: fmt::Display> PqTree<T> {
    /// The tree in bracket notation, for golden comparisons.
    pub fn to_bracket_string(&self) -> String {
        self.to_string()
    }
}
