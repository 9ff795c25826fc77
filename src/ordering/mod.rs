// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reading permutations back out of a PQ-tree.

use crate::pqtree::Shape;
use crate::tree::Tree;
use std::collections::HashSet;
use std::hash::Hash;

/// Leaf elements left to right: one of the permutations the tree allows.
pub fn frontier<T: Clone>(tree: &Tree<Shape<T>>) -> Vec<T> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };
    tree.postorder(root, |_| true)
        .filter_map(|id| tree.data(id).element().cloned())
        .collect()
}

/// Whether the members of `set` occupy one unbroken range of `ordering`.
///
/// Duplicates in `set` are ignored. A member missing from `ordering` makes
/// the answer `false`; the empty set is trivially contiguous.
pub fn is_contiguous<T: Eq + Hash>(ordering: &[T], set: &[T]) -> bool {
    let members: HashSet<&T> = set.iter().collect();
    let positions: Vec<usize> = ordering
        .iter()
        .enumerate()
        .filter(|(_, element)| members.contains(element))
        .map(|(i, _)| i)
        .collect();
    match (positions.first(), positions.last()) {
        _ if positions.len() != members.len() => false,
        (Some(first), Some(last)) => last - first + 1 == positions.len(),
        _ => true,
    }
}

/// Number of distinct permutations the tree represents.
///
/// A P-node with `k` children contributes `k!`, a Q-node `2`. Returns `None`
/// if the count does not fit in a `u128`.
pub fn count_orderings<T>(tree: &Tree<Shape<T>>) -> Option<u128> {
    let mut count: u128 = 1;
    for id in tree.node_ids() {
        let factor = match tree.data(id) {
            Shape::P => factorial(tree.children(id).len())?,
            Shape::Q => 2,
            Shape::Leaf(_) => 1,
        };
        count = count.checked_mul(factor)?;
    }
    Some(count)
}

fn factorial(n: usize) -> Option<u128> {
    (2..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_contiguous() {
        let ordering = [1, 2, 3, 4, 5];
        assert!(is_contiguous(&ordering, &[2, 3, 4]));
        assert!(is_contiguous(&ordering, &[4, 2, 3, 3]));
        assert!(is_contiguous(&ordering, &[5]));
        assert!(is_contiguous(&ordering, &[]));
        assert!(!is_contiguous(&ordering, &[1, 3]));
        assert!(!is_contiguous(&ordering, &[4, 9]));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(5), Some(120));
        assert_eq!(factorial(34), Some(295232799039604140847618609643520000000));
        assert_eq!(factorial(35), None);
    }

    #[test]
    fn test_frontier_and_count() {
        // (1 [2 3 4])
        let mut tree = Tree::new();
        let root = tree.new_node(Shape::P);
        let q = tree.new_node(Shape::Q);
        tree.set_root(root);
        let leaves: Vec<_> = (1..=4).map(|e| tree.new_node(Shape::Leaf(e))).collect();
        tree.new_edge(root, leaves[0]);
        tree.new_edge(root, q);
        for &leaf in &leaves[1..] {
            tree.new_edge(q, leaf);
        }
        assert_eq!(frontier(&tree), vec![1, 2, 3, 4]);
        assert_eq!(count_orderings(&tree), Some(4));
    }

    #[test]
    fn test_count_overflow() {
        let mut tree = Tree::new();
        let root = tree.new_node(Shape::P);
        tree.set_root(root);
        for e in 0..40 {
            let leaf = tree.new_node(Shape::Leaf(e));
            tree.new_edge(root, leaf);
        }
        assert_eq!(count_orderings(&tree), None);
    }
}
