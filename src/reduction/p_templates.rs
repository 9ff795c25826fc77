// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rewrites for P-node templates.
//!
//! All of these gather full children into one group so the target leaves end
//! up in a single run. Partial children are dissolved into the node, which
//! then becomes a Q-node, because the order around a partial child is fixed.

use super::state::NodeState::{self, *};
use super::{NodeView, ReductionContext};
use crate::pqtree::Shape;

pub(super) fn root_split<T: Clone>(ctx: &mut ReductionContext<'_, T>, view: &NodeView) -> NodeState {
    let fulls = view.children_in(Full);
    if fulls.len() > 1 {
        for &child in &fulls {
            ctx.tree.delete_edge(view.id, child);
        }
        if let Some(group) = ctx.group(Shape::P, fulls, Full) {
            ctx.tree.new_edge(view.id, group);
        }
    }
    Partial
}

pub(super) fn split<T: Clone>(ctx: &mut ReductionContext<'_, T>, view: &NodeView) -> NodeState {
    ctx.tree.detach_children(view.id);
    let empties = ctx.group(Shape::P, view.children_in(Empty), Empty);
    let fulls = ctx.group(Shape::P, view.children_in(Full), Full);
    ctx.tree.set_data(view.id, Shape::Q);
    ctx.attach(view.id, empties.into_iter().chain(fulls));
    Partial
}

/// With empty siblings around, the partial child stays put and absorbs the
/// full group at its full end. Without them the node itself becomes the
/// Q-node.
pub(super) fn root_single_partial<T: Clone>(
    ctx: &mut ReductionContext<'_, T>,
    view: &NodeView,
) -> NodeState {
    let partial = view.children_in(Partial)[0];
    let fulls = view.children_in(Full);

    if view.census.empty > 0 {
        for &child in &fulls {
            ctx.tree.delete_edge(view.id, child);
        }
        if let Some(group) = ctx.group(Shape::P, fulls, Full) {
            ctx.extend_full_end(partial, group);
        }
    } else {
        ctx.tree.detach_children(view.id);
        let mut sequence = ctx.dissolve_partial(partial, true);
        sequence.extend(ctx.group(Shape::P, fulls, Full));
        ctx.tree.set_data(view.id, Shape::Q);
        ctx.attach(view.id, sequence);
    }
    Partial
}

/// Becomes the Q-node `[empties, partial E..F, fulls]`.
pub(super) fn single_partial<T: Clone>(ctx: &mut ReductionContext<'_, T>, view: &NodeView) -> NodeState {
    let partial = view.children_in(Partial)[0];
    ctx.tree.detach_children(view.id);

    let mut sequence: Vec<_> = ctx
        .group(Shape::P, view.children_in(Empty), Empty)
        .into_iter()
        .collect();
    sequence.extend(ctx.dissolve_partial(partial, true));
    sequence.extend(ctx.group(Shape::P, view.children_in(Full), Full));

    ctx.tree.set_data(view.id, Shape::Q);
    ctx.attach(view.id, sequence);
    Partial
}

/// Merges `partial E..F, fulls, partial F..E` into one Q-node. If empty
/// children remain, the merged Q-node replaces the first partial child and
/// the node stays a P-node.
pub(super) fn root_double_partial<T: Clone>(
    ctx: &mut ReductionContext<'_, T>,
    view: &NodeView,
) -> NodeState {
    let partials = view.children_in(Partial);
    ctx.tree.detach_children(view.id);

    let mut sequence = ctx.dissolve_partial(partials[0], true);
    sequence.extend(ctx.group(Shape::P, view.children_in(Full), Full));
    sequence.extend(ctx.dissolve_partial(partials[1], false));

    if view.census.empty == 0 {
        ctx.tree.set_data(view.id, Shape::Q);
        ctx.attach(view.id, sequence);
    } else {
        let merged = ctx.tree.new_node(Shape::Q);
        ctx.states.set(merged, DoublyPartial);
        ctx.attach(merged, sequence);
        let children: Vec<_> = view
            .entries()
            .filter_map(|(id, state)| match state {
                Empty => Some(id),
                Partial if id == partials[0] => Some(merged),
                _ => None,
            })
            .collect();
        ctx.attach(view.id, children);
    }
    DoublyPartial
}

#[cfg(test)]
mod tests {
    use crate::PqTree;

    #[test]
    fn test_root_split_groups_full_children() {
        let mut tree = PqTree::new(1..=5).unwrap();
        assert!(tree.accept(&[2, 4]));
        assert_eq!(tree.to_bracket_string(), "(1 3 5 (2 4))");
    }

    #[test]
    fn test_split_turns_child_into_q_node() {
        let mut tree = PqTree::new(1..=5).unwrap();
        assert!(tree.accept(&[1, 2, 3]));
        assert_eq!(tree.to_bracket_string(), "(4 5 (1 2 3))");
        // The group (1 2 3) is split below the new pertinent root
        assert!(tree.accept(&[3, 4]));
        assert_eq!(tree.to_bracket_string(), "(5 [(1 2) 3 4])");
    }

    #[test]
    fn test_root_single_partial_without_empty_siblings() {
        let mut tree = PqTree::new(1..=4).unwrap();
        assert!(tree.accept(&[1, 2]));
        assert_eq!(tree.to_bracket_string(), "(3 4 (1 2))");
        assert!(tree.accept(&[2, 3, 4]));
        assert_eq!(tree.to_bracket_string(), "[1 2 (3 4)]");
    }

    #[test]
    fn test_root_single_partial_with_empty_siblings() {
        let mut tree = PqTree::new(1..=5).unwrap();
        assert!(tree.accept(&[1, 2]));
        assert!(tree.accept(&[2, 3]));
        assert_eq!(tree.to_bracket_string(), "(4 5 [1 2 3])");
        // A full Q-node is just another full child of the root
        assert!(tree.accept(&[1, 2, 3, 4]));
        assert_eq!(tree.to_bracket_string(), "(5 (4 [1 2 3]))");
    }

    #[test]
    fn test_single_partial_below_root() {
        let mut tree = PqTree::new(1..=6).unwrap();
        assert!(tree.accept(&[1, 2, 3, 4]));
        assert!(tree.accept(&[3, 4]));
        assert_eq!(tree.to_bracket_string(), "(5 6 (1 2 (3 4)))");
        assert!(tree.accept(&[4, 5]));
        assert_eq!(tree.to_bracket_string(), "(6 [(1 2) 3 4 5])");
    }

    #[test]
    fn test_root_double_partial_keeps_empty_siblings() {
        let mut tree = PqTree::new(1..=7).unwrap();
        assert!(tree.accept(&[1, 2]));
        assert!(tree.accept(&[3, 4]));
        assert_eq!(tree.to_bracket_string(), "(5 6 7 (1 2) (3 4))");
        assert!(tree.accept(&[2, 3, 5]));
        assert_eq!(tree.to_bracket_string(), "(6 7 [1 2 5 3 4])");
    }

    #[test]
    fn test_root_double_partial_becomes_q_node() {
        let mut tree = PqTree::new(1..=4).unwrap();
        assert!(tree.accept(&[1, 2]));
        assert!(tree.accept(&[3, 4]));
        assert_eq!(tree.to_bracket_string(), "((1 2) (3 4))");
        assert!(tree.accept(&[2, 3]));
        assert_eq!(tree.to_bracket_string(), "[1 2 3 4]");
    }
}
