// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rewrites for Q-node templates.
//!
//! A Q-node keeps its child order; the only structural work is splicing each
//! partial child's children into the node at the partial child's position,
//! oriented so its full run faces the rest of the full run.

use super::state::NodeState::{self, *};
use super::{NodeView, ReductionContext};

/// Replace every partial child by its own children. `full_last(nth)` tells
/// whether the `nth` partial child (counting from the left) must end with
/// its full run.
fn splice<T: Clone>(
    ctx: &mut ReductionContext<'_, T>,
    view: &NodeView,
    full_last: impl Fn(usize) -> bool,
) {
    ctx.tree.detach_children(view.id);
    let mut sequence = Vec::with_capacity(view.children.len() + 2);
    let mut nth = 0;
    for (child, state) in view.entries() {
        if state == Partial {
            sequence.extend(ctx.dissolve_partial(child, full_last(nth)));
            nth += 1;
        } else {
            sequence.push(child);
        }
    }
    ctx.attach(view.id, sequence);
}

/// `E* P F*` or `F* P E*`: the node stays partial after the splice.
pub(super) fn single_partial<T: Clone>(ctx: &mut ReductionContext<'_, T>, view: &NodeView) -> NodeState {
    let p = view.partial_positions()[0];
    let empty_before = view.states[..p].iter().all(|&s| s == Empty);
    let full_after = view.states[p + 1..].iter().all(|&s| s == Full);
    let full_last = empty_before && full_after;
    splice(ctx, view, |_| full_last);
    Partial
}

/// Pertinent-root splices, where the full run ends up strictly inside.
pub(super) fn root_fold<T: Clone>(
    ctx: &mut ReductionContext<'_, T>,
    view: &NodeView,
    full_last: impl Fn(usize) -> bool,
) -> NodeState {
    splice(ctx, view, full_last);
    DoublyPartial
}
