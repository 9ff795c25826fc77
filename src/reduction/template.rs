// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The ordered template catalogue.
//!
//! Each variant pairs a predicate over a [`NodeView`] with a rewrite. The
//! declaration order is the priority order: [`Template::select`] returns the
//! first variant whose predicate holds.
//!
//! Notation used below: `E` empty child, `F` full child, `P` partial child,
//! `*` zero or more, `+` one or more.

use super::state::NodeState::{self, *};
use super::{p_templates, q_templates, NodeView, ReductionContext};
use crate::pqtree::ShapeKind;
use strum::IntoEnumIterator;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

/// One rule of the reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCountMacro, EnumIter, IntoStaticStr)]
#[repr(u8)]
pub enum Template {
    /// A visited leaf is in the target set.
    Leaf,
    /// P-node with no non-empty child.
    PEmpty,
    /// P-node whose children are all full.
    PFull,
    /// Pertinent-root P-node with full and empty children only: the full
    /// children move under one new P-node.
    PRootSplit,
    /// Non-root P-node with full and empty children only: becomes the
    /// Q-node `[empties, fulls]`.
    PSplit,
    /// Pertinent-root P-node with exactly one partial child.
    PRootSinglePartial,
    /// Non-root P-node with one partial child and no full children.
    PSinglePartial,
    /// Non-root P-node with one partial child and some full children.
    PSinglePartialWithFull,
    /// Pertinent-root P-node with exactly two partial children.
    PRootDoublePartial,
    /// Q-node with no non-empty child.
    QEmpty,
    /// Q-node whose children are all full.
    QFull,
    /// Q-node `E+ F+` or `F+ E+`.
    QSplit,
    /// Q-node `E* P F*` or `F* P E*`.
    QSinglePartial,
    /// Pertinent-root Q-node `E+ F+ E+`.
    QRootDoublySplit,
    /// Pertinent-root Q-node `E* P F+ E+`.
    QRootPartialLeft,
    /// Pertinent-root Q-node `E+ F+ P E*`.
    QRootPartialRight,
    /// Pertinent-root Q-node `E* P F* P E*`.
    QRootDoublePartial,
}

fn all(states: &[NodeState], state: NodeState) -> bool {
    states.iter().all(|&s| s == state)
}

/// `A+ B+` with both runs non-empty.
fn two_runs(states: &[NodeState], first: NodeState, second: NodeState) -> bool {
    let split = states.iter().take_while(|&&s| s == first).count();
    split > 0 && split < states.len() && all(&states[split..], second)
}

impl Template {
    /// Human-readable name, as used in traces and statistics.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// First template in priority order that matches the node.
    pub(crate) fn select(view: &NodeView) -> Option<Template> {
        Template::iter().find(|template| template.matches(view))
    }

    pub(crate) fn matches(self, view: &NodeView) -> bool {
        let census = &view.census;
        let states = view.states.as_slice();
        let no_partials = census.partial == 0 && census.doubly_partial == 0;
        let one_partial = census.partial == 1 && census.doubly_partial == 0;
        let two_partials = census.partial == 2 && census.doubly_partial == 0;
        let split = census.full > 0 && census.empty > 0;

        match (self, view.shape) {
            (Template::Leaf, ShapeKind::Leaf) => true,

            (Template::PEmpty, ShapeKind::P) | (Template::QEmpty, ShapeKind::Q) => {
                census.non_empty() == 0
            }
            (Template::PFull, ShapeKind::P) | (Template::QFull, ShapeKind::Q) => {
                census.full == census.len()
            }

            (Template::PRootSplit, ShapeKind::P) => view.at_root && no_partials && split,
            (Template::PSplit, ShapeKind::P) => !view.at_root && no_partials && split,
            (Template::PRootSinglePartial, ShapeKind::P) => view.at_root && one_partial,
            (Template::PSinglePartial, ShapeKind::P) => {
                !view.at_root && one_partial && census.full == 0
            }
            (Template::PSinglePartialWithFull, ShapeKind::P) => {
                !view.at_root && one_partial && census.full > 0
            }
            (Template::PRootDoublePartial, ShapeKind::P) => view.at_root && two_partials,

            (Template::QSplit, ShapeKind::Q) => {
                no_partials && (two_runs(states, Empty, Full) || two_runs(states, Full, Empty))
            }
            (Template::QSinglePartial, ShapeKind::Q) => {
                one_partial && {
                    let p = view.partial_positions()[0];
                    let (before, after) = (&states[..p], &states[p + 1..]);
                    (all(before, Empty) && all(after, Full))
                        || (all(before, Full) && all(after, Empty))
                }
            }
            (Template::QRootDoublySplit, ShapeKind::Q) => {
                view.at_root && no_partials && census.full > 0 && {
                    let first = states.iter().position(|&s| s == Full).unwrap_or(0);
                    let last = states.iter().rposition(|&s| s == Full).unwrap_or(0);
                    all(&states[first..=last], Full)
                }
            }
            (Template::QRootPartialLeft, ShapeKind::Q) => {
                view.at_root && one_partial && {
                    let p = view.partial_positions()[0];
                    all(&states[..p], Empty) && two_runs(&states[p + 1..], Full, Empty)
                }
            }
            (Template::QRootPartialRight, ShapeKind::Q) => {
                view.at_root && one_partial && {
                    let p = view.partial_positions()[0];
                    two_runs(&states[..p], Empty, Full) && all(&states[p + 1..], Empty)
                }
            }
            (Template::QRootDoublePartial, ShapeKind::Q) => {
                view.at_root && two_partials && {
                    let positions = view.partial_positions();
                    let (left, right) = (positions[0], positions[1]);
                    all(&states[..left], Empty)
                        && all(&states[left + 1..right], Full)
                        && all(&states[right + 1..], Empty)
                }
            }

            _ => false,
        }
    }

    /// Rewrite the node and return its resulting state.
    ///
    /// Only called after [`Template::matches`] held for the same view.
    pub(crate) fn apply<T: Clone>(self, ctx: &mut ReductionContext<'_, T>, view: &NodeView) -> NodeState {
        match self {
            Template::Leaf | Template::PFull | Template::QFull => Full,
            Template::PEmpty | Template::QEmpty => Empty,
            Template::PRootSplit => p_templates::root_split(ctx, view),
            Template::PSplit => p_templates::split(ctx, view),
            Template::PRootSinglePartial => p_templates::root_single_partial(ctx, view),
            Template::PSinglePartial | Template::PSinglePartialWithFull => {
                p_templates::single_partial(ctx, view)
            }
            Template::PRootDoublePartial => p_templates::root_double_partial(ctx, view),
            Template::QSplit => Partial,
            Template::QSinglePartial => q_templates::single_partial(ctx, view),
            Template::QRootDoublySplit => DoublyPartial,
            Template::QRootPartialLeft => q_templates::root_fold(ctx, view, |_| true),
            Template::QRootPartialRight => q_templates::root_fold(ctx, view, |_| false),
            Template::QRootDoublePartial => {
                q_templates::root_fold(ctx, view, |nth| nth == 0)
            }
        }
    }
}
