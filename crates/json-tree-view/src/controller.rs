//! The expand/collapse state machine.
//!
//! An interactive toggle happens in two steps: the caret flips immediately
//! and the bulk reveal/hide/materialization work is deferred into the
//! owning tree's queue, giving the host a chance to repaint between the
//! two. Each node carries a single-flight epoch; a continuation whose
//! captured epoch is no longer current is dropped, so a second click
//! during the window cannot interleave with a stale one.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::binder;
use crate::node::{Node, NodeRef, NodeShape};
use crate::pointer;
use crate::view::View;

/// A toggle continuation waiting for the host to pump the queue.
#[derive(Debug)]
pub(crate) struct Deferred {
    node: Weak<RefCell<Node>>,
    epoch: u64,
    expanding: bool,
}

// ── Interactive toggling ──────────────────────────────────────────────────

/// First half of an interactive toggle: flip the node's expanded state and
/// caret, then schedule the continuation.
pub(crate) fn toggle<V: View>(
    view: &mut V,
    queue: &mut VecDeque<Deferred>,
    node: &NodeRef,
) {
    let (expanding, epoch) = {
        let mut n = node.borrow_mut();
        if !n.state.has_children {
            return;
        }
        n.state.expanded = !n.state.expanded;
        n.state.busy = true;
        n.toggle_epoch += 1;
        (n.state.expanded, n.toggle_epoch)
    };
    binder::refresh_line(view, node);
    queue.push_back(Deferred {
        node: Rc::downgrade(node),
        epoch,
        expanding,
    });
}

/// Second half: runs when the host pumps the queue.
pub(crate) fn run_deferred<V: View>(view: &mut V, deferred: Deferred) {
    let Some(node) = deferred.node.upgrade() else {
        return;
    };
    {
        let n = node.borrow();
        if n.toggle_epoch != deferred.epoch {
            log::debug!("dropping stale toggle for {}", n.key);
            return;
        }
    }
    node.borrow_mut().state.busy = false;
    if deferred.expanding {
        expand_step(view, &node);
    } else {
        hide_descendants(view, &node);
    }
    binder::refresh_line(view, &node);
}

fn expand_step<V: View>(view: &mut V, node: &NodeRef) {
    let first_child_pending = {
        let n = node.borrow();
        n.children
            .first()
            .map(|child| child.borrow().pending)
            .unwrap_or(false)
    };
    if first_child_pending {
        // One-time materialization of a deferred subtree. A reference is
        // inlined first so the walk creates elements for real data.
        if matches!(node.borrow().shape, NodeShape::Reference(_)) {
            if let Err(err) = pointer::inline(node) {
                log::warn!("cannot expand reference node: {}", err);
                node.borrow_mut().state.expanded = false;
                return;
            }
        }
        binder::correct_reference_counts(view, node);
        binder::materialize_subtree(view, node);
        expand_recursive(view, node);
    } else {
        reveal_children(view, node);
    }
}

/// Show direct children, and below them only the subtrees of children
/// still marked expanded from before.
fn reveal_children<V: View>(view: &mut V, node: &NodeRef) {
    let children: Vec<NodeRef> = node.borrow().children.clone();
    for child in &children {
        let (line, expanded) = {
            let c = child.borrow();
            (c.line, c.state.expanded)
        };
        let Some(line) = line else { continue };
        view.set_hidden(line, false);
        if expanded {
            reveal_children(view, child);
        }
    }
}

/// Hide the entire descendant subtree. The descendants' own expanded flags
/// are untouched, so re-expanding the node does not force previously
/// collapsed grandchildren open.
fn hide_descendants<V: View>(view: &mut V, node: &NodeRef) {
    let children: Vec<NodeRef> = node.borrow().children.clone();
    for child in &children {
        binder::set_line_hidden(view, child, true);
        hide_descendants(view, child);
    }
}

// ── Programmatic expand/collapse ──────────────────────────────────────────

/// Unconditionally expand `node` and every materialized descendant,
/// revealing their lines and pointing their carets down.
///
/// Not-yet-inlined reference nodes stay collapsed: their content does not
/// exist yet, and their next interactive toggle performs the inline.
pub(crate) fn expand_recursive<V: View>(view: &mut V, node: &NodeRef) {
    {
        let n = node.borrow();
        if n.children.is_empty() || matches!(n.shape, NodeShape::Reference(_)) {
            return;
        }
    }
    node.borrow_mut().state.expanded = true;
    binder::refresh_line(view, node);
    let children: Vec<NodeRef> = node.borrow().children.clone();
    for child in &children {
        binder::set_line_hidden(view, child, false);
        expand_recursive(view, child);
    }
}

/// Unconditionally collapse `node` and its whole subtree, hiding every
/// descendant line. The node's own line stays as it was.
pub(crate) fn collapse_recursive<V: View>(view: &mut V, node: &NodeRef) {
    collapse_inner(view, node, true);
}

fn collapse_inner<V: View>(view: &mut V, node: &NodeRef, is_root: bool) {
    let has_children = !node.borrow().children.is_empty();
    if has_children {
        node.borrow_mut().state.expanded = false;
        binder::refresh_line(view, node);
    }
    if !is_root {
        binder::set_line_hidden(view, node, true);
    }
    let children: Vec<NodeRef> = node.borrow().children.clone();
    for child in &children {
        collapse_inner(view, child, false);
    }
}
