//! Allocates and disposes the visual element for a node and keeps its line
//! in sync with node state.
//!
//! This is the only module that talks to the view seam; the controller
//! drives expansion through the helpers here.

use std::rc::Rc;

use crate::node::{NodeRef, NodeShape};
use crate::pointer;
use crate::template;
use crate::view::{ElementId, Event, View};
use crate::walk::walk;

/// Create the single-line representation for a node.
///
/// Containers take out a click subscription on the line; leaves never do.
/// The line is created hidden; callers reveal it when appropriate.
pub(crate) fn materialize<V: View>(view: &mut V, node: &NodeRef) -> ElementId {
    let (text, has_children) = {
        let n = node.borrow();
        (template::render_line(&n), n.state.has_children)
    };
    let line = view.create_element("line");
    view.set_text(line, &text);
    view.set_hidden(line, true);
    let subscription = if has_children {
        Some(view.subscribe(line, Event::Click))
    } else {
        None
    };
    let mut n = node.borrow_mut();
    n.line = Some(line);
    n.subscription = subscription;
    line
}

/// Re-render a node's line text from its current state. No-op before
/// materialization.
pub(crate) fn refresh_line<V: View>(view: &mut V, node: &NodeRef) {
    let (line, text) = {
        let n = node.borrow();
        (n.line, template::render_line(&n))
    };
    if let Some(line) = line {
        view.set_text(line, &text);
    }
}

pub(crate) fn set_line_hidden<V: View>(view: &mut V, node: &NodeRef, hidden: bool) {
    let line = node.borrow().line;
    if let Some(line) = line {
        view.set_hidden(line, hidden);
    }
}

/// Release the node's click registration, if any. Does not recurse;
/// callers walk the tree themselves.
pub(crate) fn dispose<V: View>(view: &mut V, node: &NodeRef) {
    let subscription = node.borrow_mut().subscription.take();
    if let Some(subscription) = subscription {
        view.unsubscribe(subscription);
    }
}

/// Create lines for every not-yet-materialized descendant of `node`,
/// clearing pending flags along the way.
///
/// Lines are inserted along the pre-order anchor chain so the flat sibling
/// order under the mount matches document order. Reference placeholders
/// are skipped; they never reach the view.
pub(crate) fn materialize_subtree<V: View>(view: &mut V, node: &NodeRef) {
    let anchor = node.borrow().line;
    let Some(mut anchor) = anchor else { return };
    materialize_children(view, node, &mut anchor);
}

fn materialize_children<V: View>(view: &mut V, node: &NodeRef, anchor: &mut ElementId) {
    let children: Vec<NodeRef> = node.borrow().children.clone();
    for child in &children {
        if child.borrow().is_placeholder() {
            continue;
        }
        let existing = child.borrow().line;
        let line = match existing {
            Some(line) => line,
            None => {
                let line = materialize(view, child);
                view.insert_after(*anchor, line);
                line
            }
        };
        child.borrow_mut().pending = false;
        *anchor = line;
        materialize_children(view, child, anchor);
    }
}

/// Patch the displayed member count of every not-yet-inlined reference
/// node under `root` from its placeholder count to the resolved target's
/// element count, without materializing the target.
///
/// Unresolvable pointers keep the placeholder count; the failure is logged
/// and surfaces again if the user tries to expand the node.
pub(crate) fn correct_reference_counts<V: View>(view: &mut V, root: &NodeRef) {
    walk(root, &mut |node| {
        let pointer = match &node.borrow().shape {
            NodeShape::Reference(pointer) => pointer.clone(),
            _ => return,
        };
        let doc = Rc::clone(&node.borrow().doc);
        match pointer::resolve(&doc, &pointer) {
            Ok(target) => {
                node.borrow_mut().size = pointer::count_elements(target);
                refresh_line(view, node);
            }
            Err(err) => {
                log::warn!("keeping placeholder count for reference: {}", err);
            }
        }
    });
}
