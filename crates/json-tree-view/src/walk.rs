//! Depth-first traversal shared by materialization, disposal, and the
//! recursive expand/collapse operations.

use crate::node::NodeRef;

/// Visit `node` and then every descendant, pre-order, children in
/// insertion order.
///
/// The child list is snapshotted before descending, so a visitor may
/// mutate the node it is handed. A fresh walk can be started on any
/// subtree at any time; this is not a resumable iterator.
pub fn walk(node: &NodeRef, visit: &mut dyn FnMut(&NodeRef)) {
    visit(node);
    let children: Vec<NodeRef> = node.borrow().children.clone();
    for child in &children {
        walk(child, visit);
    }
}
