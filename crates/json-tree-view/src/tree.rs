//! The rendered tree: public entry points tying the builder, binder, and
//! controller together over one view surface.

use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;

use crate::binder;
use crate::builder;
use crate::controller::{self, Deferred};
use crate::error::TreeError;
use crate::node::NodeRef;
use crate::view::{ElementId, Event, View};
use crate::walk::walk;

/// A JSON document rendered as an expandable tree into a view surface.
///
/// All mutation is single-threaded and cooperative: interactive toggles
/// enqueue their bulk work, and the host drains the queue with
/// [`JsonTree::pump`] whenever its event loop is idle.
pub struct JsonTree<V: View> {
    root: NodeRef,
    view: V,
    mount: ElementId,
    queue: VecDeque<Deferred>,
}

impl<V: View> JsonTree<V> {
    /// Build the node tree for `doc` and materialize the eager horizon
    /// (the root line plus its direct children, the latter hidden until
    /// the root is expanded) into `mount`.
    pub fn render_into(doc: Value, view: V, mount: ElementId) -> JsonTree<V> {
        let root = builder::build(doc);
        let mut tree = JsonTree {
            root,
            view,
            mount,
            queue: VecDeque::new(),
        };
        tree.materialize_horizon();
        tree
    }

    /// Like [`JsonTree::render_into`], from JSON text.
    ///
    /// # Errors
    ///
    /// `TreeError::Parse` when the text is not valid JSON.
    pub fn render_str_into(text: &str, view: V, mount: ElementId) -> Result<JsonTree<V>, TreeError> {
        Ok(JsonTree::render_into(serde_json::from_str(text)?, view, mount))
    }

    fn materialize_horizon(&mut self) {
        let root_line = binder::materialize(&mut self.view, &self.root);
        self.view.append_child(self.mount, root_line);
        self.view.set_hidden(root_line, false);

        let mut anchor = root_line;
        let children: Vec<NodeRef> = self.root.borrow().children.clone();
        for child in &children {
            if child.borrow().is_placeholder() {
                continue;
            }
            let line = binder::materialize(&mut self.view, child);
            self.view.insert_after(anchor, line);
            anchor = line;
        }

        // Deferred reference nodes still display truthful member counts.
        binder::correct_reference_counts(&mut self.view, &self.root);
    }

    pub fn root(&self) -> NodeRef {
        Rc::clone(&self.root)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Deliver a view event to the node owning the element it landed on.
    ///
    /// A click on a container's line flips its caret immediately and
    /// schedules the reveal/hide/materialization work; clicks elsewhere
    /// are ignored.
    pub fn on_event(&mut self, el: ElementId, event: Event) {
        match event {
            Event::Click => {
                if let Some(node) = self.node_for_element(el) {
                    controller::toggle(&mut self.view, &mut self.queue, &node);
                }
            }
        }
    }

    /// Run every deferred toggle continuation queued so far.
    ///
    /// Continuations whose node was toggled again in the interim are
    /// dropped as stale; the tree converges to the last toggle.
    pub fn pump(&mut self) {
        while let Some(deferred) = self.queue.pop_front() {
            controller::run_deferred(&mut self.view, deferred);
        }
    }

    /// Recursively expand an already-materialized subtree.
    pub fn expand(&mut self, node: &NodeRef) {
        controller::expand_recursive(&mut self.view, node);
    }

    /// Recursively collapse a subtree.
    pub fn collapse(&mut self, node: &NodeRef) {
        controller::collapse_recursive(&mut self.view, node);
    }

    /// Release every click registration, then detach every line from the
    /// mount. Consumes the tree and hands the view back.
    pub fn destroy(mut self) -> V {
        let root = Rc::clone(&self.root);
        walk(&root, &mut |node| binder::dispose(&mut self.view, node));
        walk(&root, &mut |node| {
            let line = node.borrow().line;
            if let Some(line) = line {
                self.view.detach(line);
            }
        });
        self.view
    }

    fn node_for_element(&self, el: ElementId) -> Option<NodeRef> {
        let mut found = None;
        walk(&self.root, &mut |node| {
            if found.is_none() && node.borrow().line == Some(el) {
                found = Some(Rc::clone(node));
            }
        });
        found
    }
}
