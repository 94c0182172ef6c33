//! The view-primitive seam.
//!
//! The engine renders node state one-way into an abstract surface through
//! the [`View`] trait and never reads display state back out of it. Handles
//! are opaque arena-style ids; events travel back through
//! [`JsonTree::on_event`](crate::JsonTree::on_event), keyed by the element
//! they landed on, so no callbacks cross this seam.

/// Opaque handle to a view element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Opaque handle to an event subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Events a view surface can deliver back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Interaction with a container line's caret affordance.
    Click,
}

/// Element creation, ordering, visibility, and event subscription
/// primitives provided by the host surface.
pub trait View {
    /// Create a detached element of the given tag.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Place `el` immediately after `anchor` under the same parent.
    fn insert_after(&mut self, anchor: ElementId, el: ElementId);

    /// Replace the element's text content.
    fn set_text(&mut self, el: ElementId, text: &str);

    /// Toggle the element's hidden state.
    fn set_hidden(&mut self, el: ElementId, hidden: bool);

    /// Register interest in an event on an element.
    fn subscribe(&mut self, el: ElementId, event: Event) -> SubscriptionId;

    /// Release a subscription taken out with [`View::subscribe`].
    fn unsubscribe(&mut self, sub: SubscriptionId);

    /// Remove an element from its parent.
    fn detach(&mut self, el: ElementId);
}
