//! Headless text implementation of the view seam.
//!
//! Element records live in an arena indexed by id. Besides backing the
//! `json-tree` binary, the counters make it a drop-in instrumentation
//! double for resource-release tests.

use crate::view::{ElementId, Event, SubscriptionId, View};

/// Lifetime counters over every primitive the engine has invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub created: usize,
    pub subscribed: usize,
    pub unsubscribed: usize,
    pub detached: usize,
}

#[derive(Debug)]
struct TextElement {
    tag: String,
    text: String,
    hidden: bool,
    detached: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

#[derive(Debug, Default)]
pub struct TextView {
    elements: Vec<TextElement>,
    subscriptions: Vec<bool>,
    counters: Counters,
}

impl TextView {
    pub fn new() -> TextView {
        TextView::default()
    }

    /// Create a root element for a tree to render into.
    pub fn mount(&mut self) -> ElementId {
        self.create_element("mount")
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Subscriptions taken out and not yet released.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.iter().filter(|active| **active).count()
    }

    pub fn tag_of(&self, el: ElementId) -> &str {
        &self.element(el).tag
    }

    pub fn text_of(&self, el: ElementId) -> &str {
        &self.element(el).text
    }

    pub fn is_hidden(&self, el: ElementId) -> bool {
        self.element(el).hidden
    }

    pub fn is_detached(&self, el: ElementId) -> bool {
        self.element(el).detached
    }

    /// Render the visible lines under `root` in document order.
    pub fn render(&self, root: ElementId) -> String {
        let mut out = String::new();
        self.collect(root, &mut out);
        out
    }

    fn collect(&self, el: ElementId, out: &mut String) {
        for &child in &self.element(el).children {
            let record = self.element(child);
            if record.hidden || record.detached {
                continue;
            }
            if !record.text.is_empty() {
                out.push_str(&record.text);
                out.push('\n');
            }
            self.collect(child, out);
        }
    }

    fn element(&self, el: ElementId) -> &TextElement {
        &self.elements[el.0 as usize]
    }

    fn element_mut(&mut self, el: ElementId) -> &mut TextElement {
        &mut self.elements[el.0 as usize]
    }
}

impl View for TextView {
    fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len() as u64);
        self.elements.push(TextElement {
            tag: tag.to_string(),
            text: String::new(),
            hidden: false,
            detached: false,
            parent: None,
            children: Vec::new(),
        });
        self.counters.created += 1;
        id
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).children.push(child);
    }

    fn insert_after(&mut self, anchor: ElementId, el: ElementId) {
        let Some(parent) = self.element(anchor).parent else {
            return;
        };
        self.element_mut(el).parent = Some(parent);
        let position = self
            .element(parent)
            .children
            .iter()
            .position(|&c| c == anchor);
        match position {
            Some(i) => self.element_mut(parent).children.insert(i + 1, el),
            None => self.element_mut(parent).children.push(el),
        }
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        self.element_mut(el).text = text.to_string();
    }

    fn set_hidden(&mut self, el: ElementId, hidden: bool) {
        self.element_mut(el).hidden = hidden;
    }

    fn subscribe(&mut self, _el: ElementId, _event: Event) -> SubscriptionId {
        let id = SubscriptionId(self.subscriptions.len() as u64);
        self.subscriptions.push(true);
        self.counters.subscribed += 1;
        id
    }

    fn unsubscribe(&mut self, sub: SubscriptionId) {
        if let Some(active) = self.subscriptions.get_mut(sub.0 as usize) {
            if *active {
                *active = false;
                self.counters.unsubscribed += 1;
            }
        }
    }

    fn detach(&mut self, el: ElementId) {
        let parent = self.element_mut(el).parent.take();
        self.element_mut(el).detached = true;
        if let Some(parent) = parent {
            self.element_mut(parent).children.retain(|&c| c != el);
        }
        self.counters.detached += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_after_keeps_document_order() {
        let mut view = TextView::new();
        let mount = view.mount();
        let a = view.create_element("line");
        let c = view.create_element("line");
        let b = view.create_element("line");
        view.append_child(mount, a);
        view.append_child(mount, c);
        view.insert_after(a, b);

        view.set_text(a, "a");
        view.set_text(b, "b");
        view.set_text(c, "c");
        assert_eq!(view.render(mount), "a\nb\nc\n");
        assert_eq!(view.tag_of(a), "line");
    }

    #[test]
    fn test_hidden_lines_are_not_rendered() {
        let mut view = TextView::new();
        let mount = view.mount();
        let a = view.create_element("line");
        view.append_child(mount, a);
        view.set_text(a, "a");
        view.set_hidden(a, true);
        assert_eq!(view.render(mount), "");
        view.set_hidden(a, false);
        assert_eq!(view.render(mount), "a\n");
    }

    #[test]
    fn test_detach_removes_from_parent() {
        let mut view = TextView::new();
        let mount = view.mount();
        let a = view.create_element("line");
        view.append_child(mount, a);
        view.set_text(a, "a");
        view.detach(a);
        assert_eq!(view.render(mount), "");
        assert!(view.is_detached(a));
    }

    #[test]
    fn test_subscription_counters() {
        let mut view = TextView::new();
        let el = view.create_element("line");
        let sub = view.subscribe(el, Event::Click);
        assert_eq!(view.active_subscriptions(), 1);
        view.unsubscribe(sub);
        view.unsubscribe(sub); // released handles are not double-counted
        assert_eq!(view.active_subscriptions(), 0);
        assert_eq!(view.counters().unsubscribed, 1);
    }
}
