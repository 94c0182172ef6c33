//! Eager-horizon rendering and the basic reveal flow.

use json_tree_view::{ElementId, Event, JsonTree, NodeRef, TextView};
use serde_json::{json, Value};

fn setup(doc: Value) -> (JsonTree<TextView>, ElementId) {
    let mut view = TextView::new();
    let mount = view.mount();
    (JsonTree::render_into(doc, view, mount), mount)
}

fn click(tree: &mut JsonTree<TextView>, node: &NodeRef) {
    let line = node.borrow().line.expect("node is materialized");
    tree.on_event(line, Event::Click);
    tree.pump();
}

#[test]
fn initial_render_shows_only_the_root_line() {
    let (tree, mount) = setup(json!({"a": 1, "b": {"c": 2}}));
    assert_eq!(tree.view().render(mount), "▸ object {2}\n");
}

#[test]
fn root_container_counts_its_children() {
    let (tree, _) = setup(json!({"a": 1, "b": {"c": 2}}));
    let root = tree.root();
    assert_eq!(root.borrow().children.len(), 2);

    let b = root.borrow().children[1].clone();
    assert!(b.borrow().is_container());
    assert_eq!(b.borrow().size, 1);
}

#[test]
fn expanding_the_root_reveals_direct_children() {
    let (mut tree, mount) = setup(json!({"a": 1, "b": {"c": 2}}));
    let root = tree.root();
    click(&mut tree, &root);
    assert_eq!(
        tree.view().render(mount),
        "▾ object {2}\n  a: 1\n  ▸ b {1}\n"
    );
}

#[test]
fn array_document_renders_indexed_lines() {
    let (mut tree, mount) = setup(json!([10, 20]));
    let root = tree.root();
    click(&mut tree, &root);
    assert_eq!(tree.view().render(mount), "▾ array [2]\n  0: 10\n  1: 20\n");
}

#[test]
fn first_expansion_of_a_deferred_subtree_opens_it_fully() {
    let (mut tree, mount) = setup(json!({"a": {"b": {"c": 1}}}));
    let root = tree.root();
    click(&mut tree, &root);
    let a = root.borrow().children[0].clone();
    click(&mut tree, &a);
    assert_eq!(
        tree.view().render(mount),
        "▾ object {1}\n  ▾ a {1}\n    ▾ b {1}\n      c: 1\n"
    );
}

#[test]
fn empty_object_renders_as_leaf_without_affordance() {
    let (mut tree, mount) = setup(json!({"b": {"c": {}}}));
    let root = tree.root();
    click(&mut tree, &root);
    let b = root.borrow().children[0].clone();
    click(&mut tree, &b);

    assert!(tree.view().render(mount).contains("    c: {}"));
    let c = b.borrow().children[0].clone();
    assert!(c.borrow().is_leaf());
    assert!(c.borrow().subscription.is_none());
}

#[test]
fn scalar_document_is_a_single_leaf_line() {
    let (tree, mount) = setup(json!(42));
    assert_eq!(tree.view().render(mount), "number: 42\n");
}

#[test]
fn clicking_a_leaf_line_is_ignored() {
    let (mut tree, mount) = setup(json!({"a": 1}));
    let root = tree.root();
    click(&mut tree, &root);
    let a = root.borrow().children[0].clone();
    click(&mut tree, &a);
    assert_eq!(tree.view().render(mount), "▾ object {1}\n  a: 1\n");
}

#[test]
fn render_str_into_rejects_invalid_text() {
    let mut view = TextView::new();
    let mount = view.mount();
    assert!(JsonTree::render_str_into("{oops", view, mount).is_err());
}
