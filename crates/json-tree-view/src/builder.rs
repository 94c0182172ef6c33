//! Turns a parsed JSON document into a node tree.
//!
//! The whole node tree is created up front; what is deferred is the view.
//! Nodes deeper than the eager horizon (root plus its direct children) are
//! flagged pending so their elements are only created when an ancestor is
//! first expanded.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::error::TreeError;
use crate::node::{Node, NodeRef, NodeShape, NodeValue};
use crate::types::classify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildMode {
    /// Initial build: nodes below the eager horizon are pending.
    Deferred,
    /// Subtree rebuild at expansion time: nothing new is pending.
    Immediate,
}

/// Build a node tree for an already-parsed document.
///
/// The root node's key is the document's type tag and its depth is 0.
pub fn build(doc: Value) -> NodeRef {
    let doc = Rc::new(doc);
    let kind = classify(&doc);
    let root = Rc::new(RefCell::new(Node::new(
        kind.to_string(),
        kind,
        0,
        Rc::clone(&doc),
    )));
    populate(&root, &doc, BuildMode::Deferred);
    root
}

/// Build a node tree from JSON text.
pub fn build_str(text: &str) -> Result<NodeRef, TreeError> {
    Ok(build(serde_json::from_str(text)?))
}

/// Fill in a node's value, shape, and children from its data.
///
/// Children are appended, so a reference node that had its placeholder
/// spliced out can be repopulated in place from the resolved value.
pub(crate) fn populate(node: &NodeRef, value: &Value, mode: BuildMode) {
    match value {
        Value::Object(map) if map.is_empty() => {
            node.borrow_mut().value = Some(NodeValue::EmptyObject);
        }
        Value::Object(map) => {
            if let Some(pointer) = reference_pointer(map) {
                let placeholder =
                    build_child(node, "$ref", &Value::String(pointer.clone()), mode);
                {
                    let mut p = placeholder.borrow_mut();
                    p.shape = NodeShape::RefPlaceholder;
                    // A placeholder's subtree is never materialized until
                    // the reference is inlined, so it stays pending even on
                    // immediate rebuilds. Depth <= 1 keeps the eager-horizon
                    // rule: the root's direct children are never pending.
                    p.pending = p.depth > 1;
                }
                node.borrow_mut().shape = NodeShape::Reference(pointer);
                node.borrow_mut().children.push(placeholder);
            } else {
                for (key, child_value) in map {
                    let child = build_child(node, key, child_value, mode);
                    node.borrow_mut().children.push(child);
                }
            }
        }
        Value::Array(items) if items.is_empty() => {
            node.borrow_mut().value = Some(NodeValue::EmptyArray);
        }
        Value::Array(items) => {
            for (index, child_value) in items.iter().enumerate() {
                let child = build_child(node, &index.to_string(), child_value, mode);
                node.borrow_mut().children.push(child);
            }
        }
        scalar => {
            node.borrow_mut().value = Some(NodeValue::Scalar(scalar.clone()));
        }
    }

    let mut n = node.borrow_mut();
    n.size = n.children.len();
    n.state.has_children = !n.children.is_empty();
}

fn build_child(parent: &NodeRef, key: &str, value: &Value, mode: BuildMode) -> NodeRef {
    let (depth, doc) = {
        let p = parent.borrow();
        (p.depth + 1, Rc::clone(&p.doc))
    };
    let child = Rc::new(RefCell::new(Node::new(
        key.to_string(),
        classify(value),
        depth,
        doc,
    )));
    {
        let mut c = child.borrow_mut();
        c.parent = Rc::downgrade(parent);
        c.pending = depth > 1 && mode == BuildMode::Deferred;
    }
    populate(&child, value, mode);
    child
}

/// An object whose first entry is `("$ref", <string>)` is a reference node.
fn reference_pointer(map: &Map<String, Value>) -> Option<String> {
    match map.iter().next() {
        Some((key, Value::String(pointer))) if key == "$ref" => Some(pointer.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_key_is_type_tag_and_depth_zero() {
        let root = build(json!({"a": 1}));
        assert_eq!(root.borrow().key, "object");
        assert_eq!(root.borrow().depth, 0);

        let root = build(json!([1, 2]));
        assert_eq!(root.borrow().key, "array");
    }

    #[test]
    fn test_scalar_root_is_a_leaf() {
        let root = build(json!(42));
        let n = root.borrow();
        assert_eq!(n.key, "number");
        assert!(n.is_leaf());
        assert_eq!(n.value, Some(NodeValue::Scalar(json!(42))));
    }

    #[test]
    fn test_child_depth_increments() {
        let root = build(json!({"a": {"b": {"c": 1}}}));
        let a = root.borrow().children[0].clone();
        let b = a.borrow().children[0].clone();
        let c = b.borrow().children[0].clone();
        assert_eq!(a.borrow().depth, 1);
        assert_eq!(b.borrow().depth, 2);
        assert_eq!(c.borrow().depth, 3);
    }

    #[test]
    fn test_children_preserve_source_order() {
        let root = build(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<String> = root
            .borrow()
            .children
            .iter()
            .map(|c| c.borrow().key.clone())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_array_children_are_indexed() {
        let root = build(json!(["x", "y"]));
        let keys: Vec<String> = root
            .borrow()
            .children
            .iter()
            .map(|c| c.borrow().key.clone())
            .collect();
        assert_eq!(keys, vec!["0", "1"]);
    }

    #[test]
    fn test_eager_horizon_pending_flags() {
        let root = build(json!({"a": {"b": {"c": 1}}}));
        let a = root.borrow().children[0].clone();
        let b = a.borrow().children[0].clone();
        let c = b.borrow().children[0].clone();
        assert!(!root.borrow().pending);
        assert!(!a.borrow().pending);
        assert!(b.borrow().pending);
        assert!(c.borrow().pending);
    }

    #[test]
    fn test_empty_object_is_sentinel_leaf_at_any_depth() {
        let root = build(json!({"a": {}, "b": {"c": {}}}));
        let a = root.borrow().children[0].clone();
        assert!(a.borrow().is_leaf());
        assert_eq!(a.borrow().value, Some(NodeValue::EmptyObject));

        let b = root.borrow().children[1].clone();
        let c = b.borrow().children[0].clone();
        assert!(c.borrow().is_leaf());
        assert_eq!(c.borrow().value, Some(NodeValue::EmptyObject));
    }

    #[test]
    fn test_empty_array_is_sentinel_leaf() {
        let root = build(json!({"a": []}));
        let a = root.borrow().children[0].clone();
        assert!(a.borrow().is_leaf());
        assert_eq!(a.borrow().value, Some(NodeValue::EmptyArray));
    }

    #[test]
    fn test_reference_shape_decided_at_build_time() {
        let root = build(json!({"x": {"$ref": "#/defs/Y"}, "defs": {"Y": {"p": 1}}}));
        let x = root.borrow().children[0].clone();
        assert_eq!(
            x.borrow().shape,
            NodeShape::Reference("#/defs/Y".to_string())
        );
        assert_eq!(x.borrow().children.len(), 1);

        let placeholder = x.borrow().children[0].clone();
        assert_eq!(placeholder.borrow().key, "$ref");
        assert!(placeholder.borrow().is_placeholder());
        assert!(placeholder.borrow().pending);
    }

    #[test]
    fn test_size_matches_children() {
        let root = build(json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(root.borrow().size, 3);
        assert!(root.borrow().state.has_children);
    }

    #[test]
    fn test_build_str_rejects_invalid_json() {
        assert!(build_str("{not json").is_err());
        assert!(build_str(r#"{"ok": true}"#).is_ok());
    }

    #[test]
    fn test_document_root_is_shared() {
        let root = build(json!({"a": {"b": 1}}));
        let a = root.borrow().children[0].clone();
        let b = a.borrow().children[0].clone();
        assert!(Rc::ptr_eq(&root.borrow().doc, &b.borrow().doc));
    }
}
