//! Reference resolution for `$ref` pointer nodes.
//!
//! Supports exactly one pointer shape: `#/<segment>/<segment>`, resolved
//! against the document root. Segments use RFC 6901 component escaping
//! (`~1` for `/`, `~0` for `~`). Pointers of any other depth are rejected
//! as unresolved rather than partially followed.

use std::rc::Rc;

use serde_json::Value;

use crate::builder::{self, BuildMode};
use crate::error::TreeError;
use crate::node::{NodeRef, NodeShape};

/// Unescape a pointer segment.
///
/// # Example
///
/// ```
/// use json_tree_view::unescape_segment;
///
/// assert_eq!(unescape_segment("a~1b"), "a/b");
/// assert_eq!(unescape_segment("a~0b"), "a~b");
/// assert_eq!(unescape_segment("plain"), "plain");
/// ```
pub fn unescape_segment(segment: &str) -> String {
    if !segment.contains('~') {
        return segment.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    segment.replace("~1", "/").replace("~0", "~")
}

/// Parse a pointer of the fixed two-segment shape `#/<seg>/<seg>`.
///
/// # Errors
///
/// `TreeError::UnresolvedReference` when the prefix or depth is wrong.
pub fn parse_ref_pointer(pointer: &str) -> Result<(String, String), TreeError> {
    let unresolved = || TreeError::UnresolvedReference {
        pointer: pointer.to_string(),
    };
    let rest = pointer.strip_prefix("#/").ok_or_else(unresolved)?;
    let mut segments = rest.split('/');
    let first = segments.next().ok_or_else(unresolved)?;
    let second = segments.next().ok_or_else(unresolved)?;
    if segments.next().is_some() || first.is_empty() || second.is_empty() {
        return Err(unresolved());
    }
    Ok((unescape_segment(first), unescape_segment(second)))
}

/// Look up the pointer's target: `doc[segment1][segment2]`.
///
/// Object steps go by key, array steps by decimal index.
pub fn resolve<'a>(doc: &'a Value, pointer: &str) -> Result<&'a Value, TreeError> {
    let (first, second) = parse_ref_pointer(pointer)?;
    step(doc, &first)
        .and_then(|v| step(v, &second))
        .ok_or_else(|| TreeError::UnresolvedReference {
            pointer: pointer.to_string(),
        })
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Number of own members of a container, without materializing anything.
///
/// Scalars count 0, matching the child count an inline of that target
/// would produce.
pub fn count_elements(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}

/// Replace a reference node's placeholder child with the pointed-to
/// subtree's nodes.
///
/// The resolved value is rebuilt in immediate mode as if it were the
/// node's own data, so nothing newly created is pending. Afterwards the
/// node is an ordinary container; the indirection is invisible from that
/// point on. Nodes that are not references are left untouched.
pub fn inline(node: &NodeRef) -> Result<(), TreeError> {
    let (pointer, doc) = {
        let n = node.borrow();
        match &n.shape {
            NodeShape::Reference(pointer) => (pointer.clone(), Rc::clone(&n.doc)),
            _ => return Ok(()),
        }
    };
    let target = resolve(&doc, &pointer)?.clone();
    {
        let mut n = node.borrow_mut();
        n.children.retain(|child| !child.borrow().is_placeholder());
        n.shape = NodeShape::Plain;
    }
    builder::populate(node, &target, BuildMode::Immediate);
    Ok(())
}
