//! Line formatting: how a node's key/value/size become one row of text.

use crate::node::{Node, NodeValue};
use crate::types::JsonType;

pub(crate) const CARET_RIGHT: char = '\u{25b8}'; // ▸
pub(crate) const CARET_DOWN: char = '\u{25be}'; // ▾
const BUSY_MARKER: char = '\u{00b7}'; // ·

pub(crate) fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Render a node's single-line representation from its current state.
pub(crate) fn render_line(node: &Node) -> String {
    let indent = indent(node.depth);
    if node.state.has_children {
        let caret = if node.state.expanded {
            CARET_DOWN
        } else {
            CARET_RIGHT
        };
        let marker = if node.state.busy { BUSY_MARKER } else { ' ' };
        format!(
            "{}{}{}{} {}",
            indent,
            caret,
            marker,
            node.key,
            size_label(node.kind, node.size)
        )
    } else {
        format!("{}{}: {}", indent, node.key, value_text(node))
    }
}

/// `[n]` for arrays, `{n}` for objects (reference nodes classify as
/// objects before they are inlined).
fn size_label(kind: JsonType, size: usize) -> String {
    match kind {
        JsonType::Array => format!("[{}]", size),
        _ => format!("{{{}}}", size),
    }
}

fn value_text(node: &Node) -> String {
    match &node.value {
        Some(NodeValue::Scalar(value)) => value.to_string(),
        Some(NodeValue::EmptyObject) => "{}".to_string(),
        Some(NodeValue::EmptyArray) => "[]".to_string(),
        None => String::new(),
    }
}
