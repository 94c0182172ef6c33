//! The tree entity: one [`Node`] per JSON value encountered.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::types::JsonType;
use crate::view::{ElementId, SubscriptionId};

/// Shared handle to a node. The tree is single-threaded; interior
/// mutability goes through `RefCell`, parents are held weakly.
pub type NodeRef = Rc<RefCell<Node>>;

/// The rendered value carried by a leaf line.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// A raw scalar from the document.
    Scalar(Value),
    /// Sentinel for an object with no members; renders as a bare `{}` leaf.
    EmptyObject,
    /// Sentinel for an array with no elements; renders as a bare `[]` leaf.
    EmptyArray,
}

/// Structural shape of a node, decided once at build time.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeShape {
    /// Ordinary container or scalar.
    Plain,
    /// Container whose data is a `$ref` pointer, carrying the pointer text.
    /// Flips to `Plain` when the reference is inlined.
    Reference(String),
    /// The synthetic child holding a reference's pointer string. Spliced
    /// out at inline time, never materialized into the view.
    RefPlaceholder,
}

/// Node-owned display state. The binder renders this one-way into the view
/// layer; nothing ever queries the view to discover it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub expanded: bool,
    pub has_children: bool,
    /// A toggle has been scheduled and its continuation has not run yet.
    pub busy: bool,
}

#[derive(Debug)]
pub struct Node {
    /// Field name, array index, or the root's type-tag text.
    pub key: String,
    /// Leaf value; `None` for containers.
    pub value: Option<NodeValue>,
    pub kind: JsonType,
    pub shape: NodeShape,
    /// Root is 0; every child is `parent.depth + 1`.
    pub depth: usize,
    /// Insertion order equals source key/index order.
    pub children: Vec<NodeRef>,
    pub state: ViewState,
    /// Descendant elements have not been created in the view yet.
    pub pending: bool,
    /// The displayed member count. Equals `children.len()` except on a
    /// not-yet-inlined reference node, where it is patched to the resolved
    /// target's element count.
    pub size: usize,
    /// The parsed document, shared by every node of one tree.
    pub doc: Rc<Value>,
    pub parent: Weak<RefCell<Node>>,
    /// This node's single-line visual representation, once materialized.
    pub line: Option<ElementId>,
    /// Caret click registration; `None` for leaves.
    pub subscription: Option<SubscriptionId>,
    /// Single-flight token: a scheduled toggle continuation only runs if
    /// the epoch it captured is still current.
    pub toggle_epoch: u64,
}

impl Node {
    pub(crate) fn new(key: String, kind: JsonType, depth: usize, doc: Rc<Value>) -> Node {
        Node {
            key,
            value: None,
            kind,
            shape: NodeShape::Plain,
            depth,
            children: Vec::new(),
            state: ViewState::default(),
            pending: false,
            size: 0,
            doc,
            parent: Weak::new(),
            line: None,
            subscription: None,
            toggle_epoch: 0,
        }
    }

    /// A node with children is a container and renders a caret affordance.
    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    /// A node without children is a leaf, even when its value is one of the
    /// empty-container sentinels.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.shape, NodeShape::RefPlaceholder)
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.parent.upgrade()
    }
}
