//! json-tree-view — lazy expandable/collapsible tree rendering for JSON
//! documents.
//!
//! A parsed document is mirrored as a node tree and rendered one line per
//! node into an abstract view surface. Only the eager horizon (the root
//! and its direct children) is materialized up front; deeper subtrees get
//! their elements the first time an ancestor is expanded. Containers whose
//! data is a `$ref` pointer are resolved against the document root on
//! demand, while their displayed member counts are corrected ahead of time
//! so the tree never lies about sizes it has not yet paid to render.
//!
//! # Example
//!
//! ```
//! use json_tree_view::{Event, JsonTree, TextView};
//!
//! let mut view = TextView::new();
//! let mount = view.mount();
//! let mut tree =
//!     JsonTree::render_str_into(r#"{"a": 1, "b": {"c": 2}}"#, view, mount).unwrap();
//!
//! // Only the root line is visible until the root is expanded.
//! assert_eq!(tree.view().render(mount), "▸ object {2}\n");
//!
//! let root = tree.root();
//! let root_line = root.borrow().line.unwrap();
//! tree.on_event(root_line, Event::Click);
//! tree.pump();
//! assert!(tree.view().render(mount).contains("b {1}"));
//! ```

pub mod builder;
pub mod error;
pub mod node;
pub mod pointer;
pub mod text;
pub mod tree;
pub mod types;
pub mod view;
pub mod walk;

mod binder;
mod controller;
mod template;

pub use builder::{build, build_str};
pub use error::TreeError;
pub use node::{Node, NodeRef, NodeShape, NodeValue, ViewState};
pub use pointer::{count_elements, inline, parse_ref_pointer, resolve, unescape_segment};
pub use text::{Counters, TextView};
pub use tree::JsonTree;
pub use types::{classify, JsonType};
pub use view::{ElementId, Event, SubscriptionId, View};
pub use walk::walk;
