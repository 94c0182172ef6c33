//! `json-tree` — render a JSON document as an expandable text tree.
//!
//! Usage:
//!   json-tree [--all]
//!
//! The document is read from stdin. By default the root is expanded one
//! level; `--all` keeps expanding until every container is open.

use std::io::{self, Read};

use json_tree_view::{walk, Event, JsonTree, TextView};

fn main() {
    let all = std::env::args().any(|arg| arg == "--all");

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let mut view = TextView::new();
    let mount = view.mount();
    let mut tree = match JsonTree::render_str_into(buf.trim(), view, mount) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let root = tree.root();
    let root_line = root.borrow().line;
    if let Some(line) = root_line {
        tree.on_event(line, Event::Click);
        tree.pump();
    }

    if all {
        // Each round clicks every collapsed container; lazily revealed
        // subtrees surface new ones. The round cap keeps reference cycles
        // and unresolvable references from spinning forever.
        for _ in 0..64 {
            let mut targets = Vec::new();
            walk(&root, &mut |node| {
                let n = node.borrow();
                if n.state.has_children && !n.state.expanded {
                    if let Some(line) = n.line {
                        targets.push(line);
                    }
                }
            });
            if targets.is_empty() {
                break;
            }
            for line in targets {
                tree.on_event(line, Event::Click);
                tree.pump();
            }
        }
    }

    print!("{}", tree.view().render(mount));
}
