//! Builds a small org chart from nodes arriving out of order, then prints it
//! in both traversal orders.
//!
//! Run with `cargo run --example org_chart`.

use indexed_tree::prelude::*;

fn main() -> Result<(), TreeError> {
    env_logger::init();

    let mut tree = Tree::new();

    // Records arrive in arbitrary order: some before their manager, and the
    // CEO last of all, which reroots the tree under them.
    let people = [
        (2u32, 1, "VP Engineering"),
        (5, 3, "Storage Engineer"),
        (3, 2, "Platform Lead"),
        (4, 2, "Product Lead"),
        (6, 3, "Network Engineer"),
        (1, 0, "CEO"),
    ];

    let mut pending: Vec<Node<u32, &str>> = Vec::new();
    for (id, manager, title) in people {
        match tree.insert(Node::new(id, manager, title)) {
            Ok(()) => {}
            // manager not seen yet: buffer and retry once more arrived
            Err(TreeError::ParentNotFound) => pending.push(Node::new(id, manager, title)),
            Err(err) => return Err(err),
        }
    }
    while !pending.is_empty() {
        let before = pending.len();
        let mut still_pending = Vec::new();
        for node in pending {
            match tree.insert(node.clone()) {
                Ok(()) => {}
                Err(TreeError::ParentNotFound) => still_pending.push(node),
                Err(err) => return Err(err),
            }
        }
        if still_pending.len() == before {
            // no progress: the remaining nodes are genuine orphans
            return Err(TreeError::ParentNotFound);
        }
        pending = still_pending;
    }

    println!(
        "chart has {} people, led by {:?}",
        tree.len(),
        tree.root().map(|n| n.data)
    );

    println!("\nlevel order:");
    for person in tree.traverse_from_root(TraversalOrder::BreadthFirst)? {
        let depth = tree.find_parents(&person.id()).map_or(0, |p| p.len());
        println!("{:indent$}{}", "", person.data, indent = depth * 2);
    }

    println!("\ndepth first:");
    for person in tree.traverse_from_root(TraversalOrder::DepthFirst)? {
        println!("- {}", person.data);
    }

    Ok(())
}
