//! Indexed Tree Library
//!
//! A generic, indexed, mutable tree for hierarchies whose nodes arrive in
//! arbitrary order: organizational structures, dependency graphs, parsed
//! document trees. Nodes declare their intended parent by id; the tree wires
//! up the actual links, reroots itself when the declared parent of the
//! current root shows up, and backs every lookup with an id index.
//!
//! # Core Concepts
//!
//! - **TreeNode**: capability trait a payload type implements to live in a tree
//! - **Node**: ready-made `TreeNode` implementation generic over id and payload
//! - **Tree**: insertion with automatic rerooting, update-in-place, merge,
//!   and ancestor lookup
//! - **Traversal**: breadth-first or depth-first walk, fed lazily by a
//!   background producer through a bounded channel
//!
//! # Example
//!
//! ```
//! use indexed_tree::prelude::*;
//!
//! let mut tree = Tree::new();
//! tree.insert(Node::new(1u32, 1, "engineering"))?;
//! tree.insert(Node::new(2u32, 1, "platform"))?;
//! tree.insert(Node::new(3u32, 1, "product"))?;
//! tree.insert(Node::new(4u32, 2, "storage"))?;
//!
//! let names: Vec<&str> = tree
//!     .traverse_from_root(TraversalOrder::BreadthFirst)?
//!     .map(|node| node.data)
//!     .collect();
//! assert_eq!(names, vec!["engineering", "platform", "product", "storage"]);
//! # Ok::<(), indexed_tree::TreeError>(())
//! ```

mod error;
mod index;
mod node;
mod tree;
mod traverse;

pub use error::TreeError;
pub use index::NodeIndex;
pub use node::{Node, TreeNode};
pub use tree::{Options, Tree};
pub use traverse::{Traversal, TraversalOrder};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::{Node, Options, Traversal, TraversalOrder, Tree, TreeError, TreeNode};
}
