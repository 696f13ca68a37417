//! Node capability trait and a ready-made payload node

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inline capacity for child-id lists before spilling to the heap.
const INLINE_CHILDREN: usize = 4;

/// The capability a type must provide to be stored in a
/// [`Tree`](crate::Tree).
///
/// Links are expressed as ids rather than references; the tree resolves them
/// through its index. This keeps nodes free of reference cycles and lets the
/// tree own every node outright.
///
/// The tree never constructs nodes. A node arrives carrying its own id and
/// the id of its intended parent; the tree wires up the actual parent/child
/// links through the mutation methods below and keeps the two directions
/// consistent: every node reachable from the root via [`children`] is
/// reachable in reverse via [`parent`], except the root itself, whose
/// [`parent`] is `None`.
///
/// [`children`]: TreeNode::children
/// [`parent`]: TreeNode::parent
pub trait TreeNode {
    /// Index key type. Must be stable for the lifetime of the node within a
    /// tree.
    type Id: Clone + Eq + Hash + Debug;

    /// Returns the index key of this node.
    fn id(&self) -> Self::Id;

    /// Returns the index key of this node's intended parent, as declared by
    /// the caller. The parent may not have been inserted yet.
    fn parent_id(&self) -> Self::Id;

    /// Returns the ids of this node's children, in traversal order.
    fn children(&self) -> &[Self::Id];

    /// Returns the id of the linked parent, or `None` if this node is the
    /// root (or not yet linked into a tree).
    fn parent(&self) -> Option<Self::Id>;

    /// Appends the given ids to the child list.
    fn add_children(&mut self, children: &[Self::Id]);

    /// Removes the given ids from the child list, matching by id. Ids not
    /// present are ignored.
    fn remove_children(&mut self, children: &[Self::Id]);

    /// Replaces the child list wholesale.
    fn replace_children(&mut self, children: Vec<Self::Id>);

    /// Sets the parent back-reference. Must be a no-op when given `None` or
    /// the node's own id, so a bad caller cannot self-parent a node.
    fn set_parent(&mut self, parent: Option<Self::Id>);

    /// Merges the incoming node's data into this one. Invoked by
    /// [`Tree::insert`](crate::Tree::insert) when updates are enabled and the
    /// id is already present; identity and links are left untouched by the
    /// tree, so implementations decide what "updated" means for their
    /// payload.
    fn update_node(&mut self, incoming: Self);
}

/// A ready-made [`TreeNode`] implementation generic over the id type `I` and
/// a payload `D`.
///
/// Callers with plain payloads can use this directly instead of implementing
/// the trait; [`update_node`](TreeNode::update_node) replaces the payload and
/// the declared parent id, leaving identity and links untouched.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<I, D> {
    id: I,
    parent_id: I,
    parent: Option<I>,
    children: SmallVec<[I; INLINE_CHILDREN]>,
    /// User-defined payload associated with this node
    pub data: D,
}

impl<I, D> Node<I, D> {
    /// Create an unlinked node from its id, declared parent id, and payload.
    pub fn new(id: I, parent_id: I, data: D) -> Self {
        Self {
            id,
            parent_id,
            parent: None,
            children: SmallVec::new(),
            data,
        }
    }
}

impl<I, D> TreeNode for Node<I, D>
where
    I: Clone + Eq + Hash + Debug,
{
    type Id = I;

    fn id(&self) -> I {
        self.id.clone()
    }

    fn parent_id(&self) -> I {
        self.parent_id.clone()
    }

    fn children(&self) -> &[I] {
        &self.children
    }

    fn parent(&self) -> Option<I> {
        self.parent.clone()
    }

    fn add_children(&mut self, children: &[I]) {
        self.children.extend(children.iter().cloned());
    }

    fn remove_children(&mut self, children: &[I]) {
        self.children.retain(|c| !children.contains(c));
    }

    fn replace_children(&mut self, children: Vec<I>) {
        self.children = SmallVec::from_vec(children);
    }

    fn set_parent(&mut self, parent: Option<I>) {
        match parent {
            Some(p) if p != self.id => self.parent = Some(p),
            // None or own id: leave the link untouched
            _ => {}
        }
    }

    fn update_node(&mut self, incoming: Self) {
        self.parent_id = incoming.parent_id;
        self.data = incoming.data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_node_is_unlinked() {
        let node: Node<u32, &str> = Node::new(1, 0, "payload");
        assert_eq!(node.id(), 1);
        assert_eq!(node.parent_id(), 0);
        assert_eq!(node.parent(), None);
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_add_and_remove_children() {
        let mut node: Node<u32, ()> = Node::new(0, 0, ());
        node.add_children(&[1, 2, 3]);
        assert_eq!(node.children(), &[1, 2, 3]);

        // removal matches by id; absent ids are ignored
        node.remove_children(&[2, 99]);
        assert_eq!(node.children(), &[1, 3]);
    }

    #[test]
    fn test_add_children_with_non_copy_ids() {
        let mut node: Node<String, ()> = Node::new("root".into(), "root".into(), ());
        node.add_children(&["a".to_string(), "b".to_string()]);
        assert_eq!(node.children(), &["a".to_string(), "b".to_string()]);

        node.remove_children(&["a".to_string()]);
        assert_eq!(node.children(), &["b".to_string()]);
    }

    #[test]
    fn test_replace_children() {
        let mut node: Node<u32, ()> = Node::new(0, 0, ());
        node.add_children(&[1, 2]);
        node.replace_children(vec![7]);
        assert_eq!(node.children(), &[7]);
        node.replace_children(Vec::new());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_set_parent_ignores_none_and_self() {
        let mut node: Node<u32, ()> = Node::new(5, 0, ());
        node.set_parent(Some(5));
        assert_eq!(node.parent(), None);

        node.set_parent(Some(2));
        assert_eq!(node.parent(), Some(2));

        node.set_parent(None);
        assert_eq!(node.parent(), Some(2));
        node.set_parent(Some(5));
        assert_eq!(node.parent(), Some(2));
    }

    #[test]
    fn test_update_node_preserves_identity_and_links() {
        let mut node: Node<u32, &str> = Node::new(1, 0, "old");
        node.set_parent(Some(0));
        node.add_children(&[2, 3]);

        node.update_node(Node::new(1, 9, "new"));
        assert_eq!(node.id(), 1);
        assert_eq!(node.parent_id(), 9);
        assert_eq!(node.data, "new");
        assert_eq!(node.parent(), Some(0));
        assert_eq!(node.children(), &[2, 3]);
    }
}
