//! Indexed tree with automatic rerooting, merge, and ancestor lookup

use log::{trace, warn};

use crate::error::TreeError;
use crate::index::NodeIndex;
use crate::node::TreeNode;

/// Construction-time configuration for a [`Tree`]. Immutable once the tree
/// is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Allow [`Tree::insert`] to update an already-indexed id in place
    /// (through [`TreeNode::update_node`]) instead of failing with
    /// [`TreeError::NodeExists`]. Disabled by default.
    pub updates_allowed: bool,
}

/// An indexed, mutable tree built from nodes that arrive in arbitrary order.
///
/// Nodes declare their intended parent by id. Inserting a node whose parent
/// is already present links it in place; inserting the declared parent of
/// the current root reroots the tree under the newcomer; anything else is
/// rejected and can be retried once the parent exists. Lookups, ancestor
/// chains, merges, and traversal all resolve ids through the internal
/// [`NodeIndex`].
///
/// The tree provides no internal locking: concurrent mutation must be
/// serialized by the caller. Traversal walks a snapshot, so it may run
/// alongside anything (see [`Tree::traverse`]).
///
/// # Example
///
/// ```
/// use indexed_tree::{Node, Tree};
///
/// let mut tree = Tree::new();
/// tree.insert(Node::new(1u32, 1, "root"))?;
/// tree.insert(Node::new(2u32, 1, "leaf"))?;
///
/// assert_eq!(tree.root().map(|n| n.data), Some("root"));
/// assert!(tree.exists(&2));
/// # Ok::<(), indexed_tree::TreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tree<N: TreeNode> {
    pub(crate) root: Option<N::Id>,
    pub(crate) index: NodeIndex<N>,
    updates_allowed: bool,
}

impl<N: TreeNode> Tree<N> {
    /// Create an empty tree with default [`Options`].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create an empty tree with the given [`Options`].
    pub fn with_options(options: Options) -> Self {
        Self {
            root: None,
            index: NodeIndex::new(),
            updates_allowed: options.updates_allowed,
        }
    }

    /// The root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&N> {
        let id = self.root.as_ref()?;
        self.index.find(id).ok()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns true if the id is present in the tree.
    pub fn exists(&self, id: &N::Id) -> bool {
        self.index.contains(id)
    }

    /// Look up a node by id.
    pub fn find(&self, id: &N::Id) -> Option<&N> {
        self.index.find(id).ok()
    }

    /// Collect the ancestors of a node, ordered from its immediate parent up
    /// to the root.
    ///
    /// Returns `None` if the id is absent, and an empty vector if the node is
    /// the root.
    pub fn find_parents(&self, id: &N::Id) -> Option<Vec<&N>> {
        let node = self.find(id)?;
        let mut parents = Vec::new();
        let mut current = node.parent();
        while let Some(parent_id) = current {
            match self.index.find(&parent_id) {
                Ok(parent) => {
                    current = parent.parent();
                    parents.push(parent);
                }
                Err(_) => {
                    warn!("dangling parent link {parent_id:?} while collecting ancestors");
                    break;
                }
            }
        }
        Some(parents)
    }

    /// Add a node to the tree.
    ///
    /// The first node inserted into an empty tree becomes the root. After
    /// that, the node's declared parent must already be present: the node is
    /// linked under it and any children the caller pre-populated are
    /// discarded (they are re-established by inserting them). A node whose
    /// id matches the declared parent of the current root reroots the tree,
    /// with the old root becoming its child.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NodeExists`] if the id is already present and updates
    ///   are disabled (see [`Options::updates_allowed`]).
    /// - [`TreeError::ParentNotFound`] if the declared parent is absent and
    ///   the node is not the parent of the current root.
    /// - [`TreeError::CyclicReference`] if the declared parent is present
    ///   but the current root also declares this node as its parent.
    ///
    /// All failures leave the tree unchanged; indexing the node is the final
    /// step of every successful path.
    pub fn insert(&mut self, mut node: N) -> Result<(), TreeError> {
        let id = node.id();

        if self.index.contains(&id) {
            if !self.updates_allowed {
                return Err(TreeError::NodeExists);
            }
            self.index.find_mut(&id)?.update_node(node);
            trace!("updated node {id:?} in place");
            return Ok(());
        }

        let Some(root_id) = self.root.clone() else {
            // always accept the first node as root
            node.replace_children(Vec::new());
            self.root = Some(id.clone());
            self.index.insert(node);
            trace!("inserted node {id:?} as root");
            return Ok(());
        };

        let parent_id = node.parent_id();
        let node_is_root_parent = self.index.find(&root_id)?.parent_id() == id;

        if self.index.contains(&parent_id) {
            if node_is_root_parent {
                // the node would be both an ancestor and a descendant of root
                return Err(TreeError::CyclicReference);
            }
            node.set_parent(Some(parent_id.clone()));
            node.replace_children(Vec::new());
            self.index.find_mut(&parent_id)?.add_children(&[id.clone()]);
            self.index.insert(node);
            trace!("inserted node {id:?} under parent {parent_id:?}");
            return Ok(());
        }

        if node_is_root_parent {
            self.reroot(node, root_id)?;
            trace!("rerooted tree at node {id:?}");
            return Ok(());
        }

        Err(TreeError::ParentNotFound)
    }

    /// Make `new_head` the root: the old root becomes its child and the
    /// tree's root reference moves. The caller indexes `new_head` last.
    fn reroot(&mut self, mut new_head: N, old_root_id: N::Id) -> Result<(), TreeError> {
        let new_id = new_head.id();
        new_head.replace_children(Vec::new());
        self.index
            .find_mut(&old_root_id)?
            .set_parent(Some(new_id.clone()));
        new_head.add_children(&[old_root_id]);
        self.root = Some(new_id);
        self.index.insert(new_head);
        Ok(())
    }

    /// Graft an independently-built tree onto this one as a subtree.
    ///
    /// `other`'s root is attached under the node in this tree matching its
    /// declared parent id, then every entry of `other`'s index is moved into
    /// this tree. `other` is consumed; its nodes now belong to the receiver.
    ///
    /// # Errors
    ///
    /// - [`TreeError::Undefined`] if `other` is empty.
    /// - [`TreeError::ParentNotFound`] if no attachment point exists in the
    ///   receiver for `other`'s root.
    /// - [`TreeError::MergeDuplicateNodes`] if any id appears in both trees.
    ///
    /// All failures leave the receiver unchanged.
    pub fn merge(&mut self, other: Tree<N>) -> Result<(), TreeError> {
        let Some(other_root_id) = other.root.clone() else {
            return Err(TreeError::Undefined);
        };

        let attach_id = other.index.find(&other_root_id)?.parent_id();
        if !self.index.contains(&attach_id) {
            return Err(TreeError::ParentNotFound);
        }
        if other.index.ids().any(|id| self.index.contains(id)) {
            return Err(TreeError::MergeDuplicateNodes);
        }

        let mut other_index = other.index;
        other_index
            .find_mut(&other_root_id)?
            .set_parent(Some(attach_id.clone()));
        self.index
            .find_mut(&attach_id)?
            .add_children(&[other_root_id.clone()]);
        for node in other_index.into_nodes() {
            self.index.insert(node);
        }
        trace!("merged subtree rooted at {other_root_id:?} under {attach_id:?}");
        Ok(())
    }
}

impl<N: TreeNode> Default for Tree<N> {
    fn default() -> Self {
        Self::new()
    }
}
