//! Id-to-node map backing every tree lookup

use std::collections::HashMap;

use crate::error::TreeError;
use crate::node::TreeNode;

/// Authoritative id -> node storage for a [`Tree`](crate::Tree).
///
/// The index stores nodes unconditionally, overwriting any entry with the
/// same key; uniqueness and replacement policy are the tree's concern, not
/// the index's. The tree is the sole owner and mutator, so the map is always
/// initialized and [`insert`](NodeIndex::insert) cannot fail. Read-only
/// operations degrade gracefully (an empty index reports length 0 rather
/// than erroring).
#[derive(Debug, Clone)]
pub struct NodeIndex<N: TreeNode> {
    nodes: HashMap<N::Id, N>,
}

impl<N: TreeNode> NodeIndex<N> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self { nodes: HashMap::new() }
    }

    /// Look up a node by id.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the id is absent.
    pub fn find(&self, id: &N::Id) -> Result<&N, TreeError> {
        self.nodes.get(id).ok_or(TreeError::NodeNotFound)
    }

    /// Look up a node by id for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the id is absent.
    pub fn find_mut(&mut self, id: &N::Id) -> Result<&mut N, TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::NodeNotFound)
    }

    /// Store a node under its own id, overwriting any existing entry.
    pub fn insert(&mut self, node: N) {
        self.nodes.insert(node.id(), node);
    }

    /// Returns true if the id is present.
    pub fn contains(&self, id: &N::Id) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the index holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the indexed ids, in no particular order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = &N::Id> {
        self.nodes.keys()
    }

    /// Consume the index, yielding every node.
    pub(crate) fn into_nodes(self) -> impl Iterator<Item = N> {
        self.nodes.into_values()
    }

    /// Clone the backing map. Used to hand a traversal producer its own
    /// snapshot of the tree.
    pub(crate) fn to_map(&self) -> HashMap<N::Id, N>
    where
        N: Clone,
    {
        self.nodes.clone()
    }
}

impl<N: TreeNode> Default for NodeIndex<N> {
    fn default() -> Self {
        Self::new()
    }
}
