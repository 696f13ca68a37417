//! Error kinds surfaced by tree and index operations

use derive_more::{Display, Error};

/// The closed set of failures a [`Tree`](crate::Tree) or
/// [`NodeIndex`](crate::NodeIndex) operation can report.
///
/// Every mutating operation either fully succeeds or fails with one of these
/// kinds and zero structural change, so callers can match on the variant and
/// retry (e.g. insert the missing parent first on
/// [`ParentNotFound`](TreeError::ParentNotFound)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum TreeError {
    /// Index storage was unavailable. Reserved for index misuse; trees built
    /// through [`Tree::new`](crate::Tree::new) always carry an initialized
    /// index, so this crate never produces it.
    #[display(fmt = "index is undefined")]
    IndexUndefined,

    /// Lookup miss. A routine condition, not a structural problem.
    #[display(fmt = "node id not found in index")]
    NodeNotFound,

    /// Duplicate insert while updates are disabled.
    #[display(fmt = "node already exists")]
    NodeExists,

    /// The declared parent is absent and the node is not the parent of the
    /// current root.
    #[display(fmt = "node parent not found")]
    ParentNotFound,

    /// The insert would create a cycle through the root.
    #[display(fmt = "node parent is child of node")]
    CyclicReference,

    /// An empty tree was passed where a populated one was required.
    #[display(fmt = "tree is empty or undefined")]
    Undefined,

    /// Id collision between the two trees being merged.
    #[display(fmt = "duplicate nodes in source and target trees")]
    MergeDuplicateNodes,
}
