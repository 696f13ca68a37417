//! Channel-backed breadth-first and depth-first traversal

use std::collections::{HashMap, VecDeque};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::node::TreeNode;
use crate::tree::Tree;

/// The order in which a traversal expands the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TraversalOrder {
    /// Level order: visit a node, then queue its children FIFO.
    BreadthFirst,
    /// Rightmost-subtree-first: children are pushed in list order and popped
    /// from the back of the deque, so each step descends into the last
    /// child, visiting siblings in reverse list order.
    DepthFirst,
}

/// A single in-flight traversal, draining the producer's bounded channel.
///
/// The sequence is finite and single-pass; call
/// [`Tree::traverse`] again to walk the tree anew. Dropping a `Traversal`
/// before exhausting it closes the channel, which stops and reclaims the
/// background producer.
#[derive(Debug)]
pub struct Traversal<N> {
    receiver: Receiver<N>,
}

impl<N> Iterator for Traversal<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.receiver.recv().ok()
    }
}

impl<N> Tree<N>
where
    N: TreeNode + Clone + Send + 'static,
    N::Id: Send + 'static,
{
    /// Walk the tree from `start` in the given order, yielding each reached
    /// node.
    ///
    /// The walk runs on a background producer feeding a channel bounded to
    /// the current node count; the returned [`Traversal`] drains it lazily.
    /// The producer walks a snapshot of the tree taken at call time, so
    /// later mutation cannot corrupt an in-flight traversal.
    ///
    /// `max_depth == 0` means unlimited. For `max_depth > 0`, children are
    /// expanded only while their depth (relative to `start`) stays within
    /// the limit; every reached node is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if `start` is absent. Once a
    /// traversal has started it cannot fail, only complete or be dropped.
    pub fn traverse(
        &self,
        order: TraversalOrder,
        start: &N::Id,
        max_depth: usize,
    ) -> Result<Traversal<N>, TreeError> {
        if !self.exists(start) {
            return Err(TreeError::NodeNotFound);
        }

        let snapshot = self.index.to_map();
        let (sender, receiver) = bounded(snapshot.len().max(1));
        let start = start.clone();
        thread::spawn(move || produce(order, snapshot, start, max_depth, sender));
        Ok(Traversal { receiver })
    }

    /// Walk the whole tree from its root with no depth bound.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NodeNotFound`] if the tree is empty.
    pub fn traverse_from_root(&self, order: TraversalOrder) -> Result<Traversal<N>, TreeError> {
        let root_id = self.root().ok_or(TreeError::NodeNotFound)?.id();
        self.traverse(order, &root_id, 0)
    }
}

/// Producer loop: expands nodes out of the snapshot into the channel until
/// the frontier is exhausted or the consumer hangs up.
fn produce<N: TreeNode>(
    order: TraversalOrder,
    mut snapshot: HashMap<N::Id, N>,
    start: N::Id,
    max_depth: usize,
    sender: Sender<N>,
) {
    let mut frontier = VecDeque::new();
    frontier.push_back((start, 0usize));

    loop {
        let next = match order {
            TraversalOrder::BreadthFirst => frontier.pop_front(),
            TraversalOrder::DepthFirst => frontier.pop_back(),
        };
        let Some((id, depth)) = next else {
            break;
        };

        // each node is visited at most once, so it can move out of the
        // snapshot instead of being cloned again
        let Some(node) = snapshot.remove(&id) else {
            warn!("skipping unresolvable node id {id:?} during traversal");
            continue;
        };

        let child_depth = depth + 1;
        if max_depth == 0 || child_depth <= max_depth {
            for child in node.children() {
                frontier.push_back((child.clone(), child_depth));
            }
        }

        if sender.send(node).is_err() {
            // consumer dropped the traversal
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use pretty_assertions::assert_eq;

    fn node(id: u32, parent_id: u32) -> Node<u32, String> {
        Node::new(id, parent_id, format!("node{id}"))
    }

    fn build_tree() -> Tree<Node<u32, String>> {
        let mut tree = Tree::new();
        for (id, parent_id) in [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 1),
            (4, 1),
            (5, 4),
            (6, 5),
            (7, 2),
            (8, 2),
            (9, 3),
            (10, 3),
            (11, 10),
        ] {
            tree.insert(node(id, parent_id)).unwrap();
        }
        tree
    }

    fn collect_ids(traversal: Traversal<Node<u32, String>>) -> Vec<u32> {
        traversal.map(|n| n.id()).collect()
    }

    #[test]
    fn test_breadth_first_with_depth_limit() {
        let tree = build_tree();
        let traversal = tree.traverse(TraversalOrder::BreadthFirst, &0, 2).unwrap();
        assert_eq!(collect_ids(traversal), vec![0, 1, 2, 3, 4, 7, 8]);
    }

    #[test]
    fn test_depth_first_with_depth_limit() {
        let tree = build_tree();
        let traversal = tree.traverse(TraversalOrder::DepthFirst, &0, 2).unwrap();
        assert_eq!(collect_ids(traversal), vec![0, 2, 8, 7, 1, 4, 3]);
    }

    #[test]
    fn test_breadth_first_unbounded() {
        let tree = build_tree();
        let traversal = tree.traverse(TraversalOrder::BreadthFirst, &0, 0).unwrap();
        assert_eq!(collect_ids(traversal), vec![0, 1, 2, 3, 4, 7, 8, 9, 10, 5, 11, 6]);
    }

    #[test]
    fn test_depth_first_unbounded() {
        let tree = build_tree();
        let traversal = tree.traverse(TraversalOrder::DepthFirst, &0, 0).unwrap();
        assert_eq!(collect_ids(traversal), vec![0, 2, 8, 7, 1, 4, 5, 6, 3, 10, 11, 9]);
    }

    #[test]
    fn test_traverse_from_root_after_reroot() {
        let mut tree = Tree::new();
        for (id, parent_id) in [
            (0, 12),
            (1, 0),
            (2, 0),
            (3, 1),
            (4, 1),
            (5, 4),
            (6, 5),
            (7, 2),
            (8, 2),
            (9, 3),
            (10, 3),
            (11, 10),
            (12, 27),
        ] {
            tree.insert(node(id, parent_id)).unwrap();
        }

        assert_eq!(tree.root().map(|n| n.id()), Some(12));
        let traversal = tree.traverse_from_root(TraversalOrder::BreadthFirst).unwrap();
        assert_eq!(
            collect_ids(traversal),
            vec![12, 0, 1, 2, 3, 4, 7, 8, 9, 10, 5, 11, 6]
        );
    }

    #[test]
    fn test_traverse_from_subtree() {
        let tree = build_tree();
        let traversal = tree.traverse(TraversalOrder::BreadthFirst, &1, 0).unwrap();
        assert_eq!(collect_ids(traversal), vec![1, 3, 4, 9, 10, 5, 11, 6]);
    }

    #[test]
    fn test_traversal_debug_formatting() {
        let tree = build_tree();
        let traversal = tree.traverse(TraversalOrder::BreadthFirst, &0, 0).unwrap();
        assert!(format!("{traversal:?}").contains("Traversal"));
    }

    #[test]
    fn test_traverse_missing_start_node() {
        let tree = build_tree();
        let err = tree.traverse(TraversalOrder::BreadthFirst, &99, 0).unwrap_err();
        assert_eq!(err, TreeError::NodeNotFound);
    }

    #[test]
    fn test_traverse_empty_tree() {
        let tree: Tree<Node<u32, String>> = Tree::new();
        let err = tree.traverse_from_root(TraversalOrder::BreadthFirst).unwrap_err();
        assert_eq!(err, TreeError::NodeNotFound);
    }

    #[test]
    fn test_dropping_traversal_stops_producer() {
        let tree = build_tree();
        let traversal = tree.traverse(TraversalOrder::BreadthFirst, &0, 0).unwrap();

        // consume a prefix and hang up; the producer must not block forever
        let prefix: Vec<u32> = traversal.take(3).map(|n| n.id()).collect();
        assert_eq!(prefix, vec![0, 1, 2]);
    }

    #[test]
    fn test_traversal_is_single_pass() {
        let tree = build_tree();
        let mut traversal = tree.traverse(TraversalOrder::BreadthFirst, &11, 0).unwrap();
        assert_eq!(traversal.next().map(|n| n.id()), Some(11));
        assert_eq!(traversal.next().map(|n| n.id()), None);
        assert!(traversal.next().is_none());
    }
}
