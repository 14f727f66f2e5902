//! Huffman tree construction over an index-addressed node arena.
//!
//! Leaves occupy slots `0..N` in input order. Each merge appends one internal
//! node, so internal nodes occupy `N..2N-1` in construction order and every
//! parent has a larger index than its children.
//!
//! # Tie-breaking
//!
//! Selection scans candidates in index order and only displaces a slot on a
//! strictly smaller weight. That is the same as ordering unattached nodes by
//! `(weight, index)` and taking the two smallest: on equal weights the lower
//! index wins. [`Selection::MinHeap`] uses that key directly, so both
//! strategies build identical trees.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};

/// Handle to a node; equal to its index in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A leaf (original weight) or an internal node produced by a merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    weight: u64,
    parent: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
}

impl Node {
    fn leaf(index: usize, weight: u64) -> Self {
        Self {
            id: NodeId(index),
            weight,
            parent: None,
            children: None,
        }
    }

    /// Handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Leaf weight, or the sum of both children's weights.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Node that adopted this one, if it has been merged.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Left child (the lighter of the merged pair).
    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(left, _)| left)
    }

    /// Right child.
    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, right)| right)
    }

    /// True for nodes created from an input weight.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// True while the node has no parent.
    pub fn is_unattached(&self) -> bool {
        self.parent.is_none()
    }

    /// True for a node nothing has adopted. Once the tree is built this
    /// holds for the root alone.
    pub fn is_root(&self) -> bool {
        self.is_unattached()
    }
}

/// Construction state of a [`TreeBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Leaves placed, no merges done.
    Initialized,
    /// All `N - 1` merges done.
    Built,
}

/// How the two lightest unattached nodes are found at each merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Linear scan over all lower slots per merge; O(N²) overall.
    #[default]
    LinearScan,
    /// Binary heap keyed by `(weight, index)`; O(N log N) overall.
    MinHeap,
}

/// Owns the node arena and performs the merges.
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    leaf_count: usize,
    selection: Selection,
    state: State,
}

impl TreeBuilder {
    /// Place one leaf per weight, using [`Selection::LinearScan`].
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `weights` is empty or its total
    /// overflows `u64`.
    pub fn new(weights: &[u64]) -> Result<Self> {
        Self::with_selection(weights, Selection::default())
    }

    /// Place one leaf per weight, using the given selection strategy.
    ///
    /// The arena is sized for the full `2N - 1` nodes up front. Checking the
    /// total here means no internal weight can overflow during `build`.
    pub fn with_selection(weights: &[u64], selection: Selection) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::InvalidInput("empty weight sequence"));
        }
        weights
            .iter()
            .try_fold(0u64, |total, &w| total.checked_add(w))
            .ok_or(Error::InvalidInput("total weight overflows u64"))?;

        let mut nodes = Vec::with_capacity(2 * weights.len() - 1);
        nodes.extend(weights.iter().enumerate().map(|(i, &w)| Node::leaf(i, w)));

        Ok(Self {
            nodes,
            leaf_count: weights.len(),
            selection,
            state: State::Initialized,
        })
    }

    /// Merge until one root remains and return it.
    ///
    /// # Errors
    /// `Error::AlreadyBuilt` on a second call; the tree is left untouched.
    /// `Error::InternalConsistency` if a merge finds fewer than two
    /// unattached nodes, which the arena sizing rules out.
    pub fn build(&mut self) -> Result<NodeId> {
        if self.state == State::Built {
            return Err(Error::AlreadyBuilt);
        }

        match self.selection {
            Selection::LinearScan => {
                for i in self.leaf_count..self.capacity() {
                    let (left, right) = self.select_two_minimal(i)?;
                    self.merge(left, right);
                }
            }
            Selection::MinHeap => {
                let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = self
                    .nodes
                    .iter()
                    .map(|n| Reverse((n.weight, n.id)))
                    .collect();

                while self.nodes.len() < self.capacity() {
                    let found = heap.len();
                    let (Some(Reverse((_, left))), Some(Reverse((_, right)))) =
                        (heap.pop(), heap.pop())
                    else {
                        return Err(Error::InternalConsistency {
                            index: self.nodes.len(),
                            found,
                        });
                    };
                    let id = self.merge(left, right);
                    heap.push(Reverse((self.nodes[id.0].weight, id)));
                }
            }
        }

        self.state = State::Built;
        let root = NodeId(self.nodes.len() - 1);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            leaves = self.leaf_count,
            root = root.0,
            weight = self.nodes[root.0].weight,
            "huffman tree built"
        );

        Ok(root)
    }

    /// Find the two lightest unattached nodes among slots `0..bound`.
    ///
    /// `bound` is clamped to the nodes created so far. The first returned
    /// node is never heavier than the second, and neither is heavier than
    /// any other unattached node in range. Equal weights go to the lower
    /// index.
    ///
    /// # Errors
    /// Returns `Error::InternalConsistency` if fewer than two unattached
    /// nodes lie in range.
    pub fn select_two_minimal(&self, bound: usize) -> Result<(NodeId, NodeId)> {
        let bound = bound.min(self.nodes.len());
        let mut first: Option<&Node> = None;
        let mut second: Option<&Node> = None;
        let mut found = 0;

        for node in self.nodes[..bound].iter().filter(|n| n.is_unattached()) {
            found += 1;
            if first.is_none_or(|f| node.weight < f.weight) {
                second = first;
                first = Some(node);
            } else if second.is_none_or(|s| node.weight < s.weight) {
                second = Some(node);
            }
        }

        match (first, second) {
            (Some(first), Some(second)) => Ok((first.id, second.id)),
            _ => Err(Error::InternalConsistency {
                index: bound,
                found,
            }),
        }
    }

    fn merge(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        // Bounded by the total checked in `with_selection`.
        let weight = self.nodes[left.0].weight + self.nodes[right.0].weight;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            id = id.0,
            left = left.0,
            left_weight = self.nodes[left.0].weight,
            right = right.0,
            right_weight = self.nodes[right.0].weight,
            weight,
            "merged pair"
        );

        self.nodes[left.0].parent = Some(id);
        self.nodes[right.0].parent = Some(id);
        self.nodes.push(Node {
            id,
            weight,
            parent: None,
            children: Some((left, right)),
        });
        id
    }

    /// All nodes created so far, indexed by [`NodeId`].
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The leaf nodes, in input order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes[..self.leaf_count].iter()
    }

    /// Number of input weights (N).
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Node count of the finished tree, `2N - 1`.
    pub fn capacity(&self) -> usize {
        2 * self.leaf_count - 1
    }

    /// Strategy used by `build`.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Current construction state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The root, once built. It is always the last slot.
    pub fn root(&self) -> Option<NodeId> {
        match self.state {
            State::Built => Some(NodeId(self.nodes.len() - 1)),
            State::Initialized => None,
        }
    }

    /// Number of parent links from `id` to its topmost ancestor.
    ///
    /// On a built tree that ancestor is the root.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.node(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = &self.nodes[parent.0];
            depth += 1;
        }
        Some(depth)
    }

    /// Sum of `weight * depth` over all leaves; `None` until built.
    ///
    /// Parents always sit at higher indices, so one reverse pass fills every
    /// depth.
    pub fn weighted_path_length(&self) -> Option<u128> {
        if self.state != State::Built {
            return None;
        }

        let mut depths = vec![0u128; self.nodes.len()];
        for node in self.nodes.iter().rev() {
            if let Some(parent) = node.parent {
                depths[node.id.0] = depths[parent.0] + 1;
            }
        }

        Some(
            self.leaves()
                .map(|leaf| u128::from(leaf.weight) * depths[leaf.id.0])
                .sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn built(weights: &[u64]) -> TreeBuilder {
        let mut tree = TreeBuilder::new(weights).unwrap();
        tree.build().unwrap();
        tree
    }

    fn children(tree: &TreeBuilder, index: usize) -> (usize, usize) {
        let node = &tree.nodes()[index];
        (node.left().unwrap().index(), node.right().unwrap().index())
    }

    #[test]
    fn test_five_weights() {
        let tree = built(&[8, 2, 3, 9, 10]);

        assert_eq!(tree.nodes().len(), 9);
        assert_eq!(tree.root(), Some(NodeId(8)));
        assert_eq!(tree.nodes()[8].weight(), 32);

        // 2 and 3 merge first.
        assert_eq!(tree.nodes()[5].weight(), 5);
        assert_eq!(children(&tree, 5), (1, 2));
        assert_eq!(children(&tree, 6), (5, 0));
        assert_eq!(children(&tree, 7), (3, 4));
        assert_eq!(children(&tree, 8), (6, 7));

        assert_eq!(tree.weighted_path_length(), Some(69));
    }

    #[test]
    fn test_two_equal_weights() {
        let tree = built(&[1, 1]);
        assert_eq!(tree.nodes().len(), 3);
        assert_eq!(tree.nodes()[2].weight(), 2);
        assert_eq!(children(&tree, 2), (0, 1));
    }

    #[test]
    fn test_single_leaf_is_root() {
        let mut tree = TreeBuilder::new(&[7]).unwrap();
        assert_eq!(tree.capacity(), 1);
        assert_eq!(tree.build(), Ok(NodeId(0)));

        let root = &tree.nodes()[0];
        assert!(root.is_leaf());
        assert!(root.is_unattached());
        assert_eq!(tree.depth(NodeId(0)), Some(0));
        assert_eq!(tree.weighted_path_length(), Some(0));
    }

    #[test]
    fn test_empty_weights_rejected() {
        assert!(matches!(
            TreeBuilder::new(&[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_total_overflow_rejected() {
        assert!(matches!(
            TreeBuilder::new(&[u64::MAX, 1]),
            Err(Error::InvalidInput(_))
        ));
        assert!(TreeBuilder::new(&[u64::MAX - 1, 1]).is_ok());
    }

    #[test]
    fn test_second_build_rejected() {
        let mut tree = built(&[4, 1, 3]);
        let before = tree.nodes().to_vec();
        assert_eq!(tree.build(), Err(Error::AlreadyBuilt));
        assert_eq!(tree.nodes(), &before[..]);
        assert_eq!(tree.state(), State::Built);
    }

    #[test]
    fn test_root_absent_before_build() {
        let tree = TreeBuilder::new(&[1, 2, 3]).unwrap();
        assert_eq!(tree.state(), State::Initialized);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.weighted_path_length(), None);
        assert_eq!(tree.nodes().len(), 3);
    }

    #[test]
    fn test_select_ties_prefer_lower_index() {
        let tree = TreeBuilder::new(&[2, 1, 1]).unwrap();
        assert_eq!(tree.select_two_minimal(3), Ok((NodeId(1), NodeId(2))));

        let tree = TreeBuilder::new(&[2, 2, 1]).unwrap();
        assert_eq!(tree.select_two_minimal(3), Ok((NodeId(2), NodeId(0))));

        let tree = TreeBuilder::new(&[3, 2, 1, 2]).unwrap();
        assert_eq!(tree.select_two_minimal(4), Ok((NodeId(2), NodeId(1))));
    }

    #[test]
    fn test_select_respects_bound() {
        let tree = TreeBuilder::new(&[5, 4, 1, 1]).unwrap();
        assert_eq!(tree.select_two_minimal(2), Ok((NodeId(1), NodeId(0))));
        // Clamped to the nodes that exist.
        assert_eq!(tree.select_two_minimal(100), Ok((NodeId(2), NodeId(3))));
    }

    #[test]
    fn test_select_needs_two_candidates() {
        let tree = TreeBuilder::new(&[5]).unwrap();
        assert_eq!(
            tree.select_two_minimal(1),
            Err(Error::InternalConsistency { index: 1, found: 1 })
        );

        let tree = built(&[1, 2]);
        assert_eq!(
            tree.select_two_minimal(3),
            Err(Error::InternalConsistency { index: 3, found: 1 })
        );
    }

    #[test]
    fn test_only_root_is_root() {
        let tree = built(&[8, 2, 3, 9, 10]);
        let roots: Vec<_> = tree
            .nodes()
            .iter()
            .filter(|n| n.is_root())
            .map(|n| n.id())
            .collect();
        assert_eq!(roots, vec![NodeId(8)]);
        assert_eq!(tree.root(), Some(NodeId(8)));

        let single = built(&[7]);
        assert!(single.nodes()[0].is_root());
    }

    #[test]
    fn test_depths() {
        let tree = built(&[8, 2, 3, 9, 10]);
        let depths: Vec<_> = (0..5).map(|i| tree.depth(NodeId(i)).unwrap()).collect();
        assert_eq!(depths, vec![2, 3, 3, 2, 2]);
        assert_eq!(tree.depth(NodeId(9)), None);
    }

    #[test]
    fn test_min_heap_matches_scan() {
        let weights = [8, 2, 3, 9, 10];
        let mut heap = TreeBuilder::with_selection(&weights, Selection::MinHeap).unwrap();
        heap.build().unwrap();
        assert_eq!(heap.nodes(), built(&weights).nodes());
    }

    proptest! {
        #[test]
        fn prop_internal_weight_is_sum_of_children(
            weights in prop::collection::vec(0u64..1000, 1..64),
        ) {
            let tree = built(&weights);
            for node in tree.nodes().iter().filter(|n| !n.is_leaf()) {
                let left = tree.node(node.left().unwrap()).unwrap();
                let right = tree.node(node.right().unwrap()).unwrap();
                prop_assert_eq!(node.weight(), left.weight() + right.weight());
                prop_assert!(left.weight() <= right.weight());
                prop_assert!(left.id() < node.id() && right.id() < node.id());
            }
        }

        #[test]
        fn prop_path_length_equals_internal_weight_sum(
            weights in prop::collection::vec(0u64..1000, 1..64),
        ) {
            let tree = built(&weights);
            let internal: u128 = tree.nodes()[tree.leaf_count()..]
                .iter()
                .map(|n| u128::from(n.weight()))
                .sum();
            prop_assert_eq!(tree.weighted_path_length(), Some(internal));
        }
    }
}
