//! Arena-backed checksum tree
//!
//! Built once, bottom-up, from at least two leaf signatures and never
//! mutated afterwards. Nodes live in a flat arena and reference children by
//! [`NodeId`]; every node has exactly one parent, so there are no cycles.

mod builder;
mod node;
pub mod shape;
mod traversal;

pub use builder::{TreeBuilder, MIN_LEAVES};
pub use node::{Node, NodeId, NodeKind};
pub use traversal::BreadthFirst;

use crate::{CheckpointError, Combiner};

/// Immutable checksum tree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Tree {
    /// Node arena; order is an implementation detail
    nodes: Vec<Node>,

    /// Single top-level node
    root: NodeId,

    /// Levels above the leaves
    height: usize,

    /// Leaf ids in original order
    leaves: Vec<NodeId>,
}

impl Tree {
    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        root: NodeId,
        height: usize,
        leaves: Vec<NodeId>,
    ) -> Self {
        debug_assert_eq!(nodes.len(), shape::total_nodes(leaves.len()));
        debug_assert_eq!(height, shape::height_for(leaves.len()));
        Self {
            nodes,
            root,
            height,
            leaves,
        }
    }

    /// Root node
    pub fn root(&self) -> &Node {
        self.node(self.root)
    }

    /// Arena id of the root.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The checkpoint value compared across systems.
    pub fn root_signature(&self) -> &[u8] {
        self.root().signature()
    }

    /// Look up a node by id.
    ///
    /// Ids are only meaningful for the tree that issued them.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Total nodes across all levels, leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels built above the leaves: ⌈log2(leaf_count)⌉.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf ids, left to right.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Leaf signatures in their original order, borrowed from the leaf nodes.
    pub fn leaf_signatures(&self) -> Vec<&[u8]> {
        self.leaves.iter().map(|&id| self.node(id).signature()).collect()
    }

    /// Level-order traversal starting at the root.
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst::new(self)
    }

    /// Byte-for-byte root comparison; a mismatch means the two signature
    /// sequences differ in content or order.
    pub fn same_root(&self, other: &Tree) -> bool {
        self.root_signature() == other.root_signature()
    }

    /// Recompute every internal signature from its children.
    ///
    /// Combined nodes must equal `combiner.combine(left, right)`; promoted
    /// nodes must equal their only child. Returns the breadth-first position
    /// of the first node that disagrees.
    pub fn verify(&self, combiner: &dyn Combiner) -> Result<(), CheckpointError> {
        for (position, (_, node)) in self.breadth_first().enumerate() {
            let Some(left) = node.left() else {
                continue;
            };
            let left = self.node(left).signature();

            let consistent = match node.right() {
                Some(right) => combiner.combine(left, self.node(right).signature()) == node.signature(),
                None => left == node.signature(),
            };
            if !consistent {
                return Err(CheckpointError::SignatureMismatch { position });
            }
        }
        Ok(())
    }
}

/// Trees are equal when their breadth-first `(kind, signature)` sequences
/// are equal; arena layout is ignored.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.height == other.height
            && self
                .breadth_first()
                .zip(other.breadth_first())
                .all(|((_, a), (_, b))| a.kind() == b.kind() && a.signature() == b.signature())
    }
}

impl Eq for Tree {}
