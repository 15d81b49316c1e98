//! Bottom-up tree construction
//!
//! Level k+1 is formed from level k by pairing (0,1), (2,3), …:
//!   paired tail:   parent.sig = combine(left.sig, right.sig)
//!   unpaired tail: parent.sig = left.sig        (promotion)
//! until a single root remains.

use std::sync::Arc;

use super::{shape, Node, NodeId, Tree};
use crate::{CheckpointError, Combiner, CombinerKind};

/// Fewest leaves that still require a combining step.
pub const MIN_LEAVES: usize = 2;

/// Builds [`Tree`]s with a fixed combining function.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    combiner: Arc<dyn Combiner>,
}

impl TreeBuilder {
    /// Builder using the default Adler-32 combiner.
    pub fn new() -> Self {
        Self::with_kind(CombinerKind::default())
    }

    /// Builder using one of the shipped combiners.
    pub fn with_kind(kind: CombinerKind) -> Self {
        Self {
            combiner: kind.instantiate(),
        }
    }

    /// Builder using a caller-supplied combiner.
    pub fn with_combiner(combiner: Arc<dyn Combiner>) -> Self {
        Self { combiner }
    }

    /// Combining function applied to every sibling pair.
    pub fn combiner(&self) -> &dyn Combiner {
        self.combiner.as_ref()
    }

    /// Build a tree over `leaf_signatures`, preserving their order.
    ///
    /// Fails with [`CheckpointError::InvalidInput`] for fewer than two
    /// leaves, or when a signature or the node total would not fit the
    /// 32-bit wire fields.
    pub fn build<I, S>(&self, leaf_signatures: I) -> Result<Tree, CheckpointError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut nodes = Vec::new();
        let mut leaves = Vec::new();
        for (index, sig) in leaf_signatures.into_iter().enumerate() {
            let sig = sig.as_ref();
            ensure_wire_len(sig, || format!("leaf signature {}", index))?;
            leaves.push(push_node(&mut nodes, Node::leaf(sig.to_vec())));
        }

        let leaf_count = leaves.len();
        if leaf_count < MIN_LEAVES {
            return Err(CheckpointError::invalid_input(format!(
                "need at least {} leaf signatures, got {}",
                MIN_LEAVES, leaf_count
            )));
        }

        let total = shape::total_nodes(leaf_count);
        if u32::try_from(total).is_err() {
            return Err(CheckpointError::invalid_input(format!(
                "{} leaves produce {} nodes, more than a u32 node count can describe",
                leaf_count, total
            )));
        }
        nodes.reserve_exact(total - leaf_count);

        let mut level = leaves.clone();
        let mut height = 0;
        while level.len() > 1 {
            level = self.next_level(&mut nodes, &level)?;
            height += 1;
        }

        Ok(Tree::from_parts(nodes, level[0], height, leaves))
    }

    /// Pair up `children` left to right, promoting an odd tail.
    fn next_level(
        &self,
        nodes: &mut Vec<Node>,
        children: &[NodeId],
    ) -> Result<Vec<NodeId>, CheckpointError> {
        let mut parents = Vec::with_capacity((children.len() + 1) / 2);

        for pair in children.chunks(2) {
            let parent = match *pair {
                [left, right] => {
                    let signature = self.combiner.combine(
                        nodes[left.index()].signature(),
                        nodes[right.index()].signature(),
                    );
                    ensure_wire_len(&signature, || {
                        format!("{} output", self.combiner.name())
                    })?;
                    Node::internal(signature, left, Some(right))
                }
                [only] => Node::internal(nodes[only.index()].signature().to_vec(), only, None),
                _ => unreachable!("chunks(2) yields one or two nodes"),
            };
            parents.push(push_node(nodes, parent));
        }

        Ok(parents)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn push_node(nodes: &mut Vec<Node>, node: Node) -> NodeId {
    let id = NodeId::new(nodes.len());
    nodes.push(node);
    id
}

fn ensure_wire_len(
    signature: &[u8],
    what: impl FnOnce() -> String,
) -> Result<(), CheckpointError> {
    if u32::try_from(signature.len()).is_err() {
        return Err(CheckpointError::invalid_input(format!(
            "{} is {} bytes, longer than a u32 length prefix allows",
            what(),
            signature.len()
        )));
    }
    Ok(())
}
