//! Breadth-first wire format
//!
//! ```text
//! MAGIC       u32 = 0xCDAACE99
//! NODE_COUNT  u32
//! NODE_COUNT × {
//!     KIND       u8     0 = leaf, 1 = internal
//!     SIG_LEN    u32
//!     SIGNATURE  [SIG_LEN]u8
//! }
//! ```
//!
//! All integers are big-endian with no padding. Records follow the tree's
//! level order; because the shape is fixed by the leaf count, the decoder
//! reattaches parents and children without explicit indices. `SIG_LEN` is
//! per record since promoted nodes may carry leaf-length signatures while
//! combined nodes carry the combiner's width.

mod config;
mod error;
mod reader;

pub use config::CodecConfig;
pub use error::FormatError;

use std::collections::VecDeque;

use reader::ByteReader;

use crate::tree::{shape, Node, NodeId, NodeKind, Tree};
use crate::CheckpointError;

/// Leading magic number of every encoded tree.
pub const MAGIC: u32 = 0xCDAA_CE99;

/// MAGIC + NODE_COUNT.
pub const HEADER_LEN: usize = 8;

/// KIND + SIG_LEN, the smallest possible record.
pub const RECORD_HEADER_LEN: usize = 5;

/// Encoder/decoder pair sharing one [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Codec with explicit decode limits.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serialize `tree` in breadth-first order.
    pub fn encode(&self, tree: &Tree) -> Vec<u8> {
        encode(tree)
    }

    /// Reconstruct a tree from `bytes`, enforcing this codec's limits.
    ///
    /// Never yields a partial tree: any malformed input fails the whole call
    /// with [`CheckpointError::Format`].
    pub fn decode(&self, bytes: &[u8]) -> Result<Tree, CheckpointError> {
        Ok(Decoder::new(bytes, &self.config).run()?)
    }
}

/// Exact encoded size of `tree`.
pub fn encoded_len(tree: &Tree) -> usize {
    tree.breadth_first().fold(HEADER_LEN, |acc, (_, node)| {
        acc + RECORD_HEADER_LEN + node.signature().len()
    })
}

/// Serialize `tree` in breadth-first order.
pub fn encode(tree: &Tree) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(tree));
    out.extend_from_slice(&MAGIC.to_be_bytes());
    // Builder guarantees the node count and every signature length fit in u32
    out.extend_from_slice(&(tree.node_count() as u32).to_be_bytes());

    for (_, node) in tree.breadth_first() {
        out.push(node.kind().to_tag());
        out.extend_from_slice(&(node.signature().len() as u32).to_be_bytes());
        out.extend_from_slice(node.signature());
    }
    out
}

/// Decode with [`CodecConfig::default`] limits.
pub fn decode(bytes: &[u8]) -> Result<Tree, CheckpointError> {
    Codec::default().decode(bytes)
}

/// Node awaiting children during reconstruction.
#[derive(Debug, Clone, Copy)]
struct Pending {
    id: NodeId,
    /// Record index, for error reporting
    position: usize,
    /// Distance from the root
    depth: usize,
    /// Children implied by the tree shape (1 when promoted)
    slots: usize,
    filled: usize,
}

/// Single-pass reconstruction state.
struct Decoder<'a> {
    reader: ByteReader<'a>,
    config: &'a CodecConfig,
    nodes: Vec<Node>,
}

impl<'a> Decoder<'a> {
    fn new(bytes: &'a [u8], config: &'a CodecConfig) -> Self {
        Self {
            reader: ByteReader::new(bytes),
            config,
            nodes: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Tree, FormatError> {
        let magic = self.reader.read_u32("magic")?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic { found: magic });
        }

        let declared = self.reader.read_u32("node count")?;
        if declared > self.config.max_node_count {
            return Err(FormatError::LimitExceeded {
                field: "node count",
                value: u64::from(declared),
                limit: u64::from(self.config.max_node_count),
            });
        }
        // Reject impossible counts before allocating for them
        self.reader
            .require(u64::from(declared) * RECORD_HEADER_LEN as u64, "node records")?;

        let node_count = declared as usize;
        let leaf_count = shape::leaf_count_for(node_count)
            .ok_or(FormatError::InvalidNodeCount { node_count: declared })?;
        // Top-down: widths[0] is the root level, widths[height] the leaves
        let widths: Vec<usize> = shape::level_widths(leaf_count).into_iter().rev().collect();
        let height = widths.len() - 1;

        self.nodes.reserve_exact(node_count);
        let mut leaves = Vec::with_capacity(leaf_count);
        let mut next_in_level = vec![0usize; widths.len()];
        let mut queue: VecDeque<Pending> = VecDeque::with_capacity(widths[height - 1] + 1);

        let root = self.read_node(0, NodeKind::Internal)?;
        next_in_level[0] = 1;
        queue.push_back(Pending {
            id: root,
            position: 0,
            depth: 0,
            slots: shape::children_of(0, widths[1]),
            filled: 0,
        });

        let mut deepest = 0;
        for position in 1..node_count {
            let Some(parent) = queue.front_mut() else {
                return Err(FormatError::InvalidNodeCount { node_count: declared });
            };
            let depth = parent.depth + 1;
            let expected = if depth == height {
                NodeKind::Leaf
            } else {
                NodeKind::Internal
            };

            let child = self.read_node(position, expected)?;
            self.nodes[parent.id.index()].attach(child);
            parent.filled += 1;

            let parent = *parent;
            if parent.slots == 1
                && self.nodes[parent.id.index()].signature() != self.nodes[child.index()].signature()
            {
                return Err(FormatError::PromotionMismatch {
                    position: parent.position,
                });
            }
            if parent.filled == parent.slots {
                queue.pop_front();
            }

            deepest = deepest.max(depth);
            match expected {
                NodeKind::Leaf => leaves.push(child),
                NodeKind::Internal => {
                    let index = next_in_level[depth];
                    next_in_level[depth] += 1;
                    queue.push_back(Pending {
                        id: child,
                        position,
                        depth,
                        slots: shape::children_of(index, widths[depth + 1]),
                        filled: 0,
                    });
                }
            }
        }

        if !queue.is_empty() {
            return Err(FormatError::InvalidNodeCount { node_count: declared });
        }

        let remaining = self.reader.remaining();
        if remaining > 0 && !self.config.allow_trailing_bytes {
            return Err(FormatError::TrailingBytes {
                consumed: self.reader.position(),
                remaining,
            });
        }

        Ok(Tree::from_parts(self.nodes, root, deepest, leaves))
    }

    /// Read one record and append it to the arena as a childless node.
    fn read_node(&mut self, position: usize, expected: NodeKind) -> Result<NodeId, FormatError> {
        let tag = self.reader.read_u8("node kind")?;
        let kind = NodeKind::from_tag(tag).ok_or(FormatError::UnknownKind { position, tag })?;
        if kind != expected {
            return Err(FormatError::UnexpectedKind {
                position,
                expected,
                found: kind,
            });
        }

        let sig_len = self.reader.read_u32("signature length")?;
        if sig_len > self.config.max_signature_len {
            return Err(FormatError::LimitExceeded {
                field: "signature length",
                value: u64::from(sig_len),
                limit: u64::from(self.config.max_signature_len),
            });
        }
        let signature = self.reader.read_exact(sig_len as usize, "signature")?.to_vec();

        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::detached(kind, signature));
        Ok(id)
    }
}
