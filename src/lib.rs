//! # Order-Sensitive Signature Checkpoints
//!
//! This library folds an ordered sequence of pre-computed signatures into a
//! binary checksum tree and ships that tree as a compact binary artifact.
//! A consumer that rebuilds the tree from the signatures it observed can
//! detect loss or reordering by comparing root signatures.
//!
//! The default [`Adler32Combiner`] is tuned for throughput. It flags
//! dropped signatures and in-pair swaps of signatures whose byte sums
//! differ, but a swap across
//! pairs leaves the root unchanged in roughly 0.1–0.4% of cases for
//! hex-encoded leaves. Build with [`Blake3Combiner`]
//! (`TreeBuilder::with_kind(CombinerKind::Blake3)`) when every reordering
//! must change the root.
//!
//! ## Core Algorithm
//!
//! 1. **Leaf level**: every input signature becomes a leaf, in input order
//! 2. **Pairing**: adjacent nodes are combined left-to-right, `combine(l, r)`
//! 3. **Promotion**: an odd trailing node is lifted unchanged into a
//!    single-child parent
//! 4. **Codec**: the finished tree is written breadth-first, one
//!    length-prefixed record per node
//!
//! ## Usage Example
//!
//! ```
//! use merkle_checkpoint::{codec, TreeBuilder};
//!
//! let tree = TreeBuilder::new().build(["a1f3", "b7c2", "c9d0", "d4e5"])?;
//! assert_eq!(tree.node_count(), 7);
//! assert_eq!(tree.height(), 2);
//!
//! let bytes = codec::encode(&tree);
//! let decoded = codec::decode(&bytes)?;
//! assert!(decoded.same_root(&tree));
//! # Ok::<(), merkle_checkpoint::CheckpointError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod codec;      // Breadth-first wire format
pub mod combiner;   // Pluggable signature combining functions
pub mod tree;       // Arena-backed checksum tree and builder

// Re-exports for convenience
pub use codec::{Codec, CodecConfig, FormatError, MAGIC};
pub use combiner::{Adler32Combiner, Blake3Combiner, Combiner, CombinerKind};
pub use tree::{Node, NodeId, NodeKind, Tree, TreeBuilder};

use thiserror::Error;

/// Errors surfaced by tree construction, decoding and verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    /// Builder input cannot form a tree
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Encoded bytes are malformed or truncated
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// An internal node disagrees with the signature derived from its children
    #[error("signature mismatch at breadth-first position {position}")]
    SignatureMismatch {
        /// Breadth-first index of the offending node (root = 0)
        position: usize,
    },
}

impl CheckpointError {
    /// Helper for constructing builder input errors.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CheckpointError::InvalidInput(msg.into())
    }
}

/// Convenient alias for results carrying a [`CheckpointError`].
pub type Result<T> = std::result::Result<T, CheckpointError>;

/// Build a tree with the default [`Adler32Combiner`].
pub fn build<I, S>(leaf_signatures: I) -> Result<Tree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    TreeBuilder::new().build(leaf_signatures)
}
