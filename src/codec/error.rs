use thiserror::Error;

use crate::NodeKind;

/// Reasons a byte buffer cannot be decoded into a tree.
///
/// Positions are breadth-first record indices (root = 0); offsets are byte
/// offsets into the buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Buffer ended before a field could be read.
    #[error("truncated {field} at offset {offset}: need {needed} bytes, {remaining} remain")]
    Truncated {
        /// Field being read.
        field: &'static str,
        /// Offset where the field starts.
        offset: usize,
        /// Bytes the field requires.
        needed: u64,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// Leading magic number did not match.
    #[error("bad magic {found:#010x}, expected {expected:#010x}", expected = super::MAGIC)]
    BadMagic {
        /// Value found in the buffer.
        found: u32,
    },

    /// Node count does not describe any buildable tree.
    #[error("node count {node_count} does not match any tree shape")]
    InvalidNodeCount {
        /// Declared node count.
        node_count: u32,
    },

    /// Kind tag other than leaf (0) or internal (1).
    #[error("unknown node kind tag {tag:#04x} in record {position}")]
    UnknownKind {
        /// Record index.
        position: usize,
        /// Tag byte found.
        tag: u8,
    },

    /// Record kind contradicts the level it lands on.
    #[error("record {position} is a {found} node where a {expected} node belongs")]
    UnexpectedKind {
        /// Record index.
        position: usize,
        /// Kind required by the tree shape.
        expected: NodeKind,
        /// Kind found in the buffer.
        found: NodeKind,
    },

    /// Promoted node does not carry its only child's signature.
    #[error("promoted record {position} differs from its child's signature")]
    PromotionMismatch {
        /// Record index of the promoted parent.
        position: usize,
    },

    /// Declared value exceeds the configured decode limit.
    #[error("{field} of {value} exceeds limit {limit}")]
    LimitExceeded {
        /// Field being checked.
        field: &'static str,
        /// Declared value.
        value: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// Bytes remained after the final record.
    #[error("{remaining} trailing bytes after offset {consumed}")]
    TrailingBytes {
        /// Bytes consumed by the decoder.
        consumed: usize,
        /// Bytes left over.
        remaining: usize,
    },
}
