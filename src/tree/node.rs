//! Arena node representation
//!
//! Node = (kind, signature, left?, right?)
//!   Leaf:     no children
//!   Internal: left always present, right absent only when promoted

use std::fmt;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a node wraps an input signature or derives one from children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum NodeKind {
    /// Externally supplied signature, no children
    Leaf,
    /// Signature derived from one or two children
    Internal,
}

impl NodeKind {
    /// Wire tag for leaves.
    pub const LEAF_TAG: u8 = 0x00;
    /// Wire tag for internal nodes.
    pub const INTERNAL_TAG: u8 = 0x01;

    /// Encode as the single-byte wire tag.
    #[inline]
    pub fn to_tag(self) -> u8 {
        match self {
            NodeKind::Leaf => Self::LEAF_TAG,
            NodeKind::Internal => Self::INTERNAL_TAG,
        }
    }

    /// Decode a wire tag; `None` for anything but 0 or 1.
    #[inline]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            Self::LEAF_TAG => Some(NodeKind::Leaf),
            Self::INTERNAL_TAG => Some(NodeKind::Internal),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf => write!(f, "leaf"),
            NodeKind::Internal => write!(f, "internal"),
        }
    }
}

/// Single tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Node {
    kind: NodeKind,
    signature: Vec<u8>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    pub(crate) fn leaf(signature: Vec<u8>) -> Self {
        Self {
            kind: NodeKind::Leaf,
            signature,
            left: None,
            right: None,
        }
    }

    /// Internal node with its children already known (bottom-up construction).
    pub(crate) fn internal(signature: Vec<u8>, left: NodeId, right: Option<NodeId>) -> Self {
        Self {
            kind: NodeKind::Internal,
            signature,
            left: Some(left),
            right,
        }
    }

    /// Childless node of either kind for top-down decoding. Internal nodes
    /// receive their children through [`Node::attach`]; leaves stay as they are.
    pub(crate) fn detached(kind: NodeKind, signature: Vec<u8>) -> Self {
        Self {
            kind,
            signature,
            left: None,
            right: None,
        }
    }

    /// Fill `left` if empty, otherwise `right`.
    pub(crate) fn attach(&mut self, child: NodeId) {
        debug_assert_eq!(self.kind, NodeKind::Internal, "leaves never take children");
        if self.left.is_none() {
            self.left = Some(child);
        } else {
            debug_assert!(self.right.is_none(), "both child slots already filled");
            self.right = Some(child);
        }
    }

    /// Node kind.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Signature bytes.
    #[inline]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Left child, present on every internal node.
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child, absent on leaves and promoted nodes.
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Check if leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// Internal node carrying its only child's signature forward.
    #[inline]
    pub fn is_promoted(&self) -> bool {
        self.kind == NodeKind::Internal && self.right.is_none()
    }

    /// Existing children, left first.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, hex::encode(&self.signature))?;
        if self.is_promoted() {
            write!(f, " (promoted)")?;
        }
        Ok(())
    }
}
