//! Level arithmetic for pairing-with-promotion trees
//!
//! width(level 0) = n leaves
//! width(level k + 1) = ⌈width(level k) / 2⌉
//!
//! The shape depends only on the leaf count, which lets the decoder know
//! how many children every parent owns without storing indices.

/// Level widths from the leaves up to the root.
///
/// `level_widths(9) == [9, 5, 3, 2, 1]`. Empty for zero leaves.
pub fn level_widths(leaf_count: usize) -> Vec<usize> {
    let mut widths = Vec::new();
    if leaf_count == 0 {
        return widths;
    }

    let mut width = leaf_count;
    widths.push(width);
    while width > 1 {
        width = (width + 1) / 2;
        widths.push(width);
    }
    widths
}

/// Total nodes across all levels for `leaf_count` leaves.
pub fn total_nodes(leaf_count: usize) -> usize {
    level_widths(leaf_count)
        .into_iter()
        .fold(0usize, |acc, width| acc.saturating_add(width))
}

/// Number of levels above the leaves: ⌈log2(n)⌉.
pub fn height_for(leaf_count: usize) -> usize {
    level_widths(leaf_count).len().saturating_sub(1)
}

/// Invert [`total_nodes`]: the leaf count (≥ 2) producing exactly
/// `node_count` nodes, if any.
///
/// `total_nodes` is strictly increasing in the leaf count, so a binary
/// search over `[2, node_count)` settles it.
pub fn leaf_count_for(node_count: usize) -> Option<usize> {
    if node_count < total_nodes(2) {
        return None;
    }

    let (mut lo, mut hi) = (2usize, node_count);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if total_nodes(mid) < node_count {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    (total_nodes(lo) == node_count).then_some(lo)
}

/// Children owned by the parent at `position` when the level below holds
/// `child_width` nodes: two, or one for a promoted tail.
#[inline]
pub fn children_of(position: usize, child_width: usize) -> usize {
    child_width.saturating_sub(2 * position).min(2)
}
