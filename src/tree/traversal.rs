//! Breadth-first traversal
//!
//! Level order, left to right; only existing children are enqueued, so a
//! promoted node contributes a single child. This is the order the codec
//! writes records in and the order tree equality is defined over.

use std::collections::VecDeque;

use super::{Node, NodeId, Tree};

/// Iterator over `(id, node)` pairs in breadth-first order.
#[derive(Debug)]
pub struct BreadthFirst<'a> {
    tree: &'a Tree,
    queue: VecDeque<NodeId>,
}

impl<'a> BreadthFirst<'a> {
    pub(crate) fn new(tree: &'a Tree) -> Self {
        let mut queue = VecDeque::with_capacity(tree.node_count() / 2 + 1);
        queue.push_back(tree.root_id());
        Self { tree, queue }
    }
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let node = self.tree.node(id);
        self.queue.extend(node.children());
        Some((id, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every queued node is still ahead; its descendants may be too
        (self.queue.len(), Some(self.tree.node_count()))
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{NodeKind, TreeBuilder};

    #[test]
    fn test_visits_every_node_once() {
        let tree = TreeBuilder::new()
            .build(["s1", "s2", "s3", "s4", "s5"])
            .expect("five leaves build");
        let ids: Vec<_> = tree.breadth_first().map(|(id, _)| id).collect();

        assert_eq!(ids.len(), tree.node_count());
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }

    #[test]
    fn test_level_order() {
        let tree = TreeBuilder::new()
            .build(["s1", "s2", "s3"])
            .expect("three leaves build");
        let kinds: Vec<_> = tree.breadth_first().map(|(_, node)| node.kind()).collect();

        // root, two parents, three leaves
        assert_eq!(
            kinds,
            vec![
                NodeKind::Internal,
                NodeKind::Internal,
                NodeKind::Internal,
                NodeKind::Leaf,
                NodeKind::Leaf,
                NodeKind::Leaf,
            ]
        );

        let leaves: Vec<_> = tree
            .breadth_first()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.signature().to_vec())
            .collect();
        assert_eq!(leaves, vec![b"s1".to_vec(), b"s2".to_vec(), b"s3".to_vec()]);
    }
}
