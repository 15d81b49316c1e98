use merkle_checkpoint::{codec, tree::shape, CombinerKind, TreeBuilder};
use proptest::prelude::*;

fn leaf_sequences() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..48), 2..80)
}

/// Sequences of distinct 20-byte signatures, like an upstream SHA-1 producer.
fn distinct_digests() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::hash_set(proptest::collection::vec(any::<u8>(), 20), 2..40)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn shape_follows_leaf_count(leaves in leaf_sequences()) {
        let n = leaves.len();
        let tree = TreeBuilder::new().build(&leaves).expect("two or more leaves build");

        let ceil_log2 = (usize::BITS - (n - 1).leading_zeros()) as usize;
        prop_assert_eq!(tree.height(), ceil_log2);
        prop_assert_eq!(tree.node_count(), shape::level_widths(n).iter().sum::<usize>());
        let expected: Vec<&[u8]> = leaves.iter().map(Vec::as_slice).collect();
        prop_assert_eq!(tree.leaf_signatures(), expected);
    }

    #[test]
    fn build_is_deterministic(leaves in leaf_sequences()) {
        let builder = TreeBuilder::new();
        let first = builder.build(&leaves).expect("build succeeds");
        let second = builder.build(&leaves).expect("build succeeds");
        prop_assert_eq!(first.root_signature(), second.root_signature());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn roundtrip_preserves_tree(leaves in leaf_sequences(), blake in any::<bool>()) {
        let kind = if blake { CombinerKind::Blake3 } else { CombinerKind::Adler32 };
        let tree = TreeBuilder::with_kind(kind).build(&leaves).expect("build succeeds");
        let decoded = codec::decode(&codec::encode(&tree)).expect("decode succeeds");

        prop_assert_eq!(decoded.node_count(), tree.node_count());
        prop_assert_eq!(decoded.height(), tree.height());
        prop_assert_eq!(decoded.leaf_signatures(), tree.leaf_signatures());
        let original: Vec<_> = tree.breadth_first().map(|(_, n)| (n.kind(), n.signature())).collect();
        let restored: Vec<_> = decoded.breadth_first().map(|(_, n)| (n.kind(), n.signature())).collect();
        prop_assert_eq!(original, restored);
    }

    #[test]
    fn promoted_nodes_copy_their_child(leaves in leaf_sequences()) {
        let tree = TreeBuilder::new().build(&leaves).expect("build succeeds");
        for (_, node) in tree.breadth_first().filter(|(_, node)| node.is_promoted()) {
            let child = tree.node(node.left().expect("promoted node has a left child"));
            prop_assert_eq!(node.signature(), child.signature());
        }
        prop_assert!(tree.verify(CombinerKind::Adler32.instantiate().as_ref()).is_ok());
    }

    #[test]
    fn swapping_leaves_changes_root(
        leaves in distinct_digests(),
        picks in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
    ) {
        let (i, j) = (picks.0.index(leaves.len()), picks.1.index(leaves.len()));
        prop_assume!(i != j);

        let builder = TreeBuilder::with_kind(CombinerKind::Blake3);
        let original = builder.build(&leaves).expect("build succeeds");
        let mut swapped = leaves.clone();
        swapped.swap(i, j);
        let reordered = builder.build(&swapped).expect("build succeeds");

        prop_assert!(!original.same_root(&reordered));
    }

    #[test]
    fn default_combiner_catches_in_pair_swap(
        leaves in distinct_digests(),
        pick in any::<prop::sample::Index>(),
    ) {
        // Adler-32 sees an in-pair swap only through the byte sums
        let k = pick.index(leaves.len() / 2) * 2;
        let sum = |sig: &[u8]| sig.iter().map(|&b| u32::from(b)).sum::<u32>();
        prop_assume!(sum(&leaves[k]) != sum(&leaves[k + 1]));

        let builder = TreeBuilder::new();
        let original = builder.build(&leaves).expect("build succeeds");
        let mut swapped = leaves.clone();
        swapped.swap(k, k + 1);
        let reordered = builder.build(&swapped).expect("build succeeds");

        prop_assert!(!original.same_root(&reordered));
    }

    #[test]
    fn default_combiner_catches_dropped_leaf(
        leaves in distinct_digests(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(leaves.len() >= 3);

        let builder = TreeBuilder::new();
        let original = builder.build(&leaves).expect("build succeeds");
        let mut shorter = leaves.clone();
        shorter.remove(pick.index(leaves.len()));
        let dropped = builder.build(&shorter).expect("build succeeds");

        prop_assert!(!original.same_root(&dropped));
    }

    #[test]
    fn truncated_buffers_never_decode(leaves in leaf_sequences(), cut in any::<prop::sample::Index>()) {
        let bytes = codec::encode(&TreeBuilder::new().build(&leaves).expect("build succeeds"));
        let len = cut.index(bytes.len());
        prop_assert!(codec::decode(&bytes[..len]).is_err());
    }
}
