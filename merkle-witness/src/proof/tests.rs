use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{config::TreeConfig, hash::HashAlgorithm, verify_proof};

fn tree_of(count: usize) -> MerkleTree {
    let leaves: Vec<String> = (0..count).map(|i| format!("leaf-{}", i)).collect();
    MerkleTree::build(leaves.as_slice(), &TreeConfig::default())
        .unwrap()
        .expect("build should succeed")
}

fn flip_hex_char(c: char) -> char {
    if c == '0' { '1' } else { '0' }
}

#[test]
fn test_every_leaf_round_trips_up_to_twenty() {
    for count in 1..=20 {
        let tree = tree_of(count);
        for leaf in tree.leaves() {
            let path = tree.generate_proof(leaf).expect("leaf is present");
            assert_eq!(path.len(), tree.height(), "count {}", count);
            assert!(
                verify_proof(&path, leaf, tree.root()),
                "leaf {} of {}",
                leaf,
                count
            );
        }
    }
}

#[test]
fn test_reference_proof_for_test3() {
    let leaves = ["test1", "test2", "test3", "test4", "test5"];
    let tree = MerkleTree::build(&leaves, &TreeConfig::default())
        .unwrap()
        .expect("build");
    let path = tree.generate_proof("test3").expect("proof");
    let observed: Vec<(&str, WitnessSide)> = path
        .iter()
        .map(|w| (w.witness_hash.as_str(), w.witness_index))
        .collect();
    assert_eq!(
        observed,
        vec![
            (
                "a4e624d686e03ed2767c0abd85c14426b0b1157d2ce81d27bb4fe4f6f01d688a",
                WitnessSide::Right
            ),
            (
                "2f297f1520dfd4d6a9b680536568fd3aad16a8c2d7067b654ea06dd931bccd51",
                WitnessSide::Left
            ),
            (
                "9c9ead8b820cb402c29345f1282a6ab00fa23b6f3f9b23cff537d7c6acb2c8ac",
                WitnessSide::Right
            ),
        ]
    );
    assert!(verify_proof(&path, "test3", tree.root()));

    for other in [tree_of(5), tree_of(4)] {
        assert!(!verify_proof(&path, "test3", other.root()));
    }
}

#[test]
fn test_padded_leaf_pairs_with_itself() {
    let tree = tree_of(5);
    let path = tree.generate_proof("leaf-4").expect("proof");
    let own_digest = HashAlgorithm::Sha256.hash(b"leaf-4");
    assert_eq!(path.witnesses()[0].witness_hash, own_digest);
    assert_eq!(path.witnesses()[0].witness_index, WitnessSide::Right);
    assert!(verify_proof(&path, "leaf-4", tree.root()));
}

#[test]
fn test_missing_leaf() {
    let tree = tree_of(3);
    assert_matches!(tree.generate_proof("leaf-3"), Err(Error::LeafNotFound));
    assert_matches!(tree.generate_proof(""), Err(Error::LeafNotFound));
}

#[test]
fn test_any_flipped_hex_char_breaks_the_proof() {
    let tree = tree_of(7);
    let path = tree.generate_proof("leaf-2").expect("proof");
    for w in 0..path.len() {
        for c in 0..crate::DIGEST_HEX_LEN {
            let mut witnesses = path.clone().into_inner();
            let mut chars: Vec<char> = witnesses[w].witness_hash.as_str().chars().collect();
            chars[c] = flip_hex_char(chars[c]);
            witnesses[w].witness_hash =
                Digest::from_hex(chars.into_iter().collect::<String>()).expect("still hex");
            let tampered = WitnessPath::new(witnesses);
            assert!(
                !verify_proof(&tampered, "leaf-2", tree.root()),
                "witness {} char {}",
                w,
                c
            );
        }
    }
}

#[test]
fn test_any_flipped_side_breaks_the_proof() {
    let tree = tree_of(9);
    let path = tree.generate_proof("leaf-5").expect("proof");
    for w in 0..path.len() {
        let mut witnesses = path.clone().into_inner();
        witnesses[w].witness_index = match witnesses[w].witness_index {
            WitnessSide::Left => WitnessSide::Right,
            WitnessSide::Right => WitnessSide::Left,
        };
        assert!(!verify_proof(
            &WitnessPath::from(witnesses),
            "leaf-5",
            tree.root()
        ));
    }
}

#[test]
fn test_substituted_root_or_leaf_fails() {
    let tree = tree_of(6);
    let path = tree.generate_proof("leaf-0").expect("proof");
    let other_root = tree_of(7).root().clone();
    assert!(!verify_proof(&path, "leaf-0", &other_root));
    assert!(!verify_proof(&path, "leaf-1", tree.root()));
}

#[test]
fn test_generation_reports_layout_mismatch() {
    let good = tree_of(3);
    let short = MerkleTree::from_parts_unchecked(
        good.leaves().to_vec(),
        good.nodes()[..3].to_vec(),
        good.root().clone(),
    );
    assert_matches!(
        short.generate_proof("leaf-2"),
        Err(Error::InternalInconsistency(_))
    );

    let mut padded_nodes = good.nodes().to_vec();
    padded_nodes.push(good.root().clone());
    let long = MerkleTree::from_parts_unchecked(
        good.leaves().to_vec(),
        padded_nodes,
        good.root().clone(),
    );
    let err = long.generate_proof("leaf-0").expect_err("root is misplaced");
    assert_eq!(err.kind().as_str(), "internal_inconsistency");
}

#[test]
fn test_side_conversions() {
    assert_eq!(u8::from(WitnessSide::Left), 0);
    assert_eq!(u8::from(WitnessSide::Right), 1);
    assert_eq!(WitnessSide::try_from(1u8), Ok(WitnessSide::Right));
    assert_matches!(WitnessSide::try_from(2u8), Err(Error::InvalidData(_)));
}

#[test]
fn test_decode_rejects_overlong_path() {
    let witness = Witness {
        witness_hash: HashAlgorithm::Sha256.hash(b"w"),
        witness_index: WitnessSide::Left,
    };
    let path = WitnessPath::new(vec![witness; MAX_PATH_LEN + 1]);
    let bytes = path.encode_to_vec().expect("encode");
    assert_matches!(
        WitnessPath::decode_from_slice(&bytes),
        Err(Error::InvalidData(_))
    );
}

proptest! {
    #[test]
    fn test_random_leaf_sets_round_trip(
        leaves in prop::collection::btree_set("[a-z0-9]{1,12}", 1..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let leaves: Vec<String> = leaves.into_iter().collect();
        let tree = MerkleTree::build(leaves.as_slice(), &TreeConfig::default())
            .unwrap()
            .expect("unique non-empty leaves build");
        let target = pick.get(&leaves);
        let path = tree.generate_proof(target).expect("leaf is present");
        prop_assert_eq!(path.len(), tree.height());
        prop_assert!(verify_proof(&path, target, tree.root()));
        let other = format!("{}!", target);
        prop_assert!(!verify_proof(&path, &other, tree.root()));
    }
}
