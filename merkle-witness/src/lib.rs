//! Binary Merkle hash tree with inclusion proofs.
//!
//! A [`MerkleTree`] commits to an ordered sequence of unique string leaves.
//! Every level is kept in one flattened array, leaves first, and any level
//! with an odd number of nodes (other than the root) is padded by repeating
//! its last node. A parent digest is the hash of the concatenated *hex text*
//! of its two children:
//!
//! `parent = H(hex(left) || hex(right))`
//!
//! A [`WitnessPath`] proves that one leaf is part of the tree. It can be
//! checked against a root alone, without the tree.
//!
//! ```
//! let tree = merkle_witness::build_tree(&["test1", "test2", "test3"]).unwrap();
//! let path = merkle_witness::generate_proof(&tree, "test2").unwrap();
//! assert!(merkle_witness::verify_proof(&path, "test2", tree.root()));
//! ```
//!
//! The free functions use [`TreeConfig::default`]. The methods on
//! [`MerkleTree`] and [`WitnessPath`] take an explicit configuration and
//! report the hashing work they did as an [`OperationCost`].

#![warn(missing_docs)]

pub mod adapters;
mod config;
mod error;
mod hash;
pub mod layout;
mod leaves;
mod mutate;
mod proof;
mod tree;
mod verify;


pub use config::{TreeConfig, HASH_ALGORITHM_ENV, MAX_LEAF_SIZE, MAX_LEAF_SIZE_ENV};
pub use error::{Error, ErrorKind, Result};
pub use hash::{Digest, HashAlgorithm, DIGEST_HEX_LEN, DIGEST_LEN};
pub use leaves::{first_duplicate, has_duplicates, LeafBatch};
pub use merkle_witness_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use proof::{Witness, WitnessPath, WitnessSide};
pub use tree::MerkleTree;

/// Build a tree over `leaves` with the default configuration.
pub fn build_tree<S: AsRef<str>>(leaves: &[S]) -> Result<MerkleTree> {
    MerkleTree::build(leaves, &TreeConfig::default()).value
}

/// Return a new tree with `leaves` appended.
pub fn add_leaf(tree: &MerkleTree, leaves: impl Into<LeafBatch>) -> Result<MerkleTree> {
    tree.add_leaves(leaves, &TreeConfig::default()).value
}

/// Return a new tree without any of `leaves`.
pub fn remove_leaf(tree: &MerkleTree, leaves: impl Into<LeafBatch>) -> Result<MerkleTree> {
    tree.remove_leaves(leaves, &TreeConfig::default()).value
}

/// Witness path for `target` in `tree`.
pub fn generate_proof(tree: &MerkleTree, target: &str) -> Result<WitnessPath> {
    tree.generate_proof(target)
}

/// True if `path` proves `target` is committed to by `claimed_root`.
pub fn verify_proof(path: &WitnessPath, target: &str, claimed_root: &Digest) -> bool {
    path.verify(target, claimed_root, HashAlgorithm::default()).value
}
