//! Continuation-passing wrappers. Each function calls `done` exactly once.

use crate::{Digest, LeafBatch, MerkleTree, Result, WitnessPath};

/// [`crate::build_tree`], reporting through `done`.
pub fn build_tree<S, F>(leaves: &[S], done: F)
where
    S: AsRef<str>,
    F: FnOnce(Result<MerkleTree>),
{
    done(crate::build_tree(leaves))
}

/// [`crate::add_leaf`], reporting through `done`.
pub fn add_leaf<F>(tree: &MerkleTree, leaves: impl Into<LeafBatch>, done: F)
where
    F: FnOnce(Result<MerkleTree>),
{
    done(crate::add_leaf(tree, leaves))
}

/// [`crate::remove_leaf`], reporting through `done`.
pub fn remove_leaf<F>(tree: &MerkleTree, leaves: impl Into<LeafBatch>, done: F)
where
    F: FnOnce(Result<MerkleTree>),
{
    done(crate::remove_leaf(tree, leaves))
}

/// [`crate::generate_proof`], reporting through `done`.
pub fn generate_proof<F>(tree: &MerkleTree, target: &str, done: F)
where
    F: FnOnce(Result<WitnessPath>),
{
    done(crate::generate_proof(tree, target))
}

/// [`crate::verify_proof`], reporting through `done`.
pub fn verify_proof<F>(path: &WitnessPath, target: &str, claimed_root: &Digest, done: F)
where
    F: FnOnce(bool),
{
    done(crate::verify_proof(path, target, claimed_root))
}
