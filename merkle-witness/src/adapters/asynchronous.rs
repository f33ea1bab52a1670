//! `async` wrappers that run the core on tokio's blocking pool.
//!
//! Inputs are taken by value so they can move onto the worker thread. If
//! the worker panics or is cancelled the call returns
//! [`Error::WorkerFailed`].

use tokio::task::{self, JoinError};

use crate::{Digest, Error, LeafBatch, MerkleTree, Result, WitnessPath};

async fn run_blocking<T, F>(operation: &'static str, f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| worker_failed(operation, e))
}

fn worker_failed(operation: &str, error: JoinError) -> Error {
    tracing::error!(operation, error = %error, "merkle worker task failed");
    Error::WorkerFailed(format!("{}: {}", operation, error))
}

/// [`crate::build_tree`] on the blocking pool.
pub async fn build_tree(leaves: Vec<String>) -> Result<MerkleTree> {
    run_blocking("build_tree", move || crate::build_tree(leaves.as_slice())).await?
}

/// [`crate::add_leaf`] on the blocking pool.
pub async fn add_leaf(tree: MerkleTree, leaves: impl Into<LeafBatch>) -> Result<MerkleTree> {
    let batch = leaves.into();
    run_blocking("add_leaf", move || crate::add_leaf(&tree, batch)).await?
}

/// [`crate::remove_leaf`] on the blocking pool.
pub async fn remove_leaf(tree: MerkleTree, leaves: impl Into<LeafBatch>) -> Result<MerkleTree> {
    let batch = leaves.into();
    run_blocking("remove_leaf", move || crate::remove_leaf(&tree, batch)).await?
}

/// [`crate::generate_proof`] on the blocking pool.
pub async fn generate_proof(tree: MerkleTree, target: String) -> Result<WitnessPath> {
    run_blocking("generate_proof", move || {
        crate::generate_proof(&tree, &target)
    })
    .await?
}

/// [`crate::verify_proof`] on the blocking pool. `Ok(false)` is a proof
/// that does not verify; `Err` only reports a failed worker.
pub async fn verify_proof(path: WitnessPath, target: String, claimed_root: Digest) -> Result<bool> {
    run_blocking("verify_proof", move || {
        crate::verify_proof(&path, &target, &claimed_root)
    })
    .await
}
