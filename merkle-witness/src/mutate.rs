//! Leaf additions and removals. Both rebuild the whole tree.

use merkle_witness_costs::{
    cost_return_on_error, cost_return_on_error_no_add, CostResult, CostsExt, OperationCost,
};

use crate::{config::TreeConfig, leaves::LeafBatch, tree::MerkleTree, Error};

impl MerkleTree {
    /// Append `batch` after the existing leaves and rebuild.
    ///
    /// Fails with [`Error::DuplicatedLeaves`] if a new leaf equals an
    /// existing one or another new leaf.
    pub fn add_leaves(
        &self,
        batch: impl Into<LeafBatch>,
        config: &TreeConfig,
    ) -> CostResult<MerkleTree, Error> {
        let mut cost = OperationCost::default();
        let batch = batch.into();
        let mut combined = Vec::with_capacity(self.leaf_count() + batch.len());
        combined.extend_from_slice(self.leaves());
        combined.extend(batch.into_vec());

        tracing::debug!(
            existing = self.leaf_count(),
            added = combined.len() - self.leaf_count(),
            "adding leaves"
        );
        let tree = cost_return_on_error!(
            &mut cost,
            MerkleTree::build(combined.as_slice(), config)
        );
        Ok(tree).wrap_with_cost(cost)
    }

    /// Drop every leaf equal to a member of `batch` and rebuild.
    ///
    /// Batch members that are not leaves are ignored. Fails with
    /// [`Error::NoLeafToRemove`] if no leaf would remain.
    pub fn remove_leaves(
        &self,
        batch: impl Into<LeafBatch>,
        config: &TreeConfig,
    ) -> CostResult<MerkleTree, Error> {
        let mut cost = OperationCost::default();
        let batch = batch.into();
        let remaining: Vec<String> = self
            .leaves()
            .iter()
            .filter(|leaf| !batch.as_slice().contains(*leaf))
            .cloned()
            .collect();

        tracing::debug!(
            existing = self.leaf_count(),
            removed = self.leaf_count() - remaining.len(),
            "removing leaves"
        );
        cost_return_on_error_no_add!(
            &cost,
            if remaining.is_empty() {
                Err(Error::NoLeafToRemove)
            } else {
                Ok(())
            }
        );
        let tree = cost_return_on_error!(
            &mut cost,
            MerkleTree::build(remaining.as_slice(), config)
        );
        Ok(tree).wrap_with_cost(cost)
    }
}
