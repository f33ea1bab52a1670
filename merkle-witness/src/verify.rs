use merkle_witness_costs::{CostContext, CostsExt, OperationCost};

use crate::{
    hash::{Digest, HashAlgorithm},
    proof::{WitnessPath, WitnessSide},
};

impl WitnessPath {
    /// Fold the path over `leaf` and return the root it commits to.
    ///
    /// Costs one byte hash for the leaf and one node hash per witness.
    pub fn calculate_root(&self, leaf: &str, algorithm: HashAlgorithm) -> CostContext<Digest> {
        let mut cost = OperationCost::with_hash_byte_calls(1);
        let mut current = algorithm.hash(leaf.as_bytes());

        for witness in self.iter() {
            current = match witness.witness_index {
                WitnessSide::Left => algorithm.hash_pair(&witness.witness_hash, &current),
                WitnessSide::Right => algorithm.hash_pair(&current, &witness.witness_hash),
            };
            cost.hash_node_calls += 1;
        }

        current.wrap_with_cost(cost)
    }

    /// True if this path proves `leaf` is committed to by `claimed_root`.
    ///
    /// The full path is always folded and the final comparison is
    /// constant-time, so a failing proof costs the same as a passing one.
    pub fn verify(
        &self,
        leaf: &str,
        claimed_root: &Digest,
        algorithm: HashAlgorithm,
    ) -> CostContext<bool> {
        self.calculate_root(leaf, algorithm).map(|computed| {
            let valid = computed.ct_eq(claimed_root);
            tracing::trace!(path_len = self.len(), valid, "verified witness path");
            valid
        })
    }
}
