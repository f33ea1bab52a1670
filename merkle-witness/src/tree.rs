use bincode::{Decode, Encode};
use merkle_witness_costs::{cost_return_on_error_no_add, CostResult, CostsExt, OperationCost};

use crate::{
    config::TreeConfig,
    hash::{Digest, HashAlgorithm},
    layout,
    leaves::{first_duplicate, validate_leaves},
    Error, Result,
};

/// An immutable binary Merkle tree over an ordered sequence of unique leaves.
///
/// Every level is stored, leaves first, in one flattened `Vec`. A level with
/// an odd number of nodes (other than the root) is padded by repeating its
/// last node, so a node may be paired with a copy of itself. Mutations
/// return a new tree.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MerkleTreeParts")
)]
pub struct MerkleTree {
    #[cfg_attr(feature = "serde", serde(rename = "tree"))]
    nodes: Vec<Digest>,
    root: Digest,
    #[cfg_attr(feature = "serde", serde(rename = "leavesArray"))]
    leaves: Vec<String>,
}

/// Unvalidated serialized form of a [`MerkleTree`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MerkleTreeParts {
    tree: Vec<Digest>,
    root: Digest,
    #[serde(rename = "leavesArray")]
    leaves_array: Vec<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<MerkleTreeParts> for MerkleTree {
    type Error = Error;

    fn try_from(parts: MerkleTreeParts) -> Result<Self> {
        MerkleTree::from_parts(parts.leaves_array, parts.tree, parts.root)
    }
}

impl MerkleTree {
    /// Build a tree over `leaves`.
    ///
    /// Fails if `leaves` is empty, holds a repeated value, or holds a value
    /// longer than `config.max_leaf_size()` bytes. The cost counts one byte
    /// hash per leaf and one node hash per parent.
    pub fn build<S: AsRef<str>>(leaves: &[S], config: &TreeConfig) -> CostResult<Self, Error> {
        let cost = OperationCost::default();
        cost_return_on_error_no_add!(&cost, validate_leaves(leaves, config));

        let owned = leaves.iter().map(|leaf| leaf.as_ref().to_owned()).collect();
        Self::build_validated(owned, config.hash_algorithm())
    }

    /// Build over leaves that already satisfy the leaf-set invariants.
    pub(crate) fn build_validated(
        leaves: Vec<String>,
        algorithm: HashAlgorithm,
    ) -> CostResult<Self, Error> {
        let mut cost = OperationCost::default();
        let mut nodes = Vec::with_capacity(layout::tree_len(leaves.len()));

        let mut level: Vec<Digest> = leaves
            .iter()
            .map(|leaf| algorithm.hash(leaf.as_bytes()))
            .collect();
        cost.hash_byte_calls += level.len() as u32;

        while level.len() > 1 {
            if let Some(last) = level.last().cloned() {
                level.resize(layout::padded_len(level.len()), last);
            }
            let parents: Vec<Digest> = level
                .chunks_exact(2)
                .map(|pair| algorithm.hash_pair(&pair[0], &pair[1]))
                .collect();
            cost.hash_node_calls += parents.len() as u32;
            nodes.append(&mut level);
            level = parents;
        }

        let Some(root) = level.first().cloned() else {
            return Err(Error::InvalidInput(
                "at least one leaf is required to build a tree".into(),
            ))
            .wrap_with_cost(cost);
        };
        nodes.append(&mut level);

        tracing::debug!(
            leaf_count = leaves.len(),
            node_count = nodes.len(),
            height = layout::height(leaves.len()),
            %algorithm,
            root = %root,
            "built merkle tree"
        );

        Ok(MerkleTree {
            nodes,
            root,
            leaves,
        })
        .wrap_with_cost(cost)
    }

    /// Reassemble a tree from its serialized parts without rehashing, using
    /// the default leaf size limit.
    ///
    /// Deserialization and [`decode_from_slice`](Self::decode_from_slice) go
    /// through here. Trees built with a larger limit must be loaded with
    /// [`from_parts_with_config`](Self::from_parts_with_config).
    pub fn from_parts(leaves: Vec<String>, nodes: Vec<Digest>, root: Digest) -> Result<Self> {
        Self::from_parts_with_config(leaves, nodes, root, &TreeConfig::default())
    }

    /// Reassemble a tree from its serialized parts without rehashing.
    ///
    /// Checks that the leaves are non-empty, unique and within
    /// `config.max_leaf_size()`, that the node count matches the layout
    /// implied by the leaf count, that every digest is well-formed and that
    /// `root` is the last node. Use
    /// [`check_integrity`](Self::check_integrity) to also recompute hashes.
    pub fn from_parts_with_config(
        leaves: Vec<String>,
        nodes: Vec<Digest>,
        root: Digest,
        config: &TreeConfig,
    ) -> Result<Self> {
        if leaves.is_empty() {
            return Err(Error::InvalidData("tree has no leaves".into()));
        }
        if let Some((index, leaf)) = leaves
            .iter()
            .enumerate()
            .find(|(_, leaf)| leaf.len() > config.max_leaf_size())
        {
            return Err(Error::LeafTooLarge {
                index,
                size: leaf.len(),
                max: config.max_leaf_size(),
            });
        }
        if let Some(leaf) = first_duplicate(leaves.as_slice()) {
            return Err(Error::InvalidData(format!(
                "leaf {:?} appears more than once",
                leaf
            )));
        }
        let expected_len = layout::tree_len(leaves.len());
        if nodes.len() != expected_len {
            return Err(Error::InvalidData(format!(
                "{} leaves need {} nodes, got {}",
                leaves.len(),
                expected_len,
                nodes.len()
            )));
        }
        for node in &nodes {
            node.validate()?;
        }
        root.validate()?;
        if nodes.last() != Some(&root) {
            return Err(Error::InvalidData(
                "root does not match the last node".into(),
            ));
        }
        Ok(MerkleTree {
            nodes,
            root,
            leaves,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(
        leaves: Vec<String>,
        nodes: Vec<Digest>,
        root: Digest,
    ) -> Self {
        MerkleTree {
            nodes,
            root,
            leaves,
        }
    }

    /// Rebuild from the leaves with `config` and compare every node.
    pub fn check_integrity(&self, config: &TreeConfig) -> CostResult<(), Error> {
        Self::build(self.leaves.as_slice(), config).flat_map_ok(|rebuilt| {
            let result = match self
                .nodes
                .iter()
                .zip(rebuilt.nodes.iter())
                .position(|(stored, expected)| stored != expected)
            {
                None if self.nodes.len() == rebuilt.nodes.len() => Ok(()),
                None => Err(Error::InvalidData(format!(
                    "tree has {} nodes, expected {}",
                    self.nodes.len(),
                    rebuilt.nodes.len()
                ))),
                Some(position) => Err(Error::InvalidData(format!(
                    "node at position {} does not match its recomputed hash",
                    position
                ))),
            };
            result.wrap_with_cost(OperationCost::default())
        })
    }

    /// The root digest.
    pub fn root(&self) -> &Digest {
        &self.root
    }

    /// Every node, leaf level first, root last.
    pub fn nodes(&self) -> &[Digest] {
        &self.nodes
    }

    /// The leaves in insertion order.
    pub fn leaves(&self) -> &[String] {
        &self.leaves
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of levels below the root.
    pub fn height(&self) -> usize {
        layout::height(self.leaves.len())
    }

    /// Position of `leaf` in the leaf sequence.
    pub fn leaf_index(&self, leaf: &str) -> Option<usize> {
        self.leaves.iter().position(|l| l == leaf)
    }

    /// True if `leaf` is one of the leaves.
    pub fn contains(&self, leaf: &str) -> bool {
        self.leaf_index(leaf).is_some()
    }

    /// The padded levels, leaves first.
    pub fn levels(&self) -> impl Iterator<Item = &[Digest]> + '_ {
        layout::level_lens(self.leaves.len()).scan(0usize, move |offset, len| {
            let level = self.nodes.get(*offset..*offset + len);
            *offset += len;
            level
        })
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| Error::InvalidData(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode, applying the
    /// [`from_parts`](Self::from_parts) checks.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 100 * 1024 * 1024 }>();
        let (tree, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| Error::InvalidData(format!("decode error: {}", e)))?;
        Self::from_parts(tree.leaves, tree.nodes, tree.root)
    }
}
