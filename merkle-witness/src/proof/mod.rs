//! Inclusion proof generation.
//!
//! A [`WitnessPath`] lists, leaf to root, the sibling digest met at every
//! level together with the side it sits on. It carries nothing else: the
//! verifier replays it against a claimed leaf value and root without access
//! to the tree.

use bincode::{Decode, Encode};

use crate::{
    layout::{self, PathCursor},
    tree::MerkleTree,
    Digest, Error, Result,
};

#[cfg(test)]
mod tests;

/// Upper bound on witnesses accepted when decoding a path. A path has one
/// witness per level, so this covers any tree that fits in memory.
const MAX_PATH_LEN: usize = 64;

/// Side a witness sits on relative to the running digest.
///
/// Serializes as the integer `0` (left) or `1` (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum WitnessSide {
    /// Combine as `witness || current`.
    Left,
    /// Combine as `current || witness`.
    Right,
}

impl From<WitnessSide> for u8 {
    fn from(side: WitnessSide) -> Self {
        match side {
            WitnessSide::Left => 0,
            WitnessSide::Right => 1,
        }
    }
}

impl TryFrom<u8> for WitnessSide {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(WitnessSide::Left),
            1 => Ok(WitnessSide::Right),
            other => Err(Error::InvalidData(format!(
                "witness index must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

/// One sibling digest on a witness path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Witness {
    /// Digest of the sibling node.
    #[cfg_attr(feature = "serde", serde(rename = "witnessHash"))]
    pub witness_hash: Digest,
    /// Which side the sibling is on.
    #[cfg_attr(feature = "serde", serde(rename = "witnessIndex"))]
    pub witness_index: WitnessSide,
}

/// Ordered witnesses from a leaf up to, not including, the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct WitnessPath(Vec<Witness>);

impl WitnessPath {
    /// Wrap an already ordered list of witnesses.
    pub fn new(witnesses: Vec<Witness>) -> Self {
        WitnessPath(witnesses)
    }

    /// The witnesses, leaf side first.
    pub fn witnesses(&self) -> &[Witness] {
        &self.0
    }

    /// Number of witnesses; the height of the tree the path came from.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the path of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the witnesses, leaf side first.
    pub fn iter(&self) -> std::slice::Iter<'_, Witness> {
        self.0.iter()
    }

    /// Take the witnesses out.
    pub fn into_inner(self) -> Vec<Witness> {
        self.0
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| Error::InvalidData(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects paths longer than any tree could produce and witnesses whose
    /// digest is not 64 lowercase hex characters.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 64 * 1024 }>();
        let (path, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| Error::InvalidData(format!("decode error: {}", e)))?;
        if path.len() > MAX_PATH_LEN {
            return Err(Error::InvalidData(format!(
                "path has {} witnesses, at most {} allowed",
                path.len(),
                MAX_PATH_LEN
            )));
        }
        for witness in path.iter() {
            witness.witness_hash.validate()?;
        }
        Ok(path)
    }
}

impl From<Vec<Witness>> for WitnessPath {
    fn from(witnesses: Vec<Witness>) -> Self {
        WitnessPath(witnesses)
    }
}

impl IntoIterator for WitnessPath {
    type Item = Witness;
    type IntoIter = std::vec::IntoIter<Witness>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a WitnessPath {
    type Item = &'a Witness;
    type IntoIter = std::slice::Iter<'a, Witness>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MerkleTree {
    /// Generate the witness path for `target`.
    ///
    /// Fails with [`Error::LeafNotFound`] if `target` is not a leaf. An
    /// [`Error::InternalInconsistency`] means the flattened tree does not
    /// have the layout its leaf count implies.
    pub fn generate_proof(&self, target: &str) -> Result<WitnessPath> {
        let leaf_index = self.leaf_index(target).ok_or(Error::LeafNotFound)?;
        let leaf_count = self.leaf_count();

        let mut witnesses = Vec::with_capacity(layout::height(leaf_count));
        let mut cursor = PathCursor::at_leaf(leaf_index, leaf_count);

        while let Some((sibling, parent)) = cursor.step() {
            let witness_hash = self.nodes().get(sibling.position).ok_or_else(|| {
                inconsistency(format!(
                    "sibling position {} is past the end of a {}-node tree",
                    sibling.position,
                    self.nodes().len()
                ))
            })?;
            tracing::trace!(
                level = witnesses.len(),
                position = sibling.position,
                side = ?sibling.side,
                "collected witness"
            );
            witnesses.push(Witness {
                witness_hash: witness_hash.clone(),
                witness_index: sibling.side,
            });
            cursor = parent;
        }

        if self.nodes().len().checked_sub(1) != Some(cursor.position()) {
            return Err(inconsistency(format!(
                "path ended at position {} but the root is at {}",
                cursor.position(),
                self.nodes().len().saturating_sub(1)
            )));
        }

        tracing::debug!(
            leaf_index,
            leaf_count,
            path_len = witnesses.len(),
            "generated witness path"
        );
        Ok(WitnessPath(witnesses))
    }
}

fn inconsistency(message: String) -> Error {
    tracing::error!(%message, "merkle tree layout mismatch during proof generation");
    Error::InternalInconsistency(message)
}
