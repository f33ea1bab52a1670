//! Leaf sequences: boundary normalization and the set invariants.

use std::collections::BTreeSet;

use crate::{config::TreeConfig, Error, Result};

/// One or more leaves passed to [`add_leaf`](crate::add_leaf) or
/// [`remove_leaf`](crate::remove_leaf).
///
/// Single values and sequences both convert into a batch, so the tree
/// operations only ever deal with sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafBatch(Vec<String>);

impl LeafBatch {
    /// The leaves in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Take the leaves out.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Number of leaves in the batch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the batch holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LeafBatch {
    fn from(leaf: &str) -> Self {
        LeafBatch(vec![leaf.to_owned()])
    }
}

impl From<String> for LeafBatch {
    fn from(leaf: String) -> Self {
        LeafBatch(vec![leaf])
    }
}

impl From<&String> for LeafBatch {
    fn from(leaf: &String) -> Self {
        LeafBatch(vec![leaf.clone()])
    }
}

impl From<Vec<String>> for LeafBatch {
    fn from(leaves: Vec<String>) -> Self {
        LeafBatch(leaves)
    }
}

impl From<Vec<&str>> for LeafBatch {
    fn from(leaves: Vec<&str>) -> Self {
        LeafBatch(leaves.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[String]> for LeafBatch {
    fn from(leaves: &[String]) -> Self {
        LeafBatch(leaves.to_vec())
    }
}

impl From<&[&str]> for LeafBatch {
    fn from(leaves: &[&str]) -> Self {
        LeafBatch(leaves.iter().map(|leaf| (*leaf).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LeafBatch {
    fn from(leaves: [&str; N]) -> Self {
        LeafBatch(leaves.iter().map(|leaf| (*leaf).to_owned()).collect())
    }
}

impl FromIterator<String> for LeafBatch {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        LeafBatch(iter.into_iter().collect())
    }
}

/// The first leaf that repeats an earlier one, if any.
pub fn first_duplicate<S: AsRef<str>>(leaves: &[S]) -> Option<&str> {
    let mut seen = BTreeSet::new();
    leaves
        .iter()
        .map(<S as AsRef<str>>::as_ref)
        .find(|leaf| !seen.insert(*leaf))
}

/// True if any two leaves are equal.
pub fn has_duplicates<S: AsRef<str>>(leaves: &[S]) -> bool {
    first_duplicate(leaves).is_some()
}

/// Check the leaf-set invariants: non-empty, unique, each within the size
/// limit. Uniqueness is checked before sizes.
pub(crate) fn validate_leaves<S: AsRef<str>>(leaves: &[S], config: &TreeConfig) -> Result<()> {
    if leaves.is_empty() {
        return Err(Error::InvalidInput(
            "at least one leaf is required to build a tree".into(),
        ));
    }

    if let Some(leaf) = first_duplicate(leaves) {
        return Err(Error::DuplicatedLeaves {
            leaf: leaf.to_owned(),
        });
    }

    if let Some((index, leaf)) = leaves
        .iter()
        .enumerate()
        .find(|(_, leaf)| leaf.as_ref().len() > config.max_leaf_size())
    {
        return Err(Error::LeafTooLarge {
            index,
            size: leaf.as_ref().len(),
            max: config.max_leaf_size(),
        });
    }

    Ok(())
}
