#![deny(missing_docs)]
//! Interface crate to unify how the hashing costs of tree operations are
//! passed and retrieved.

use std::ops::{Add, AddAssign};

pub mod context;

pub use context::{CostContext, CostResult, CostsExt};

/// Hashing work performed by an operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times raw bytes (leaf values) were hashed.
    pub hash_byte_calls: u32,
    /// How many times two child digests were combined into a parent.
    pub hash_node_calls: u32,
}

impl OperationCost {
    /// Helper function to build default `OperationCost` with different
    /// `hash_byte_calls`.
    pub fn with_hash_byte_calls(hash_byte_calls: u32) -> Self {
        OperationCost {
            hash_byte_calls,
            ..Default::default()
        }
    }

    /// Helper function to build default `OperationCost` with different
    /// `hash_node_calls`.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// True if no hashing was done at all.
    pub fn is_nothing(&self) -> bool {
        *self == Self::default()
    }

    /// Total number of hash function invocations.
    pub fn total_hash_calls(&self) -> u64 {
        self.hash_byte_calls as u64 + self.hash_node_calls as u64
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_byte_calls: self.hash_byte_calls + rhs.hash_byte_calls,
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_byte_calls += rhs.hash_byte_calls;
        self.hash_node_calls += rhs.hash_node_calls;
    }
}
