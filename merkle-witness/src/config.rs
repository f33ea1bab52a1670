use std::env;

use crate::{hash::HashAlgorithm, Error, Result};

/// Default maximum leaf length in bytes.
pub const MAX_LEAF_SIZE: usize = 4 * 1024;

/// Environment variable overriding [`TreeConfig::max_leaf_size`].
pub const MAX_LEAF_SIZE_ENV: &str = "MERKLE_WITNESS_MAX_LEAF_SIZE";

/// Environment variable overriding [`TreeConfig::hash_algorithm`].
pub const HASH_ALGORITHM_ENV: &str = "MERKLE_WITNESS_HASH";

/// Parameters shared by every tree operation.
///
/// Trees do not remember the configuration they were built with; pass the
/// same value to mutations and verification. Construct through
/// [`TreeConfig::new`], [`Default`] or [`TreeConfig::from_env`] so the leaf
/// limit is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    max_leaf_size: usize,
    hash_algorithm: HashAlgorithm,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_leaf_size: MAX_LEAF_SIZE,
            hash_algorithm: HashAlgorithm::default(),
        }
    }
}

impl TreeConfig {
    /// Create a configuration. `max_leaf_size` must be non-zero.
    pub fn new(max_leaf_size: usize, hash_algorithm: HashAlgorithm) -> Result<Self> {
        if max_leaf_size == 0 {
            return Err(Error::InvalidConfig(
                "max_leaf_size must be greater than zero".into(),
            ));
        }
        Ok(Self {
            max_leaf_size,
            hash_algorithm,
        })
    }

    /// Leaves longer than this many bytes are rejected.
    pub fn max_leaf_size(&self) -> usize {
        self.max_leaf_size
    }

    /// Digest function for leaves and parents.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// Read overrides from the environment, keeping defaults for anything
    /// unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_LEAF_SIZE_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.max_leaf_size = size,
                _ => tracing::warn!(
                    value = %raw,
                    default = MAX_LEAF_SIZE,
                    "ignoring invalid {}",
                    MAX_LEAF_SIZE_ENV
                ),
            }
        }

        if let Some(raw) = lookup(HASH_ALGORITHM_ENV) {
            match raw.parse::<HashAlgorithm>() {
                Ok(algorithm) => config.hash_algorithm = algorithm,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "ignoring invalid {}",
                    HASH_ALGORITHM_ENV
                ),
            }
        }

        config
    }
}
