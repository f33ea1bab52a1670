use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from Merkle tree operations.
///
/// A proof that fails to verify is not an error: verification reports it as
/// `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input cannot form a tree, e.g. an empty leaf sequence.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The same leaf value appears more than once.
    #[error("duplicated leaves: {leaf:?} appears more than once")]
    DuplicatedLeaves {
        /// The first repeated leaf value.
        leaf: String,
    },
    /// A leaf exceeds the configured size limit.
    #[error("leaf at index {index} is {size} bytes, limit is {max}")]
    LeafTooLarge {
        /// Position of the offending leaf in the sequence.
        index: usize,
        /// Its length in bytes.
        size: usize,
        /// The configured maximum.
        max: usize,
    },
    /// A proof was requested for a leaf the tree does not hold.
    #[error("leaf not found")]
    LeafNotFound,
    /// Removing the requested leaves would leave the tree empty.
    #[error("no leaf would remain after removal")]
    NoLeafToRemove,
    /// Proof generation walked outside the flattened tree. Indicates a
    /// builder/generator mismatch, never a user error.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
    /// Malformed digest, tree layout or encoded bytes.
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// Rejected configuration value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// A background worker running a tree operation did not complete.
    #[error("worker failed: {0}")]
    WorkerFailed(String),
}

/// Stable, string-representable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidInput`].
    InvalidInput,
    /// See [`Error::DuplicatedLeaves`].
    DuplicatedLeaves,
    /// See [`Error::LeafTooLarge`].
    LeafTooLarge,
    /// See [`Error::LeafNotFound`].
    LeafNotFound,
    /// See [`Error::NoLeafToRemove`].
    NoLeafToRemove,
    /// See [`Error::InternalInconsistency`].
    InternalInconsistency,
    /// See [`Error::InvalidData`].
    InvalidData,
    /// See [`Error::InvalidConfig`].
    InvalidConfig,
    /// See [`Error::WorkerFailed`].
    WorkerFailed,
}

impl ErrorKind {
    /// The snake_case code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::DuplicatedLeaves => "duplicated_leaves",
            ErrorKind::LeafTooLarge => "leaf_too_large",
            ErrorKind::LeafNotFound => "leaf_not_found",
            ErrorKind::NoLeafToRemove => "no_leaf_to_remove",
            ErrorKind::InternalInconsistency => "internal_inconsistency",
            ErrorKind::InvalidData => "invalid_data",
            ErrorKind::InvalidConfig => "invalid_config",
            ErrorKind::WorkerFailed => "worker_failed",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::DuplicatedLeaves { .. } => ErrorKind::DuplicatedLeaves,
            Error::LeafTooLarge { .. } => ErrorKind::LeafTooLarge,
            Error::LeafNotFound => ErrorKind::LeafNotFound,
            Error::NoLeafToRemove => ErrorKind::NoLeafToRemove,
            Error::InternalInconsistency(_) => ErrorKind::InternalInconsistency,
            Error::InvalidData(_) => ErrorKind::InvalidData,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Error::WorkerFailed(_) => ErrorKind::WorkerFailed,
        }
    }
}
