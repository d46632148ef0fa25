use thiserror::Error;

/// Result type for version chain operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the version chain manager and metadata layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested version does not exist in the chain.
    #[error("no such version {version} for {name}")]
    NoSuchVersion {
        /// Logical file name.
        name: String,
        /// Requested version number.
        version: u32,
    },

    /// A `.meta` record exists with no matching `.delta` payload, or vice
    /// versa.
    #[error("missing predecessor for {name} version {version}")]
    MissingPredecessor {
        /// Logical file name.
        name: String,
        /// Version whose predecessor is missing.
        version: u32,
    },

    /// `append` was called against a chain whose head moved between
    /// `enumerate` and the write (or the chain is otherwise inconsistent).
    #[error("chain conflict for {0}: concurrent modification or gap in versions")]
    ChainConflict(String),

    /// `delete_version` targeted a version that is not the current tail.
    #[error("refusing to delete non-tail version {version} of {name}")]
    NonTailDeletion {
        /// Logical file name.
        name: String,
        /// Version that was not the tail.
        version: u32,
    },

    /// A `.meta` record is the wrong length, has a field that overflows its
    /// bounded width, or holds invalid UTF-8.
    #[error("corrupt metadata record: {0}")]
    CorruptMetadata(String),

    /// The underlying delta engine rejected the input or a stored delta.
    #[error(transparent)]
    Delta(#[from] delta::DeltaError),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
