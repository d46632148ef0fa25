use thiserror::Error;

/// Result type for delta generation, encoding, and reconstruction.
pub type DeltaResult<T> = Result<T, DeltaError>;

/// Errors surfaced by the delta engine (generation, codec, reconstruction).
///
/// This is the crate-local slice of the taxonomy; version-chain failures
/// (`NoSuchVersion`, `MissingPredecessor` in the chain sense, `IoError`,
/// `ChainConflict`) live in `store::StoreError`, which wraps this type for
/// the kinds that originate below the chain layer.
#[derive(Debug, Error)]
pub enum DeltaError {
    /// A caller-supplied argument was invalid (empty required input, a
    /// zero window or bucket count, a length sum overflowing `u32` while
    /// generating a stream, and similar precondition failures).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A decoded or supplied operation stream violates one of the
    /// well-formedness invariants (out-of-range `Copy`, truncated
    /// payload, mismatched lengths, or a length sum overflowing `u32`).
    #[error("corrupt delta: {0}")]
    CorruptDelta(String),

    /// The reconstructor was asked to apply a `Copy` operation but no base
    /// buffer was supplied.
    #[error("operation stream requires a base buffer but none was supplied")]
    BaseRequired,

    /// A buffer allocation failed.
    #[error("out of memory")]
    OutOfMemory,
}
