#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `delta` is the content-dependent delta engine: given a base buffer and a
//! new buffer, it produces a canonical [`OperationStream`] of `Copy`/
//! `Insert` operations witnessing the transformation, can serialise that
//! stream to a deterministic byte layout, and can replay a stream against
//! a base buffer to reconstruct the new buffer exactly.
//!
//! # Pipeline
//!
//! [`deltify`] runs a three-tier heuristic ([`strategy`]) that falls back
//! from cheap pre-analysis (tail append, prefix/suffix) to a full rolling-
//! hash seed-index scan ([`matcher`], backed by [`rolling`] and
//! [`seedindex`]) only when the cheaper tiers do not apply. The scan's
//! matches are merged with the unmatched gaps by [`planner::plan`] into the
//! stream that [`codec::encode`]/[`codec::decode`] and [`reconstruct::apply`]
//! operate on.
//!
//! # Invariants
//!
//! Every [`OperationStream`] returned by this crate, whether freshly
//! generated or decoded from bytes, satisfies: every `Copy`'s
//! `source_offset + length <= base_size`; `target_size` equals the sum of
//! every operation's length; operations are listed in target-position
//! order. [`OperationStream::new`] enforces the first two at construction;
//! the third holds by construction in both [`deltify`] and [`codec::decode`]
//! (the generator never reorders a `Copy`/`Insert` pair relative to its
//! position in the new buffer, and the decoder preserves wire order).

/// Wire-format serialisation and deserialisation for [`OperationStream`].
pub mod codec;
mod error;
mod matcher;
mod operation;
mod planner;
mod reconstruct;
mod strategy;

pub use error::{DeltaError, DeltaResult};
pub use matcher::{Match, MatchFinder};
pub use operation::{Operation, OperationStream};
pub use reconstruct::apply;

/// Produces the operation stream witnessing `base -> new_buf`.
///
/// This is the top-level entry point combining the strategy selector
/// (§ tier I/II/III), the seed-index scan, and the operation planner.
///
/// # Errors
///
/// Returns [`DeltaError::OutOfMemory`] if a literal buffer allocation
/// fails, or [`DeltaError::InvalidArgument`] if a length computation
/// overflows `u32` (only reachable with input buffers near `u32::MAX`).
pub fn deltify(base: &[u8], new_buf: &[u8]) -> DeltaResult<OperationStream> {
    strategy::select_and_plan(base, new_buf)
}
