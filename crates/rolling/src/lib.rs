#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rolling` provides the windowed rolling fingerprint used to find
//! candidate matches between a base buffer and a new buffer during delta
//! generation. It is deliberately the smallest possible unit: one type,
//! one error, no I/O, no allocation beyond the fixed-size window buffer.
//!
//! # Invariants
//!
//! - The two internal accumulators are masked to 16 bits after every
//!   update. This bound is load-bearing: any seed index built while
//!   scanning a base buffer was built from fingerprints produced with this
//!   exact masking, so changing it invalidates every stored index.
//! - [`RollingHash::fingerprint`] returns `0` until at least one byte has
//!   been pushed; it never returns `0` for a genuinely full window with a
//!   colliding accumulator state (a `0` fingerprint from a non-empty window
//!   is a valid, if rare, outcome and callers must not special-case it).

mod error;
mod hash;

pub use error::RollingError;
pub use hash::RollingHash;
