//! Per-file version chain manager and on-disk metadata records.
//!
//! Each logical name owns a chain of versions `1..=n`. Version `v`'s delta
//! is built against the reconstruction of version `v - 1` (version 1
//! against an empty base) and written alongside a fixed-layout `.meta`
//! record. This crate composes `delta` (the pure engine) with plain
//! filesystem I/O; it is the only place in the workspace that touches a
//! disk path.
#![deny(rustdoc::broken_intra_doc_links)]

mod chain;
mod error;
mod lock;
mod metadata;
mod paths;

pub use chain::{
    append, checksum, delete_version, enumerate, load_stream, names, read_metadata, reconstruct,
};
pub use error::{StoreError, StoreResult};
pub use metadata::FileMetadata;
pub use paths::safe;

#[cfg(test)]
mod tests;
