#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `seedindex` maps rolling-hash fingerprints to offsets in a base buffer,
//! so the match finder can look up candidate positions in O(1) amortized
//! time instead of scanning the base buffer for every position in the new
//! buffer.
//!
//! # Design
//!
//! Entries live in a single arena ([`Vec<Node>`]); each bucket head is an
//! index into that arena, and each node's `next` field is also an index
//! (or `None` for the end of the chain). This avoids the cyclic,
//! pointer-chased hash table a naive port would reach for: the whole
//! structure is a flat allocation that drops in one pass with no manual
//! bookkeeping, and nothing in it can form a cycle.
//!
//! Insertion is head-first, so entries inserted later in a scan (larger
//! `base_offset`) are visited before older ones when a bucket's chain is
//! walked — callers that cap how many candidates they examine therefore
//! naturally prefer more recent offsets.

use std::fmt;

/// A `(fingerprint, base_offset)` pair recorded while scanning a base
/// buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SeedEntry {
    /// Rolling-hash fingerprint of the window starting at `base_offset`.
    pub fingerprint: u32,
    /// Offset into the base buffer where this window begins.
    pub base_offset: u32,
}

/// Error returned when constructing a [`SeedIndex`] with an invalid bucket
/// count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ZeroBuckets;

impl fmt::Display for ZeroBuckets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seed index bucket count must be greater than zero")
    }
}

impl std::error::Error for ZeroBuckets {}

#[derive(Clone, Copy, Debug)]
struct Node {
    entry: SeedEntry,
    next: Option<u32>,
}

/// Fingerprint to base-offset multimap, chained by bucket.
#[derive(Clone, Debug)]
pub struct SeedIndex {
    buckets: usize,
    heads: Vec<Option<u32>>,
    nodes: Vec<Node>,
}

impl SeedIndex {
    /// Creates an index with `buckets` head slots. `buckets` is used as a
    /// modulus, not a mask, so any positive value works (powers of two are
    /// not required).
    ///
    /// # Errors
    ///
    /// Returns [`ZeroBuckets`] if `buckets` is zero.
    pub fn new(buckets: usize) -> Result<Self, ZeroBuckets> {
        if buckets == 0 {
            return Err(ZeroBuckets);
        }
        Ok(Self {
            buckets,
            heads: vec![None; buckets],
            nodes: Vec::new(),
        })
    }

    /// Number of buckets the index was created with.
    #[must_use]
    pub const fn bucket_count(&self) -> usize {
        self.buckets
    }

    /// Number of entries inserted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reports whether the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Prepends `(fingerprint, base_offset)` to the bucket `fingerprint mod
    /// buckets`, in O(1).
    pub fn insert(&mut self, fingerprint: u32, base_offset: u32) {
        let bucket = (fingerprint as usize) % self.buckets;
        let node_index = u32::try_from(self.nodes.len())
            .expect("seed index entry count exceeds u32::MAX");
        self.nodes.push(Node {
            entry: SeedEntry {
                fingerprint,
                base_offset,
            },
            next: self.heads[bucket],
        });
        self.heads[bucket] = Some(node_index);
    }

    /// Returns every entry sharing `fingerprint`'s bucket, newest-first.
    ///
    /// The bucket may hold entries with a different fingerprint that
    /// happened to collide on `fingerprint mod buckets`; callers must
    /// filter on `entry.fingerprint == fingerprint` themselves, exactly as
    /// they would when walking a hand-rolled hash-table chain.
    #[must_use]
    pub fn bucket(&self, fingerprint: u32) -> BucketIter<'_> {
        let bucket = (fingerprint as usize) % self.buckets;
        BucketIter {
            nodes: &self.nodes,
            next: self.heads[bucket],
        }
    }
}

/// Iterator over one bucket's collision chain, newest entry first.
pub struct BucketIter<'a> {
    nodes: &'a [Node],
    next: Option<u32>,
}

impl Iterator for BucketIter<'_> {
    type Item = SeedEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let node = self.nodes[index as usize];
        self.next = node.next;
        Some(node.entry)
    }
}

#[cfg(test)]
mod tests;
