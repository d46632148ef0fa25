use rolling::RollingHash;
use seedindex::SeedIndex;

use crate::error::DeltaResult;
use crate::matcher::{Match, MatchFinder};
use crate::operation::{Operation, OperationStream};
use crate::planner;

/// Fixed window for the tier III seed-index scan.
const SCAN_WINDOW: usize = 32;
/// Minimum extension length a tier III candidate must reach to be
/// considered at all.
const SCAN_MIN_LENGTH: u32 = 32;
/// Bucket count for the tier III seed index.
const SCAN_BUCKETS: usize = 65536;

const TIER_I_MAX_TAIL: u64 = 1000;
const TIER_I_PREFIX_RATIO: f64 = 0.95;
const TIER_II_COVERAGE_RATIO: f64 = 0.8;
const TIER_II_DELTA_RATIO: f64 = 0.01;

const RETRY_MIN_MATCHES: usize = 10;
const RETRY_SIZE_THRESHOLD: u64 = 1024 * 1024;
const RETRY_L_BEN: u32 = 32;

/// Picks tier I, II, or III and produces the resulting operation stream.
///
/// This is the sole entry point for delta generation; see
/// [`crate::deltify`] for the public re-export.
pub fn select_and_plan(base: &[u8], new_buf: &[u8]) -> DeltaResult<OperationStream> {
    if let Some(stream) = tier_one(base, new_buf)? {
        return Ok(stream);
    }
    if let Some(stream) = tier_two(base, new_buf)? {
        return Ok(stream);
    }
    tier_three(base, new_buf)
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Tier I: tail append. `new_buf` is `base` plus a short tail.
fn tier_one(base: &[u8], new_buf: &[u8]) -> DeltaResult<Option<OperationStream>> {
    let base_size = base.len() as u64;
    let new_size = new_buf.len() as u64;
    if new_size <= base_size || new_size - base_size >= TIER_I_MAX_TAIL {
        return Ok(None);
    }
    let prefix = common_prefix_len(base, new_buf);
    if base_size == 0 || (prefix as f64) < TIER_I_PREFIX_RATIO * base_size as f64 {
        return Ok(None);
    }

    let mut operations = Vec::new();
    if prefix > 0 {
        operations.push(Operation::Copy {
            source_offset: 0,
            length: prefix as u32,
        });
    }
    let tail = &new_buf[prefix..];
    if !tail.is_empty() {
        operations.push(Operation::Insert {
            bytes: tail.to_vec(),
        });
    }
    Ok(Some(OperationStream::new(operations, base.len() as u32)?))
}

/// Tier II: common prefix, literal middle, common suffix.
fn tier_two(base: &[u8], new_buf: &[u8]) -> DeltaResult<Option<OperationStream>> {
    let base_size = base.len() as u64;
    let new_size = new_buf.len() as u64;
    if base_size == 0 {
        return Ok(None);
    }

    let prefix = common_prefix_len(base, new_buf);
    let remaining_base = base.len() - prefix;
    let remaining_new = new_buf.len() - prefix;
    let suffix_cap = remaining_base.min(remaining_new);
    let suffix = (0..suffix_cap)
        .take_while(|&i| base[base.len() - 1 - i] == new_buf[new_buf.len() - 1 - i])
        .count();

    let coverage = (prefix + suffix) as f64;
    let delta = (new_size as i64 - base_size as i64).unsigned_abs();

    let qualifies = coverage > TIER_II_COVERAGE_RATIO * base_size as f64
        || (delta as f64) < TIER_II_DELTA_RATIO * base_size as f64;
    if !qualifies {
        return Ok(None);
    }

    let mut operations = Vec::new();
    if prefix > 0 {
        operations.push(Operation::Copy {
            source_offset: 0,
            length: prefix as u32,
        });
    }
    let middle = &new_buf[prefix..new_buf.len() - suffix];
    if !middle.is_empty() {
        operations.push(Operation::Insert {
            bytes: middle.to_vec(),
        });
    }
    if suffix > 0 {
        operations.push(Operation::Copy {
            source_offset: (base.len() - suffix) as u32,
            length: suffix as u32,
        });
    }
    Ok(Some(OperationStream::new(operations, base.len() as u32)?))
}

/// Minimum match length for a candidate to be *used*, as opposed to merely
/// reaching the match finder's `min_length` floor. Shorter matches cost
/// more to encode (a `Copy` header is ~12 bytes) than they save.
fn beneficial_length(new_size: usize) -> u32 {
    if new_size <= 10 * 1024 * 1024 {
        12
    } else if new_size <= 50 * 1024 * 1024 {
        16
    } else {
        32
    }
}

/// Tier III: full seed-index scan.
fn tier_three(base: &[u8], new_buf: &[u8]) -> DeltaResult<OperationStream> {
    let index = build_seed_index(base);
    let l_ben = beneficial_length(new_buf.len());

    let first_pass = scan(base, new_buf, &index, l_ben)?;
    let matches = if first_pass.len() < RETRY_MIN_MATCHES
        && new_buf.len() as u64 > RETRY_SIZE_THRESHOLD
    {
        let retry_pass = scan(base, new_buf, &index, RETRY_L_BEN)?;
        if retry_pass.len() > first_pass.len() {
            retry_pass
        } else {
            first_pass
        }
    } else {
        first_pass
    };

    planner::plan(matches, base.len() as u32, new_buf)
}

fn build_seed_index(base: &[u8]) -> SeedIndex {
    let mut index = SeedIndex::new(SCAN_BUCKETS).expect("fixed bucket count is non-zero");
    let mut hash = RollingHash::new(SCAN_WINDOW).expect("fixed window is non-zero");
    for (i, &byte) in base.iter().enumerate() {
        hash.push(byte);
        if i + 1 >= SCAN_WINDOW {
            index.insert(hash.fingerprint(), (i + 1 - SCAN_WINDOW) as u32);
        }
    }
    index
}

/// Phase B of the seed-index scan: walks `new_buf` left to right, accepting
/// non-overlapping matches at or above `l_ben`.
fn scan(base: &[u8], new_buf: &[u8], index: &SeedIndex, l_ben: u32) -> DeltaResult<Vec<Match>> {
    let mut finder = MatchFinder::new(base, new_buf, index, SCAN_WINDOW, SCAN_MIN_LENGTH)?;
    let mut matches = Vec::new();
    let mut position = 0usize;
    let mut last_end = 0usize;
    let new_size = new_buf.len();

    while position < new_size {
        if position < last_end {
            position += 1;
            continue;
        }
        match finder.find_at(position) {
            Some(m) if m.length >= l_ben && m.new_offset as usize >= last_end => {
                last_end = m.new_offset as usize + m.length as usize;
                matches.push(m);
                position = last_end;
            }
            _ => position += 1,
        }
    }

    Ok(matches)
}
