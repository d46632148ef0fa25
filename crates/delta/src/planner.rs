use crate::error::{DeltaError, DeltaResult};
use crate::matcher::Match;
use crate::operation::{Operation, OperationStream};

/// Merges a list of non-overlapping matches plus the unmatched gaps
/// between them into a canonical operation stream.
///
/// The scanner in [`crate::strategy`] guarantees the matches it hands to
/// this function do not overlap in `new_buf`, so the only work left is
/// sorting by target position and filling the gaps with literal bytes.
///
/// # Errors
///
/// Returns [`DeltaError::OutOfMemory`] if a literal buffer allocation
/// fails, or [`DeltaError::InvalidArgument`] if length accumulation
/// overflows `u32`.
pub fn plan(mut matches: Vec<Match>, base_size: u32, new_buf: &[u8]) -> DeltaResult<OperationStream> {
    matches.sort_by_key(|m| m.new_offset);

    let mut operations = Vec::new();
    let mut cursor: usize = 0;
    let new_size = new_buf.len();

    for m in &matches {
        let new_offset = m.new_offset as usize;
        if new_offset > cursor {
            operations.push(Operation::Insert {
                bytes: try_clone(&new_buf[cursor..new_offset])?,
            });
        }
        operations.push(Operation::Copy {
            source_offset: m.base_offset,
            length: m.length,
        });
        cursor = new_offset + m.length as usize;
    }

    if cursor < new_size {
        operations.push(Operation::Insert {
            bytes: try_clone(&new_buf[cursor..new_size])?,
        });
    }

    OperationStream::new(operations, base_size)
}

fn try_clone(slice: &[u8]) -> DeltaResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(slice.len())
        .map_err(|_| DeltaError::OutOfMemory)?;
    buf.extend_from_slice(slice);
    Ok(buf)
}

#[cfg(test)]
mod tests;
