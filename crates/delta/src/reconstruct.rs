use crate::error::{DeltaError, DeltaResult};
use crate::operation::{Operation, OperationStream};

/// Applies `stream` to `base`, appending the reconstructed bytes to `out`.
///
/// `base` is `None` only for a version 1 stream, which may contain only
/// `Insert`/`Replace` operations. Returns the number of bytes written,
/// which equals `stream.target_size()` on success.
///
/// # Errors
///
/// Returns [`DeltaError::BaseRequired`] if a `Copy` operation appears with
/// no base buffer supplied, and [`DeltaError::CorruptDelta`] if an
/// operation's range falls outside the buffer it reads from or would write
/// past the stream's declared `target_size`.
pub fn apply(stream: &OperationStream, base: Option<&[u8]>, out: &mut Vec<u8>) -> DeltaResult<usize> {
    out.try_reserve_exact(stream.target_size() as usize)
        .map_err(|_| DeltaError::OutOfMemory)?;

    let mut written: usize = 0;
    let target_size = stream.target_size() as usize;

    for op in stream.operations() {
        let length = op.length() as usize;
        if written + length > target_size {
            return Err(DeltaError::CorruptDelta(
                "operation stream writes past its declared target size".into(),
            ));
        }
        match op {
            Operation::Copy {
                source_offset,
                length,
            } => {
                let base = base.ok_or(DeltaError::BaseRequired)?;
                let start = *source_offset as usize;
                let end = start + *length as usize;
                if end > base.len() {
                    return Err(DeltaError::CorruptDelta(format!(
                        "copy range {start}..{end} exceeds base buffer of {} bytes",
                        base.len()
                    )));
                }
                out.extend_from_slice(&base[start..end]);
            }
            Operation::Insert { bytes } | Operation::Replace { bytes } => {
                out.extend_from_slice(bytes);
            }
        }
        written += length;
    }

    Ok(written)
}
