use crate::error::{DeltaError, DeltaResult};
use crate::operation::{Operation, OperationStream};

const TYPE_COPY: u32 = 0;
const TYPE_INSERT: u32 = 1;
const TYPE_REPLACE: u32 = 2;

const HEADER_LEN: usize = 12;

/// Serialises an operation stream to the on-disk `.delta` wire format.
///
/// Each operation is encoded as three little-endian `u32` fields (`type`,
/// `source_offset`, `length`) followed by `length` literal bytes for
/// `Insert`/`Replace`. `base_size`, `target_size`, operation count, and the
/// creation timestamp are not part of this payload; they live in the
/// sibling `.meta` record.
#[must_use]
pub fn encode(stream: &OperationStream) -> Vec<u8> {
    let mut out = Vec::with_capacity(estimate_len(stream));
    for op in stream.operations() {
        match op {
            Operation::Copy {
                source_offset,
                length,
            } => {
                out.extend_from_slice(&TYPE_COPY.to_le_bytes());
                out.extend_from_slice(&source_offset.to_le_bytes());
                out.extend_from_slice(&length.to_le_bytes());
            }
            Operation::Insert { bytes } => encode_literal(&mut out, TYPE_INSERT, bytes),
            Operation::Replace { bytes } => encode_literal(&mut out, TYPE_REPLACE, bytes),
        }
    }
    out
}

fn encode_literal(out: &mut Vec<u8>, kind: u32, bytes: &[u8]) {
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
}

fn estimate_len(stream: &OperationStream) -> usize {
    stream.operations().len() * HEADER_LEN + stream.literal_bytes() as usize
}

/// Decodes a `.delta` payload against the `base_size` recorded in the
/// sibling `.meta` record.
///
/// # Errors
///
/// Returns [`DeltaError::CorruptDelta`] if the payload is truncated, if any
/// declared literal length exceeds the remaining bytes, if an unknown
/// operation type appears, or if a `Copy` operation's range exceeds
/// `base_size`.
pub fn decode(bytes: &[u8], base_size: u32) -> DeltaResult<OperationStream> {
    let mut operations = Vec::new();
    let mut cursor = 0usize;

    while cursor < bytes.len() {
        if cursor + HEADER_LEN > bytes.len() {
            return Err(DeltaError::CorruptDelta(
                "truncated operation header".into(),
            ));
        }
        let kind = read_u32(bytes, cursor);
        let source_offset = read_u32(bytes, cursor + 4);
        let length = read_u32(bytes, cursor + 8);
        cursor += HEADER_LEN;

        let op = match kind {
            TYPE_COPY => Operation::Copy {
                source_offset,
                length,
            },
            TYPE_INSERT | TYPE_REPLACE => {
                let len = length as usize;
                if len > bytes.len() - cursor {
                    return Err(DeltaError::CorruptDelta(
                        "literal length exceeds remaining delta bytes".into(),
                    ));
                }
                let payload = bytes[cursor..cursor + len].to_vec();
                cursor += len;
                if kind == TYPE_INSERT {
                    Operation::Insert { bytes: payload }
                } else {
                    Operation::Replace { bytes: payload }
                }
            }
            other => {
                return Err(DeltaError::CorruptDelta(format!(
                    "unknown operation type {other}"
                )));
            }
        };
        operations.push(op);
    }

    OperationStream::from_decoded(operations, base_size)
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
}
