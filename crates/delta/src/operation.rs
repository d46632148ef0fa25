use crate::error::{DeltaError, DeltaResult};

/// One step of an [`OperationStream`].
///
/// `Replace` is part of the wire alphabet for forward compatibility with
/// future encoders, but [`crate::deltify`] never produces it; the
/// reconstructor treats it identically to `Insert` relative to the output
/// cursor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    /// Copy `length` bytes starting at `source_offset` from the base
    /// buffer.
    Copy {
        /// Offset into the base buffer.
        source_offset: u32,
        /// Number of bytes to copy.
        length: u32,
    },
    /// Emit literal bytes.
    Insert {
        /// The literal bytes to emit.
        bytes: Vec<u8>,
    },
    /// Semantically identical to `Insert`; decodable but never emitted.
    Replace {
        /// The literal bytes to emit.
        bytes: Vec<u8>,
    },
}

impl Operation {
    /// Number of bytes this operation contributes to the target buffer.
    #[must_use]
    pub fn length(&self) -> u32 {
        match self {
            Self::Copy { length, .. } => *length,
            Self::Insert { bytes } | Self::Replace { bytes } => {
                u32::try_from(bytes.len()).unwrap_or(u32::MAX)
            }
        }
    }

    /// Reports whether this operation carries literal payload bytes.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Insert { .. } | Self::Replace { .. })
    }
}

/// An ordered sequence of [`Operation`]s that reconstructs one version from
/// its predecessor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationStream {
    operations: Vec<Operation>,
    base_size: u32,
    target_size: u32,
    literal_bytes: u32,
}

/// Whether a stream under construction came from freshly generated
/// operations or from bytes read off disk, used only to decide how a `u32`
/// overflow is reported: generated operations overflowing means the caller
/// handed this crate buffers it cannot represent, while a decoded stream
/// overflowing means the bytes it was decoded from are untrustworthy.
enum Origin {
    Generated,
    Decoded,
}

impl OperationStream {
    /// Builds a stream from freshly generated operations and their declared
    /// base size, computing `target_size` and `literal_bytes` and checking
    /// every invariant from the format's specification.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::CorruptDelta`] if any `Copy` exceeds
    /// `base_size`, and [`DeltaError::InvalidArgument`] if the summed
    /// lengths overflow `u32`.
    pub fn new(operations: Vec<Operation>, base_size: u32) -> DeltaResult<Self> {
        Self::build(operations, base_size, Origin::Generated)
    }

    /// Builds a stream from operations decoded off disk, applying the same
    /// invariant checks as [`Self::new`].
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::CorruptDelta`] if any `Copy` exceeds
    /// `base_size`, or if the summed lengths overflow `u32` — a decoded
    /// overflow means the source bytes are corrupt, not that the caller
    /// passed a bad argument.
    pub(crate) fn from_decoded(operations: Vec<Operation>, base_size: u32) -> DeltaResult<Self> {
        Self::build(operations, base_size, Origin::Decoded)
    }

    fn build(operations: Vec<Operation>, base_size: u32, origin: Origin) -> DeltaResult<Self> {
        let overflow = |reason: &str| match origin {
            Origin::Generated => DeltaError::InvalidArgument(reason.to_string()),
            Origin::Decoded => DeltaError::CorruptDelta(reason.to_string()),
        };

        let mut target_size: u32 = 0;
        let mut literal_bytes: u32 = 0;
        for op in &operations {
            if let Operation::Copy {
                source_offset,
                length,
            } = op
            {
                let end = source_offset
                    .checked_add(*length)
                    .ok_or_else(|| overflow("copy range overflowed u32"))?;
                if end > base_size {
                    return Err(DeltaError::CorruptDelta(format!(
                        "copy range {source_offset}..{end} exceeds base size {base_size}"
                    )));
                }
            }
            target_size = target_size
                .checked_add(op.length())
                .ok_or_else(|| overflow("target size overflowed u32"))?;
            if op.is_literal() {
                literal_bytes = literal_bytes
                    .checked_add(op.length())
                    .ok_or_else(|| overflow("literal byte count overflowed u32"))?;
            }
        }
        Ok(Self {
            operations,
            base_size,
            target_size,
            literal_bytes,
        })
    }

    /// The operations, in target-position order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Expected size of the base buffer this stream consumes from.
    #[must_use]
    pub const fn base_size(&self) -> u32 {
        self.base_size
    }

    /// Size of the buffer this stream produces.
    #[must_use]
    pub const fn target_size(&self) -> u32 {
        self.target_size
    }

    /// Sum of the lengths of all `Insert`/`Replace` operations.
    #[must_use]
    pub const fn literal_bytes(&self) -> u32 {
        self.literal_bytes
    }

    /// Number of operations in the stream.
    #[must_use]
    pub fn operation_count(&self) -> u32 {
        u32::try_from(self.operations.len()).unwrap_or(u32::MAX)
    }
}
