use crate::error::{StoreError, StoreResult};

const FILENAME_CAP: usize = 255;
/// A SHA-256 hex digest is exactly 64 bytes; this must stay `>= 64` so
/// [`crate::chain::checksum`]'s output always fits.
const CHECKSUM_CAP: usize = 64;
const MESSAGE_CAP: usize = 255;

const FILENAME_FIELD: usize = FILENAME_CAP + 1;
const CHECKSUM_FIELD: usize = CHECKSUM_CAP + 1;
const MESSAGE_FIELD: usize = MESSAGE_CAP + 1;

/// On-disk byte length of a serialised [`FileMetadata`] record.
pub const RECORD_LEN: usize =
    FILENAME_FIELD + 4 + 4 + 4 + 4 + 8 + CHECKSUM_FIELD + MESSAGE_FIELD;

/// Fixed-layout header describing a single tracked version.
///
/// Mirrors the wire layout of the store's `.meta` sidecar files: bounded
/// NUL-terminated string fields followed by little-endian integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Logical name the version was tracked under.
    pub filename: String,
    /// Version number, starting at 1.
    pub version: u32,
    /// Size in bytes of the predecessor buffer the delta was built against.
    pub base_size: u32,
    /// Literal byte total carried in the delta (display only).
    pub delta_size: u32,
    /// Number of operations in the delta's stream.
    pub operation_count: u32,
    /// Creation time, seconds since the Unix epoch.
    pub timestamp: i64,
    /// Opaque checksum string; the core never interprets this value.
    pub checksum: String,
    /// Caller-supplied commit message, empty if none was given.
    pub message: String,
}

impl FileMetadata {
    /// Serialises this record to its fixed-width on-disk form.
    ///
    /// Fails if `filename`, `checksum`, or `message` exceed their bounded
    /// field widths.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        let mut out = Vec::with_capacity(RECORD_LEN);
        write_bounded(&mut out, &self.filename, FILENAME_CAP)?;
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.base_size.to_le_bytes());
        out.extend_from_slice(&self.delta_size.to_le_bytes());
        out.extend_from_slice(&self.operation_count.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        write_bounded(&mut out, &self.checksum, CHECKSUM_CAP)?;
        write_bounded(&mut out, &self.message, MESSAGE_CAP)?;
        debug_assert_eq!(out.len(), RECORD_LEN);
        Ok(out)
    }

    /// Parses a record previously produced by [`FileMetadata::encode`].
    pub fn decode(bytes: &[u8]) -> StoreResult<Self> {
        if bytes.len() != RECORD_LEN {
            return Err(bad_record(format!(
                "expected {RECORD_LEN} bytes, found {}",
                bytes.len()
            )));
        }
        let mut at = 0;
        let filename = read_bounded(bytes, &mut at, FILENAME_FIELD)?;
        let version = read_u32(bytes, &mut at);
        let base_size = read_u32(bytes, &mut at);
        let delta_size = read_u32(bytes, &mut at);
        let operation_count = read_u32(bytes, &mut at);
        let timestamp = read_i64(bytes, &mut at);
        let checksum = read_bounded(bytes, &mut at, CHECKSUM_FIELD)?;
        let message = read_bounded(bytes, &mut at, MESSAGE_FIELD)?;
        Ok(Self {
            filename,
            version,
            base_size,
            delta_size,
            operation_count,
            timestamp,
            checksum,
            message,
        })
    }
}

fn bad_record(reason: String) -> StoreError {
    StoreError::CorruptMetadata(reason)
}

fn write_bounded(out: &mut Vec<u8>, value: &str, cap: usize) -> StoreResult<()> {
    let bytes = value.as_bytes();
    if bytes.len() > cap {
        return Err(bad_record(format!(
            "field exceeds {cap} bytes: {value:?}"
        )));
    }
    out.extend_from_slice(bytes);
    out.resize(out.len() + (cap - bytes.len()) + 1, 0);
    Ok(())
}

fn read_bounded(bytes: &[u8], at: &mut usize, field_len: usize) -> StoreResult<String> {
    let field = &bytes[*at..*at + field_len];
    *at += field_len;
    let nul = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8(field[..nul].to_vec())
        .map_err(|e| bad_record(format!("invalid UTF-8 in field: {e}")))
}

fn read_u32(bytes: &[u8], at: &mut usize) -> u32 {
    let value = u32::from_le_bytes(bytes[*at..*at + 4].try_into().unwrap());
    *at += 4;
    value
}

fn read_i64(bytes: &[u8], at: &mut usize) -> i64 {
    let value = i64::from_le_bytes(bytes[*at..*at + 8].try_into().unwrap());
    *at += 8;
    value
}
