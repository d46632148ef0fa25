use std::fs;
use std::path::Path;

use delta::{apply, codec, deltify, OperationStream};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::lock::LockGuard;
use crate::metadata::FileMetadata;
use crate::paths::{delta_path, lock_path, meta_path};

/// Returns the sorted list of version numbers currently on disk for `name`.
///
/// Scans directory entries rather than probing a fixed range, so there is
/// no cap on chain length.
pub fn enumerate(root: &Path, name: &str) -> StoreResult<Vec<u32>> {
    let prefix = format!("{}_v", crate::paths::safe(name));
    let mut versions = Vec::new();
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(versions),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(rest) = file_name.strip_prefix(&prefix) else {
            continue;
        };
        let Some(digits) = rest.strip_suffix(".meta") else {
            continue;
        };
        if let Ok(v) = digits.parse::<u32>() {
            versions.push(v);
        }
    }
    versions.sort_unstable();
    Ok(versions)
}

/// Rebuilds the bytes passed to `append` when `version` was created, by
/// iteratively folding deltas `1..=version`.
pub fn reconstruct(root: &Path, name: &str, version: u32) -> StoreResult<Vec<u8>> {
    let versions = enumerate(root, name)?;
    if !versions.contains(&version) {
        return Err(StoreError::NoSuchVersion {
            name: name.to_string(),
            version,
        });
    }
    let mut buf: Vec<u8> = Vec::new();
    for v in 1..=version {
        let (base_size, stream) = load_stream(root, name, v)?;
        let base = if v == 1 {
            None
        } else {
            if buf.len() as u32 != base_size {
                return Err(StoreError::MissingPredecessor {
                    name: name.to_string(),
                    version: v,
                });
            }
            Some(buf.as_slice())
        };
        let mut next = Vec::new();
        apply(&stream, base, &mut next)?;
        buf = next;
    }
    debug!(name, version, bytes = buf.len(), "reconstructed version");
    Ok(buf)
}

/// Loads and decodes the operation stream for one version, alongside the
/// base size it was declared against. Used directly by `diff`.
pub fn load_stream(root: &Path, name: &str, version: u32) -> StoreResult<(u32, OperationStream)> {
    let meta_bytes = fs::read(meta_path(root, name, version)).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::NoSuchVersion {
                name: name.to_string(),
                version,
            }
        } else {
            StoreError::IoError(e)
        }
    })?;
    let meta = FileMetadata::decode(&meta_bytes)?;
    let delta_bytes = fs::read(delta_path(root, name, version)).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::MissingPredecessor {
                name: name.to_string(),
                version,
            }
        } else {
            StoreError::IoError(e)
        }
    })?;
    let stream = codec::decode(&delta_bytes, meta.base_size)?;
    Ok((meta.base_size, stream))
}

/// Reads a version's metadata record without decoding its delta payload.
pub fn read_metadata(root: &Path, name: &str, version: u32) -> StoreResult<FileMetadata> {
    let bytes = fs::read(meta_path(root, name, version)).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::NoSuchVersion {
                name: name.to_string(),
                version,
            }
        } else {
            StoreError::IoError(e)
        }
    })?;
    FileMetadata::decode(&bytes)
}

/// Appends `new_bytes` as the next version of `name`'s chain.
///
/// Deltifies against the reconstructed chain head (or builds a trivial
/// insert-only stream for version 1), writes the `.delta` payload, then the
/// `.meta` record. On I/O failure after the `.delta` was partially written,
/// the `.delta` is removed before the error is returned; a partially
/// written `.meta` is left for the caller to observe, per the ordering
/// guarantee that a version is only valid once both files exist.
pub fn append(
    root: &Path,
    name: &str,
    new_bytes: &[u8],
    message: Option<&str>,
    lock: bool,
) -> StoreResult<u32> {
    fs::create_dir_all(root)?;
    let _guard = if lock {
        Some(LockGuard::acquire(&lock_path(root, name))?)
    } else {
        None
    };

    let versions = enumerate(root, name)?;
    let (version, stream) = if versions.is_empty() {
        let stream = OperationStream::new(
            vec![delta::Operation::Insert {
                bytes: new_bytes.to_vec(),
            }],
            0,
        )?;
        (1, stream)
    } else {
        let head = *versions.last().unwrap();
        let base = reconstruct(root, name, head)?;
        let stream = deltify(&base, new_bytes)?;
        (head + 1, stream)
    };

    let encoded = codec::encode(&stream);
    let delta_file = delta_path(root, name, version);
    if let Err(e) = fs::write(&delta_file, &encoded) {
        let _ = fs::remove_file(&delta_file);
        return Err(e.into());
    }

    let checksum = hex_digest(new_bytes);
    let timestamp = i64::try_from(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    )
    .unwrap_or(0);
    let metadata = FileMetadata {
        filename: name.to_string(),
        version,
        base_size: stream.base_size(),
        delta_size: stream.literal_bytes(),
        operation_count: stream.operation_count(),
        timestamp,
        checksum,
        message: message.unwrap_or_default().to_string(),
    };
    let encoded_meta = metadata.encode()?;
    if let Err(e) = fs::write(meta_path(root, name, version), &encoded_meta) {
        let _ = fs::remove_file(&delta_file);
        return Err(e.into());
    }

    info!(name, version, bytes = new_bytes.len(), "appended version");
    Ok(version)
}

/// Removes a version's `.delta` and `.meta` files.
///
/// Only the current tail of the chain may be deleted; deleting any earlier
/// version would make every later version unreconstructible, so this
/// refuses with [`StoreError::NonTailDeletion`] instead.
pub fn delete_version(root: &Path, name: &str, version: u32) -> StoreResult<()> {
    let versions = enumerate(root, name)?;
    let Some(&tail) = versions.last() else {
        return Err(StoreError::NoSuchVersion {
            name: name.to_string(),
            version,
        });
    };
    if !versions.contains(&version) {
        return Err(StoreError::NoSuchVersion {
            name: name.to_string(),
            version,
        });
    }
    if version != tail {
        return Err(StoreError::NonTailDeletion {
            name: name.to_string(),
            version,
        });
    }
    fs::remove_file(delta_path(root, name, version))?;
    fs::remove_file(meta_path(root, name, version))?;
    info!(name, version, "deleted version");
    Ok(())
}

fn hex_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Computes the same opaque checksum string [`append`] records for a
/// version, for comparison by collaborators such as `status`.
#[must_use]
pub fn checksum(bytes: &[u8]) -> String {
    hex_digest(bytes)
}

/// Lists the distinct logical names with at least one tracked version.
///
/// Recovered from the sanitised on-disk stem, so a name containing `/`,
/// `\`, or `:` is reported in its `safe()`-collapsed form.
pub fn names(root: &Path) -> StoreResult<Vec<String>> {
    let mut found = std::collections::BTreeSet::new();
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let Some(stripped) = file_name.strip_suffix(".meta") else {
            continue;
        };
        if let Some(idx) = stripped.rfind("_v") {
            if stripped[idx + 2..].chars().all(|c| c.is_ascii_digit()) && !stripped[idx + 2..].is_empty() {
                found.insert(stripped[..idx].to_string());
            }
        }
    }
    Ok(found.into_iter().collect())
}
