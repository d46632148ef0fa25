use std::fs::{File, OpenOptions};
use std::path::Path;

use fs2::FileExt;

use crate::error::StoreResult;

/// RAII guard holding an exclusive advisory lock on a sidecar `.lock` file.
///
/// Unlocks on drop. Advisory only: it protects cooperating `fiver`
/// processes against each other, not against an unrelated writer touching
/// the `.delta`/`.meta` files directly.
pub struct LockGuard {
    file: File,
}

impl LockGuard {
    /// Acquires an exclusive lock on `path`, creating the file if absent.
    /// Blocks the calling thread until the lock is available.
    pub fn acquire(path: &Path) -> StoreResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
