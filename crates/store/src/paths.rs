use std::path::{Path, PathBuf};

/// Replaces path separators in a logical name so it can be embedded in a
/// single on-disk file name component.
///
/// Applied identically on every read and write path; two logical names
/// differing only in separator characters would otherwise collide.
#[must_use]
pub fn safe(name: &str) -> String {
    name.replace(['/', '\\', ':'], "_")
}

pub fn delta_path(root: &Path, name: &str, version: u32) -> PathBuf {
    root.join(format!("{}_v{version}.delta", safe(name)))
}

pub fn meta_path(root: &Path, name: &str, version: u32) -> PathBuf {
    root.join(format!("{}_v{version}.meta", safe(name)))
}

pub fn lock_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{}.lock", safe(name)))
}
