use tempfile::tempdir;

use crate::{
    append, checksum, delete_version, enumerate, load_stream, names, read_metadata, reconstruct,
    StoreError,
};

#[test]
fn first_append_creates_version_one() {
    let dir = tempdir().unwrap();
    let v = append(dir.path(), "notes.txt", b"hello", None, false).unwrap();
    assert_eq!(v, 1);
    assert_eq!(enumerate(dir.path(), "notes.txt").unwrap(), vec![1]);
    assert_eq!(reconstruct(dir.path(), "notes.txt", 1).unwrap(), b"hello");
}

#[test]
fn chain_of_versions_reconstructs_each_step() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"abc", None, false).unwrap();
    append(dir.path(), "f", b"abcd", None, false).unwrap();
    append(dir.path(), "f", b"abcde", None, false).unwrap();

    assert_eq!(enumerate(dir.path(), "f").unwrap(), vec![1, 2, 3]);
    assert_eq!(reconstruct(dir.path(), "f", 1).unwrap(), b"abc");
    assert_eq!(reconstruct(dir.path(), "f", 2).unwrap(), b"abcd");
    assert_eq!(reconstruct(dir.path(), "f", 3).unwrap(), b"abcde");
}

#[test]
fn reconstruct_of_unknown_version_is_not_found() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"abc", None, false).unwrap();
    assert!(matches!(
        reconstruct(dir.path(), "f", 7),
        Err(StoreError::NoSuchVersion { .. })
    ));
}

#[test]
fn enumerate_on_untouched_name_is_empty() {
    let dir = tempdir().unwrap();
    assert!(enumerate(dir.path(), "never-tracked").unwrap().is_empty());
}

#[test]
fn enumerate_is_idempotent_without_mutation() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"abc", None, false).unwrap();
    let first = enumerate(dir.path(), "f").unwrap();
    let second = enumerate(dir.path(), "f").unwrap();
    assert_eq!(first, second);
}

#[test]
fn delete_tail_succeeds_and_shrinks_the_chain() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"abc", None, false).unwrap();
    append(dir.path(), "f", b"abcd", None, false).unwrap();
    delete_version(dir.path(), "f", 2).unwrap();
    assert_eq!(enumerate(dir.path(), "f").unwrap(), vec![1]);
}

#[test]
fn delete_non_tail_is_rejected() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"abc", None, false).unwrap();
    append(dir.path(), "f", b"abcd", None, false).unwrap();
    assert!(matches!(
        delete_version(dir.path(), "f", 1),
        Err(StoreError::NonTailDeletion { .. })
    ));
}

#[test]
fn message_and_checksum_are_recorded() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"abc", Some("first commit"), false).unwrap();
    let meta = read_metadata(dir.path(), "f", 1).unwrap();
    assert_eq!(meta.message, "first commit");
    assert_eq!(meta.checksum.len(), 64); // sha256 hex digest
    assert_eq!(meta.version, 1);
}

#[test]
fn load_stream_exposes_the_delta_for_diffing() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"hello world", None, false).unwrap();
    append(dir.path(), "f", b"hello there world", None, false).unwrap();
    let (base_size, stream) = load_stream(dir.path(), "f", 2).unwrap();
    assert_eq!(base_size, 11);
    assert_eq!(stream.target_size(), 17);
}

#[test]
fn names_with_separators_do_not_collide_on_disk() {
    let dir = tempdir().unwrap();
    append(dir.path(), "a/b", b"one", None, false).unwrap();
    append(dir.path(), "a\\b", b"two", None, false).unwrap();
    // Both map to the same sanitised stem, so the second append becomes
    // version 2 of the same chain rather than a separate file.
    assert_eq!(enumerate(dir.path(), "a/b").unwrap(), vec![1, 2]);
}

#[test]
fn locked_append_round_trips_like_unlocked() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"abc", None, true).unwrap();
    assert_eq!(reconstruct(dir.path(), "f", 1).unwrap(), b"abc");
}

#[test]
fn names_lists_every_tracked_stem_once() {
    let dir = tempdir().unwrap();
    append(dir.path(), "a", b"1", None, false).unwrap();
    append(dir.path(), "a", b"12", None, false).unwrap();
    append(dir.path(), "b", b"x", None, false).unwrap();
    assert_eq!(names(dir.path()).unwrap(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn checksum_matches_the_one_recorded_on_append() {
    let dir = tempdir().unwrap();
    append(dir.path(), "f", b"hello", None, false).unwrap();
    let meta = read_metadata(dir.path(), "f", 1).unwrap();
    assert_eq!(meta.checksum, checksum(b"hello"));
}
