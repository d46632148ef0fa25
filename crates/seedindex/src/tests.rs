use super::*;

#[test]
fn zero_buckets_is_rejected() {
    assert_eq!(SeedIndex::new(0).unwrap_err(), ZeroBuckets);
}

#[test]
fn empty_index_has_empty_bucket() {
    let index = SeedIndex::new(16).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.bucket(42).count(), 0);
}

#[test]
fn insert_and_find_round_trips() {
    let mut index = SeedIndex::new(16).unwrap();
    index.insert(5, 100);
    let found: Vec<_> = index.bucket(5).filter(|e| e.fingerprint == 5).collect();
    assert_eq!(
        found,
        vec![SeedEntry {
            fingerprint: 5,
            base_offset: 100
        }]
    );
}

#[test]
fn newest_entry_visited_first() {
    let mut index = SeedIndex::new(4).unwrap();
    index.insert(1, 10);
    index.insert(1, 20);
    index.insert(1, 30);
    let offsets: Vec<u32> = index
        .bucket(1)
        .filter(|e| e.fingerprint == 1)
        .map(|e| e.base_offset)
        .collect();
    assert_eq!(offsets, vec![30, 20, 10]);
}

#[test]
fn colliding_fingerprints_share_a_bucket_but_are_distinguishable() {
    let mut index = SeedIndex::new(4).unwrap();
    index.insert(1, 111); // bucket 1
    index.insert(5, 222); // bucket 1 (5 mod 4 == 1)
    let bucket_entries: Vec<_> = index.bucket(1).collect();
    assert_eq!(bucket_entries.len(), 2);
    let matching: Vec<_> = index.bucket(5).filter(|e| e.fingerprint == 5).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].base_offset, 222);
}

#[test]
fn len_tracks_insertions() {
    let mut index = SeedIndex::new(8).unwrap();
    for i in 0..10 {
        index.insert(i, i * 2);
    }
    assert_eq!(index.len(), 10);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_inserted_entry_is_reachable(
            entries in proptest::collection::vec((any::<u32>(), any::<u32>()), 0..200),
            buckets in 1usize..64,
        ) {
            let mut index = SeedIndex::new(buckets).unwrap();
            for &(fp, off) in &entries {
                index.insert(fp, off);
            }
            for &(fp, off) in &entries {
                let found = index.bucket(fp).any(|e| e.fingerprint == fp && e.base_offset == off);
                prop_assert!(found);
            }
        }
    }
}
