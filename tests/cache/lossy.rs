// Integration tests for cache/lossy.rs — fixed-size, collision-lossy cache.
//
// Covers:
//   - Fresh caches are empty
//   - A key hits until another key claims its slot
//   - Collisions overwrite and count an eviction
//   - A single-slot cache fed alternating keys inserts every time
//   - Occupancy never exceeds N
//   - The cold-start flush leaves contents intact

use dedup_append::cache::{DedupCache, LossyCache, UNSET_OFFSET};
use dedup_append::{Crc32, Fnv1aPy, Identity};

#[test]
fn fresh_cache_is_empty() {
    let cache = LossyCache::<Crc32, 64>::new();
    assert_eq!(cache.num_slots(), 64);
    assert_eq!(cache.occupied(), 0);
    assert_eq!(cache.evictions(), 0);
}

#[test]
fn insert_stores_candidate_then_hits() {
    let mut cache = LossyCache::<Fnv1aPy, 16>::new();
    let e = cache.emplace(0x1000, 7);
    assert!(e.inserted);
    assert_eq!(*e.offset, 7);
    assert_ne!(*e.offset, UNSET_OFFSET);

    let e = cache.emplace(0x1000, 99);
    assert!(!e.inserted);
    assert_eq!(*e.offset, 7);
}

#[test]
fn colliding_key_overwrites_slot() {
    // Identity % 4: keys 1 and 5 share slot 1.
    let mut cache = LossyCache::<Identity, 4>::new();
    assert_eq!(cache.slot_of(1), cache.slot_of(5));

    assert!(cache.emplace(1, 10).inserted);
    assert!(cache.emplace(5, 20).inserted);
    assert_eq!(cache.evictions(), 1);

    // Key 1 was evicted: it inserts again with the new candidate.
    let e = cache.emplace(1, 30);
    assert!(e.inserted);
    assert_eq!(*e.offset, 30);
    assert_eq!(cache.evictions(), 2);
}

#[test]
fn non_colliding_keys_coexist() {
    let mut cache = LossyCache::<Identity, 4>::new();
    for k in 0..4u64 {
        assert!(cache.emplace(k, k as u32).inserted);
    }
    for k in 0..4u64 {
        let e = cache.emplace(k, 100);
        assert!(!e.inserted);
        assert_eq!(*e.offset, k as u32);
    }
    assert_eq!(cache.occupied(), 4);
    assert_eq!(cache.evictions(), 0);
}

#[test]
fn single_slot_alternating_keys_always_insert() {
    let mut cache = LossyCache::<Crc32, 1>::new();
    let mut offset = 0u32;
    for round in 0..10 {
        for key in [0x10u64, 0x20] {
            let e = cache.emplace(key, offset);
            assert!(e.inserted, "round {round}, key {key:#x}");
            offset += 1;
        }
    }
    assert_eq!(cache.occupied(), 1);
    assert_eq!(cache.evictions(), 19);
}

#[test]
fn occupancy_bounded_by_slots() {
    let mut cache = LossyCache::<Fnv1aPy, 8>::new();
    for k in 0..1000u64 {
        cache.emplace(k * 16, k as u32);
    }
    assert!(cache.occupied() <= 8);
}

#[test]
fn caller_can_repoint_slot() {
    let mut cache = LossyCache::<Identity, 8>::new();
    let e = cache.emplace(3, 0);
    *e.offset = 42;
    assert_eq!(*cache.emplace(3, 0).offset, 42);
}

#[test]
fn cold_flush_keeps_contents() {
    let mut cache = LossyCache::<Crc32, 1024>::new();
    cache.emplace(0xabc0, 5);
    cache.evict_from_cpu_cache();
    let e = cache.emplace(0xabc0, 9);
    assert!(!e.inserted);
    assert_eq!(*e.offset, 5);
}
