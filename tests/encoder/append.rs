// Integration tests for encoder/append.rs — the deduplicating append pass.
//
// Covers:
//   - The worked example: pool "abcdef", picks [ab, cd, ab, ef, cd]
//   - No-dedup baseline appends every value
//   - Lossy cache with a single slot degrades to no-dedup on alternating keys
//   - Empty input under every cache
//   - Content keys with verification, including forced key collisions
//   - Address-keyed views that share a start byte but differ in length
//   - The output-buffer cap and the cold-start flush hook

use std::cell::Cell;

use dedup_append::cache::{DedupCache, Emplace, ExactCache, LossyCache, NoDedup};
use dedup_append::{
    encode, AppendEncoder, ByAddress, ByContent, Crc32, EncodeError, Fnv1aPy, KeyScheme,
};

/// [ab, cd, ab, ef, cd] as views into one shared pool.
fn worked_example(pool: &[u8]) -> Vec<&[u8]> {
    vec![&pool[0..2], &pool[2..4], &pool[0..2], &pool[4..6], &pool[2..4]]
}

#[test]
fn exact_cache_worked_example() {
    let pool = b"abcdef".to_vec();
    let out = encode(&worked_example(&pool), ExactCache::new()).unwrap();
    assert_eq!(out.buffer, b"abcdef");
    assert_eq!(out.offsets, [0, 2, 0, 4, 2]);
    assert_eq!(out.stats.appends, 3);
    assert_eq!(out.stats.hits, 2);
}

#[test]
fn no_dedup_worked_example() {
    let pool = b"abcdef".to_vec();
    let out = encode(&worked_example(&pool), NoDedup::new()).unwrap();
    assert_eq!(out.buffer, b"abcdabefcd");
    assert_eq!(out.offsets, [0, 2, 4, 6, 8]);
    assert_eq!(out.stats.hits, 0);
}

#[test]
fn single_slot_lossy_alternating_keys() {
    // Consecutive keys always differ, so every probe evicts.
    let pool = b"abcdef".to_vec();
    let out = encode(&worked_example(&pool), LossyCache::<Crc32, 1>::new()).unwrap();
    assert_eq!(out.buffer, b"abcdabefcd");
    assert_eq!(out.offsets, [0, 2, 4, 6, 8]);
    assert_eq!(out.stats.evictions, 4);
}

#[test]
fn single_slot_lossy_repeated_key_hits() {
    let pool = b"abcdef".to_vec();
    let values: Vec<&[u8]> = vec![&pool[0..2], &pool[0..2], &pool[0..2]];
    let out = encode(&values, LossyCache::<Crc32, 1>::new()).unwrap();
    assert_eq!(out.buffer, b"ab");
    assert_eq!(out.offsets, [0, 0, 0]);
}

#[test]
fn empty_input_every_cache() {
    let values: Vec<&[u8]> = Vec::new();
    for out in [
        encode(&values, NoDedup::new()).unwrap(),
        encode(&values, ExactCache::new()).unwrap(),
        encode(&values, LossyCache::<Fnv1aPy, 4>::new()).unwrap(),
        encode(&values, LossyCache::<Crc32, 1>::new()).unwrap(),
    ] {
        assert!(out.buffer.is_empty());
        assert!(out.offsets.is_empty());
        assert_eq!(out.stats.appends, 0);
    }
}

#[test]
fn get_reads_back_each_value() {
    let pool = b"abcdef".to_vec();
    let values = worked_example(&pool);
    let out = encode(&values, ExactCache::new()).unwrap();
    for (i, v) in values.iter().enumerate() {
        assert_eq!(out.get(i, v.len()), Some(*v));
    }
    assert_eq!(out.get(values.len(), 1), None);
    assert_eq!(out.get(3, 10), None);
}

#[test]
fn content_keys_merge_equal_bytes() {
    let first = b"xy".to_vec();
    let second = b"xy".to_vec();
    let values: Vec<&[u8]> = vec![&first[..], &second[..], &first[..]];

    let by_address = encode(&values, ExactCache::new()).unwrap();
    assert_eq!(by_address.buffer, b"xyxy");

    let by_content = AppendEncoder::new(ByContent::default())
        .encode(&values, ExactCache::new())
        .unwrap();
    assert_eq!(by_content.buffer, b"xy");
    assert_eq!(by_content.offsets, [0, 0, 0]);
}

/// Every value maps to one key: each hit must be checked against the buffer.
#[derive(Debug, Clone, Copy, Default)]
struct OneKey;

impl KeyScheme for OneKey {
    const VERIFIES_CONTENT: bool = true;

    fn key(&self, _value: &[u8]) -> u64 {
        1
    }
}

#[test]
fn verification_repoints_slot_on_mismatch() {
    let values: Vec<&[u8]> = vec![&b"ab"[..], &b"cd"[..], &b"cd"[..], &b"ab"[..]];
    let out = AppendEncoder::new(OneKey).encode(&values, ExactCache::new()).unwrap();
    assert_eq!(out.buffer, b"abcdab");
    assert_eq!(out.offsets, [0, 2, 2, 4]);
    assert_eq!(out.stats.rejected, 2);
    assert_eq!(out.stats.hits, 1);
    for (i, v) in values.iter().enumerate() {
        assert_eq!(out.get(i, v.len()), Some(*v));
    }
}

#[test]
fn reserve_is_transparent() {
    let pool = b"abcdef".to_vec();
    let values = worked_example(&pool);
    let plain = AppendEncoder::new(ByContent::default())
        .encode(&values, ExactCache::new())
        .unwrap();
    let reserved = AppendEncoder::new(ByContent::default())
        .reserve(1 << 16)
        .encode(&values, ExactCache::new())
        .unwrap();
    assert_eq!(plain, reserved);
}

#[test]
fn buffer_too_large_display() {
    let e = EncodeError::BufferTooLarge { index: 3, limit: 16 };
    assert!(e.to_string().contains("value 3"));
    assert!(e.to_string().contains("16 bytes"));
}

#[test]
fn buffer_cap_rejects_growth_past_limit() {
    let pool = b"abcdef".to_vec();
    let values = worked_example(&pool);
    // The no-dedup pass needs 10 bytes; the fourth value crosses 7.
    let err = AppendEncoder::new(ByAddress)
        .max_buffer(7)
        .encode(&values, NoDedup::new())
        .unwrap_err();
    assert_eq!(err, EncodeError::BufferTooLarge { index: 3, limit: 7 });

    // The exact pass only needs 6 and fits.
    let out = AppendEncoder::new(ByAddress)
        .max_buffer(7)
        .encode(&values, ExactCache::new())
        .unwrap();
    assert_eq!(out.buffer_len(), 6);
}

#[test]
fn buffer_cap_never_exceeds_offset_range() {
    let values: Vec<&[u8]> = vec![&b"ab"[..]];
    let out = AppendEncoder::new(ByAddress)
        .max_buffer(usize::MAX)
        .encode(&values, NoDedup::new())
        .unwrap();
    assert_eq!(out.buffer, b"ab");
}

// ── Address keys: views sharing a start byte ─────────────────────────────────

#[test]
fn address_keys_longer_view_after_shorter() {
    // Both views start at pool[0]; the longer one must not reuse the
    // two-byte copy.
    let pool = b"abcdef".to_vec();
    let values: Vec<&[u8]> = vec![&pool[0..2], &pool[0..4]];
    for out in [
        encode(&values, ExactCache::new()).unwrap(),
        encode(&values, LossyCache::<Crc32, 4>::new()).unwrap(),
    ] {
        assert_eq!(out.get(0, 2), Some(&b"ab"[..]));
        assert_eq!(out.get(1, 4), Some(&b"abcd"[..]));
        assert_eq!(out.stats.rejected, 1);
    }
}

#[test]
fn address_keys_shorter_view_reuses_longer_copy() {
    let pool = b"abcdef".to_vec();
    let values: Vec<&[u8]> = vec![&pool[0..4], &pool[0..2]];
    let out = encode(&values, ExactCache::new()).unwrap();
    assert_eq!(out.buffer, b"abcd");
    assert_eq!(out.offsets, [0, 0]);
    assert_eq!(out.stats.hits, 1);
}

// ── Cold start ───────────────────────────────────────────────────────────────

/// Exact cache that counts CPU-cache flush requests.
struct FlushCounting<'a> {
    inner: ExactCache,
    flushes: &'a Cell<u32>,
}

impl DedupCache for FlushCounting<'_> {
    fn emplace(&mut self, key: u64, candidate: u32) -> Emplace<'_> {
        self.inner.emplace(key, candidate)
    }

    fn flush_cpu_cache(&self) {
        self.flushes.set(self.flushes.get() + 1);
    }
}

#[test]
fn encode_cold_flushes_cache_once_per_pass() {
    let pool = b"abcdef".to_vec();
    let values = worked_example(&pool);
    let flushes = Cell::new(0);
    let encoder = AppendEncoder::new(ByAddress);

    let warm = encoder
        .encode(&values, FlushCounting { inner: ExactCache::new(), flushes: &flushes })
        .unwrap();
    assert_eq!(flushes.get(), 0);

    let cold = encoder
        .encode_cold(&values, FlushCounting { inner: ExactCache::new(), flushes: &flushes })
        .unwrap();
    assert_eq!(flushes.get(), 1);
    assert_eq!(warm, cold);
}

#[test]
fn encode_cold_on_lossy_cache_keeps_output() {
    let pool = b"abcdef".to_vec();
    let values = worked_example(&pool);
    let encoder = AppendEncoder::new(ByAddress);
    let warm = encoder.encode(&values, LossyCache::<Fnv1aPy, 1024>::new()).unwrap();
    let cold = encoder.encode_cold(&values, LossyCache::<Fnv1aPy, 1024>::new()).unwrap();
    assert_eq!(warm, cold);
}
