#![no_main]
use libfuzzer_sys::fuzz_target;

use dedup_append::cache::{ExactCache, LossyCache};
use dedup_append::{encode, Identity};

fuzz_target!(|data: &[u8]| {
    // Byte pairs (start, len) pick windows of the input. Windows sharing a
    // start byte share an address key even when their lengths differ.
    if data.len() < 2 {
        return;
    }
    let values: Vec<&[u8]> = data
        .chunks_exact(2)
        .map(|p| {
            let start = p[0] as usize % data.len();
            let len = (p[1] as usize % 8).min(data.len() - start);
            &data[start..start + len]
        })
        .collect();
    let total: usize = values.iter().map(|v| v.len()).sum();

    let exact = encode(&values, ExactCache::new()).unwrap();
    let lossy = encode(&values, LossyCache::<Identity, 8>::new()).unwrap();

    for (i, v) in values.iter().enumerate() {
        assert_eq!(exact.get(i, v.len()), Some(*v), "exact: value {i}");
        assert_eq!(lossy.get(i, v.len()), Some(*v), "lossy: value {i}");
    }
    assert!(exact.buffer_len() <= total);
    assert!(lossy.buffer_len() <= total);
});
