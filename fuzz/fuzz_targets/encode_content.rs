#![no_main]
use libfuzzer_sys::fuzz_target;

use dedup_append::cache::{ExactCache, LossyCache, NoDedup};
use dedup_append::workload::split_lines;
use dedup_append::{AppendEncoder, ByContent, Crc32Shift, Encoded};

fn check(values: &[&[u8]], out: &Encoded, label: &str) {
    assert_eq!(out.offsets.len(), values.len(), "{label}: offset count");
    for (i, v) in values.iter().enumerate() {
        assert_eq!(out.get(i, v.len()), Some(*v), "{label}: value {i} decodes wrong");
    }
}

fuzz_target!(|data: &[u8]| {
    // Every line is its own allocation-free view; equal lines only merge by content.
    let values = split_lines(data);
    let encoder = AppendEncoder::new(ByContent::default());

    let baseline = encoder.encode(&values, NoDedup::new()).unwrap();
    let exact = encoder.encode(&values, ExactCache::new()).unwrap();
    let lossy = encoder.encode(&values, LossyCache::<Crc32Shift, 4>::new()).unwrap();

    check(&values, &baseline, "no-dedup");
    check(&values, &exact, "exact");
    check(&values, &lossy, "lossy");

    assert!(exact.buffer_len() <= lossy.buffer_len());
    assert!(lossy.buffer_len() <= baseline.buffer_len());
});
