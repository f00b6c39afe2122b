//! Key schemes: how a value becomes a cache key.
//!
//! [`ByAddress`] keys on the value's storage address. Two views are "the same
//! value" only if they start at the same byte of the same backing buffer, which
//! holds when repeated values are references into one pool of unique values.
//! Views sharing a start address may still differ in length, so hits are
//! re-checked against the buffer.
//!
//! [`ByContent`] keys on an xxh64 digest of the bytes. Digests can collide, so
//! the encoder re-checks the bytes behind every hit for this scheme as well.
//!
//! A scheme with `VERIFIES_CONTENT = false` promises that equal keys always
//! mean equal bytes; the encoder then trusts every hit.

use xxhash_rust::xxh64::xxh64;

use crate::cache::EMPTY_KEY;

/// Derives the cache key of a value.
pub trait KeyScheme {
    /// Whether a cache hit must be confirmed by comparing bytes.
    const VERIFIES_CONTENT: bool;

    /// Key of `value`. Never returns [`EMPTY_KEY`].
    fn key(&self, value: &[u8]) -> u64;
}

/// Storage-identity key: the address of the value's first byte.
///
/// A shorter and a longer view of the same start byte share a key; the byte
/// check on hit stores the longer one separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByAddress;

impl KeyScheme for ByAddress {
    const VERIFIES_CONTENT: bool = true;

    #[inline(always)]
    fn key(&self, value: &[u8]) -> u64 {
        value.as_ptr() as usize as u64
    }
}

/// Content key: xxh64 of the bytes under `seed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByContent {
    pub seed: u64,
}

impl ByContent {
    pub fn with_seed(seed: u64) -> Self {
        ByContent { seed }
    }
}

impl KeyScheme for ByContent {
    const VERIFIES_CONTENT: bool = true;

    #[inline]
    fn key(&self, value: &[u8]) -> u64 {
        xxh64(value, self.seed).min(EMPTY_KEY - 1)
    }
}
