//! The append encoder: one deduplicating pass over a sequence of values.
//!
//! For each value, in order:
//!
//! 1. derive its key with the [`KeyScheme`];
//! 2. `emplace(key, buffer.len())` in the cache;
//! 3. on insert, append the value's bytes to the buffer;
//! 4. record the slot's offset for this position.
//!
//! Under a verifying scheme (both shipped schemes are) a hit whose buffer span
//! does not hold the value's bytes is demoted to an insert, and the slot is
//! repointed at the fresh copy. Offsets therefore always designate the right
//! bytes, whatever the cache.

use std::fmt;

use super::key::{ByAddress, KeyScheme};
use crate::cache::DedupCache;
use crate::config::MAX_BUFFER_SIZE;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors returned by an encode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Appending the value at `index` would grow the buffer past `limit`
    /// bytes: the encoder's cap, at most [`MAX_BUFFER_SIZE`] (the largest
    /// buffer a `u32` offset can address).
    BufferTooLarge { index: usize, limit: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::BufferTooLarge { index, limit } => write!(
                f,
                "output buffer would exceed {} bytes at value {}",
                limit, index
            ),
        }
    }
}

impl std::error::Error for EncodeError {}

// ── Output types ──────────────────────────────────────────────────────────────

/// Counters collected during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Values whose bytes were appended to the buffer.
    pub appends: u64,
    /// Values resolved to an earlier offset.
    pub hits: u64,
    /// Cache hits rejected by content verification.
    pub rejected: u64,
    /// Live cache entries overwritten by a colliding key.
    pub evictions: u64,
}

/// Result of an encode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    /// Every stored value, back to back.
    pub buffer: Vec<u8>,
    /// One offset into `buffer` per input value, in input order.
    pub offsets: Vec<u32>,
    pub stats: EncodeStats,
}

impl Encoded {
    /// Length of the output buffer, the pass's summary metric.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes stored for input `index`, given its length.
    ///
    /// Returns `None` if `index` is out of range or the span overruns the buffer.
    pub fn get(&self, index: usize, len: usize) -> Option<&[u8]> {
        let start = *self.offsets.get(index)? as usize;
        self.buffer.get(start..start.checked_add(len)?)
    }
}

// ── Encoder ───────────────────────────────────────────────────────────────────

/// Deduplicating append encoder parameterised by a key scheme.
#[derive(Debug, Clone)]
pub struct AppendEncoder<K: KeyScheme> {
    scheme: K,
    reserve: usize,
    max_buffer: usize,
}

impl<K: KeyScheme + Default> Default for AppendEncoder<K> {
    fn default() -> Self {
        Self::new(K::default())
    }
}

impl<K: KeyScheme> AppendEncoder<K> {
    pub fn new(scheme: K) -> Self {
        AppendEncoder { scheme, reserve: 0, max_buffer: MAX_BUFFER_SIZE }
    }

    /// Pre-allocate `bytes` of output buffer per pass.
    pub fn reserve(mut self, bytes: usize) -> Self {
        self.reserve = bytes;
        self
    }

    /// Cap the output buffer at `bytes` (never above [`MAX_BUFFER_SIZE`]).
    /// A pass that would grow past the cap fails with
    /// [`EncodeError::BufferTooLarge`].
    pub fn max_buffer(mut self, bytes: usize) -> Self {
        self.max_buffer = bytes.min(MAX_BUFFER_SIZE);
        self
    }

    pub fn scheme(&self) -> &K {
        &self.scheme
    }

    /// Run one pass over `values` with a fresh `cache`.
    ///
    /// The cache is consumed: it belongs to this pass and is dropped with it.
    pub fn encode<C: DedupCache>(&self, values: &[&[u8]], cache: C) -> Result<Encoded, EncodeError> {
        self.run(values, cache, false)
    }

    /// Like [`encode`](Self::encode), but first flushes the cache's storage
    /// from the CPU caches ([`DedupCache::flush_cpu_cache`]).
    ///
    /// The flush happens once the cache has reached its place in this call's
    /// frame, so no later move pulls it back into the CPU caches.
    pub fn encode_cold<C: DedupCache>(
        &self,
        values: &[&[u8]],
        cache: C,
    ) -> Result<Encoded, EncodeError> {
        self.run(values, cache, true)
    }

    #[inline]
    fn run<C: DedupCache>(
        &self,
        values: &[&[u8]],
        mut cache: C,
        cold: bool,
    ) -> Result<Encoded, EncodeError> {
        if cold {
            cache.flush_cpu_cache();
        }

        let mut buffer: Vec<u8> = Vec::with_capacity(self.reserve);
        let mut offsets: Vec<u32> = Vec::with_capacity(values.len());
        let mut stats = EncodeStats::default();

        for (index, &value) in values.iter().enumerate() {
            let key = self.scheme.key(value);
            // buffer.len() <= max_buffer <= MAX_BUFFER_SIZE < u32::MAX
            let candidate = buffer.len() as u32;
            let slot = cache.emplace(key, candidate);

            let mut append = slot.inserted;
            if !append && K::VERIFIES_CONTENT && !span_matches(&buffer, *slot.offset, value) {
                *slot.offset = candidate;
                stats.rejected += 1;
                append = true;
            }

            if append {
                if buffer.len() + value.len() > self.max_buffer {
                    return Err(EncodeError::BufferTooLarge { index, limit: self.max_buffer });
                }
                buffer.extend_from_slice(value);
                stats.appends += 1;
            } else {
                stats.hits += 1;
            }
            offsets.push(*slot.offset);
        }

        stats.evictions = cache.evictions();
        Ok(Encoded { buffer, offsets, stats })
    }
}

/// `true` when `buffer[offset..offset + value.len()]` exists and equals `value`.
#[inline]
fn span_matches(buffer: &[u8], offset: u32, value: &[u8]) -> bool {
    let start = offset as usize;
    buffer.get(start..start + value.len()) == Some(value)
}

/// Encode `values` with `cache`, keying on storage address.
pub fn encode<C: DedupCache>(values: &[&[u8]], cache: C) -> Result<Encoded, EncodeError> {
    AppendEncoder::new(ByAddress).encode(values, cache)
}
