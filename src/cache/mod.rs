//! Deduplication caches.
//!
//! A cache answers one question per input value: has this key been stored
//! before, and if so at which buffer offset? Every implementation exposes the
//! same [`DedupCache::emplace`] contract so the encoder can be instantiated
//! with any of them:
//!
//! | Type                          | Bound     | Misses dedup? | Cost |
//! |-------------------------------|-----------|---------------|------|
//! | [`ExactCache`]                | unbounded | never         | hash map probe |
//! | [`LossyCache`]                | `N` slots | on collision  | one array probe |
//! | [`NoDedup`]                   | none      | always        | nothing |
//!
//! Caches are single-pass objects: the encoder takes one by value, so a cache
//! can never be reused or shared between passes.

pub mod exact;
pub mod lossy;
pub mod passthrough;

pub use exact::ExactCache;
pub use lossy::{LossyCache, EMPTY_KEY};
pub use passthrough::NoDedup;

/// Offset value meaning "no offset recorded yet".
pub const UNSET_OFFSET: u32 = u32::MAX;

/// Result of [`DedupCache::emplace`].
#[derive(Debug)]
pub struct Emplace<'a> {
    /// The slot's offset. Holds the candidate when `inserted`, the earlier
    /// offset otherwise. The caller may overwrite it.
    pub offset: &'a mut u32,
    /// `true` when the key was not found and the caller must append the value.
    pub inserted: bool,
}

/// Common interface of every deduplication cache.
pub trait DedupCache {
    /// Look up `key`.
    ///
    /// If absent (or evicted), record `candidate` as its offset and report
    /// `inserted = true`; otherwise leave the stored offset untouched and
    /// report `inserted = false`.
    fn emplace(&mut self, key: u64, candidate: u32) -> Emplace<'_>;

    /// Number of live entries silently overwritten by a different key.
    fn evictions(&self) -> u64 {
        0
    }

    /// Evict the cache's own storage from the CPU caches (cold-start mode).
    /// No-op for caches whose storage is allocated lazily.
    fn flush_cpu_cache(&self) {}
}
