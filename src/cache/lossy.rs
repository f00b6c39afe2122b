//! Fixed-capacity, collision-lossy deduplication cache.
//!
//! Two parallel arrays of `N` slots, addressed by `hash(key) % N`. A probe
//! that finds a different key in its slot overwrites it unconditionally: no
//! chaining, no probe sequence, no resizing. Lookups are therefore O(1) and
//! branch-light, at the price of occasionally storing a value twice when two
//! live keys fight over one slot.
//!
//! With identity keys a collision can only cost a dedup opportunity: a slot
//! reports a hit only for the exact key that wrote it, so the offset handed
//! back always designates that key's bytes.

use super::{DedupCache, Emplace, UNSET_OFFSET};
use crate::config::CACHE_LINE_SIZE;
use crate::hash::KeyHasher;

/// Key marking an unoccupied slot. Key schemes never produce it.
pub const EMPTY_KEY: u64 = u64::MAX;

/// `N`-slot direct-mapped cache using hash strategy `H`.
#[derive(Debug, Clone)]
pub struct LossyCache<H: KeyHasher, const N: usize> {
    keys: [u64; N],
    offsets: [u32; N],
    hasher: H,
    evictions: u64,
}

impl<H: KeyHasher, const N: usize> LossyCache<H, N> {
    const NONZERO_SLOTS: () = assert!(N > 0, "LossyCache needs at least one slot");

    /// Creates a cache with every slot invalidated.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_SLOTS;
        LossyCache {
            keys: [EMPTY_KEY; N],
            offsets: [UNSET_OFFSET; N],
            hasher: H::default(),
            evictions: 0,
        }
    }

    /// Number of slots (`N`).
    pub const fn num_slots(&self) -> usize {
        N
    }

    /// Slot index `key` maps to.
    #[inline(always)]
    pub fn slot_of(&self, key: u64) -> usize {
        (self.hasher.hash(key) % N as u64) as usize
    }

    /// Number of slots currently holding a key.
    pub fn occupied(&self) -> usize {
        self.keys.iter().filter(|&&k| k != EMPTY_KEY).count()
    }

    /// Flush the cache's memory out of every CPU cache level.
    ///
    /// Cold-start mode for benchmarks: the first probes of the next pass then
    /// pay main-memory latency. A no-op on targets without `clflush`.
    pub fn evict_from_cpu_cache(&self) {
        #[cfg(target_arch = "x86_64")]
        {
            let start = self as *const Self as *const u8;
            let len = core::mem::size_of::<Self>();
            let mut off = 0;
            while off < len {
                // SAFETY: `start + off` stays inside `*self`; clflush (SSE2,
                // baseline on x86_64) only evicts the line, it never writes.
                unsafe { core::arch::x86_64::_mm_clflush(start.add(off)) };
                off += CACHE_LINE_SIZE;
            }
        }
    }
}

impl<H: KeyHasher, const N: usize> Default for LossyCache<H, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: KeyHasher, const N: usize> DedupCache for LossyCache<H, N> {
    #[inline]
    fn emplace(&mut self, key: u64, candidate: u32) -> Emplace<'_> {
        debug_assert_ne!(key, EMPTY_KEY, "EMPTY_KEY is reserved");
        let slot = self.slot_of(key);
        let occupant = self.keys[slot];
        let inserted = occupant != key;
        if inserted {
            self.evictions += (occupant != EMPTY_KEY) as u64;
            self.keys[slot] = key;
            self.offsets[slot] = candidate;
        }
        Emplace { offset: &mut self.offsets[slot], inserted }
    }

    fn evictions(&self) -> u64 {
        self.evictions
    }

    fn flush_cpu_cache(&self) {
        self.evict_from_cpu_cache();
    }
}
