//! Exact deduplication cache backed by a `HashMap`.
//!
//! Never misses a repeated key and never aliases two keys: this is the
//! correctness baseline the lossy cache is measured against. Growth is
//! unbounded and rehashing happens transparently inside the map.

use std::collections::hash_map::{Entry, HashMap, RandomState};
use std::hash::BuildHasher;

use super::{DedupCache, Emplace};
use crate::config::EXACT_RESERVE;

/// Unbounded key → offset map.
///
/// The hasher defaults to the standard library's SipHash; any
/// [`KeyBuildHasher`](crate::hash::KeyBuildHasher) may be substituted.
#[derive(Debug, Clone)]
pub struct ExactCache<S = RandomState> {
    map: HashMap<u64, u32, S>,
}

impl ExactCache<RandomState> {
    /// Creates a cache pre-sized for [`EXACT_RESERVE`] keys.
    pub fn new() -> Self {
        Self::with_capacity(EXACT_RESERVE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ExactCache { map: HashMap::with_capacity(capacity) }
    }
}

impl Default for ExactCache<RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BuildHasher> ExactCache<S> {
    /// Creates a cache pre-sized for [`EXACT_RESERVE`] keys using `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(EXACT_RESERVE, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        ExactCache { map: HashMap::with_capacity_and_hasher(capacity, hasher) }
    }

    /// Number of distinct keys recorded so far.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Offset recorded for `key`, if any.
    pub fn get(&self, key: u64) -> Option<u32> {
        self.map.get(&key).copied()
    }
}

impl<S: BuildHasher> DedupCache for ExactCache<S> {
    #[inline]
    fn emplace(&mut self, key: u64, candidate: u32) -> Emplace<'_> {
        match self.map.entry(key) {
            Entry::Occupied(e) => Emplace { offset: e.into_mut(), inserted: false },
            Entry::Vacant(e) => Emplace { offset: e.insert(candidate), inserted: true },
        }
    }
}
