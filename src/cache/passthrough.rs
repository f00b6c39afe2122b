//! Cache that never deduplicates.
//!
//! Reports every key as new, so the encoder appends every value. Used as the
//! "no dedup" baseline: its buffer length is the sum of all value lengths.

use super::{DedupCache, Emplace, UNSET_OFFSET};

#[derive(Debug, Clone)]
pub struct NoDedup {
    scratch: u32,
}

impl NoDedup {
    pub fn new() -> Self {
        NoDedup { scratch: UNSET_OFFSET }
    }
}

impl Default for NoDedup {
    fn default() -> Self {
        Self::new()
    }
}

impl DedupCache for NoDedup {
    #[inline(always)]
    fn emplace(&mut self, _key: u64, candidate: u32) -> Emplace<'_> {
        self.scratch = candidate;
        Emplace { offset: &mut self.scratch, inserted: true }
    }
}
