// workload.rs — Deterministic value sequences for the encoder.
//
// A workload is a pool of `unique` distinct values carved out of one backing
// buffer, plus `cardinality` picks from that pool. The values handed to the
// encoder are views into the pool, so repeated values share their storage
// address and `ByAddress` keys dedup them.

use std::ops::Range;

use crate::config::{MAX_UNIQUE_COUNT, MAX_VALUE_SIZE};

// ---------------------------------------------------------------------------
// Generator state
// ---------------------------------------------------------------------------

/// 32-bit multiply/xor/rotate generator; reproducible for a given seed.
struct WorkloadRng {
    state: u32,
}

impl WorkloadRng {
    fn new(seed: u64) -> Self {
        WorkloadRng { state: (seed ^ (seed >> 32)) as u32 }
    }

    /// Uniform value in `0..range` (multiply-shift reduction).
    #[inline]
    fn below(&mut self, range: u32) -> u32 {
        const PRIME1: u32 = 2_654_435_761;
        const PRIME2: u32 = 2_246_822_519;
        let mut r = self.state;
        r = r.wrapping_mul(PRIME1);
        r ^= PRIME2;
        r = r.rotate_left(13);
        self.state = r;
        ((r as u64 * range as u64) >> 32) as u32
    }
}

// ---------------------------------------------------------------------------
// Workload
// ---------------------------------------------------------------------------

/// A pool of unique values and an ordered sequence of picks from it.
#[derive(Debug, Clone)]
pub struct Workload {
    pool: Vec<u8>,
    uniques: Vec<Range<usize>>,
    picks: Vec<usize>,
}

impl Workload {
    /// Build a workload of `cardinality` values drawn from `unique` distinct
    /// values of 1..=[`MAX_VALUE_SIZE`] random lowercase bytes.
    ///
    /// With `unique == 0` there is nothing to draw from and the sequence is empty.
    /// `unique` must not exceed [`MAX_UNIQUE_COUNT`]; the CLI rejects larger sizes.
    pub fn generate(unique: usize, cardinality: usize, seed: u64) -> Self {
        debug_assert!(unique <= MAX_UNIQUE_COUNT, "unique count {unique} too large");
        let mut rng = WorkloadRng::new(seed);

        let mut pool = Vec::with_capacity(unique * MAX_VALUE_SIZE);
        let mut uniques = Vec::with_capacity(unique);
        for _ in 0..unique {
            let size = rng.below(MAX_VALUE_SIZE as u32) as usize + 1;
            let start = pool.len();
            pool.extend((0..size).map(|_| b'a' + rng.below(26) as u8));
            uniques.push(start..pool.len());
        }

        let picks = if unique == 0 {
            Vec::new()
        } else {
            (0..cardinality)
                .map(|_| rng.below(unique as u32) as usize)
                .collect()
        };

        Workload { pool, uniques, picks }
    }

    /// The value sequence, as views into the shared pool.
    pub fn values(&self) -> Vec<&[u8]> {
        self.picks
            .iter()
            .map(|&u| &self.pool[self.uniques[u].clone()])
            .collect()
    }

    /// Size of the unique-value pool.
    pub fn unique_count(&self) -> usize {
        self.uniques.len()
    }

    /// Number of values in the sequence.
    pub fn cardinality(&self) -> usize {
        self.picks.len()
    }

    /// Number of distinct pool entries that were actually picked.
    pub fn distinct_picked(&self) -> usize {
        let mut seen = vec![false; self.uniques.len()];
        self.picks.iter().for_each(|&u| seen[u] = true);
        seen.iter().filter(|&&s| s).count()
    }

    /// Sum of all value lengths: the buffer size with no deduplication.
    pub fn total_bytes(&self) -> usize {
        self.picks.iter().map(|&u| self.uniques[u].len()).sum()
    }

    /// Sum of the lengths of the distinct picked values: the buffer size an
    /// exact cache produces.
    pub fn distinct_bytes(&self) -> usize {
        let mut seen = vec![false; self.uniques.len()];
        let mut total = 0;
        for &u in &self.picks {
            if !seen[u] {
                seen[u] = true;
                total += self.uniques[u].len();
            }
        }
        total
    }
}

/// Split `data` into lines, dropping `\n` / `\r\n` terminators.
///
/// A trailing terminator does not produce a final empty value.
pub fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    let data = data.strip_suffix(b"\n").unwrap_or(data);
    if data.is_empty() {
        return Vec::new();
    }
    data.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}
