// config.rs — Compile-time configuration constants.
//
// Workload shape and cache sizing defaults shared by the encoder, the
// benchmark harness and the `dedup-bench` binary. Runtime overrides live in
// `bench::BenchConfig` and on the command line.

// Longest value produced by the synthetic workload, in bytes.
// Values are drawn uniformly from 1..=MAX_VALUE_SIZE.
pub const MAX_VALUE_SIZE: usize = 10;

// Number of values handed to one encode pass by the synthetic workload.
// Can be overridden with `--cardinality`.
pub const DEFAULT_CARDINALITY: usize = 1000;

// Seed for the workload generator.
// Can be overridden by the DEDUP_BENCH_SEED environment variable,
// or by the `--seed` command-line flag.
pub const DEFAULT_SEED: u64 = 1;

// Unique-pool sizes swept when `--unique` is not given (8 .. 8<<10, ×8 steps
// plus the upper bound).
pub const DEFAULT_UNIQUE_COUNTS: [usize; 5] = [8, 64, 512, 4096, 8192];

// Largest unique-pool size a synthetic workload accepts. The pool's backing
// storage is at most MAX_UNIQUE_COUNT * MAX_VALUE_SIZE bytes and value ids
// are drawn as u32.
pub const MAX_UNIQUE_COUNT: usize = 1 << 24;

// Slot counts a lossy cache may be instantiated with.
// Every entry is a power of two; the lossy cache itself accepts any N > 0.
pub const SLOT_COUNTS: [usize; 9] = [4, 8, 16, 32, 64, 128, 256, 512, 1024];

// Initial capacity of the exact cache's hash map.
pub const EXACT_RESERVE: usize = 16;

// Bytes reserved up front for the output buffer by the benchmark harness, so
// the timed loop does not measure reallocation.
pub const OUTPUT_RESERVE: usize = 1 << 20;

// Largest output buffer an encode pass may produce. Offsets are `u32` and
// `u32::MAX` is the unset-slot sentinel, so the buffer stays strictly below it.
pub const MAX_BUFFER_SIZE: usize = u32::MAX as usize - 1;

// CPU cache-line size assumed by the cold-start flush.
pub const CACHE_LINE_SIZE: usize = 64;
