//! Benchmark configuration: runtime parameters for the `bench` subsystem.
//!
//! [`BenchConfig`] holds every tuneable setting for a benchmark run: minimum
//! measuring time, verbosity, key scheme and cold-start mode. Its
//! builder-style setters allow callers to construct a configuration
//! incrementally before passing it to the runner.

use std::time::Duration;

// ── Timing constants ─────────────────────────────────────────────────────────

/// Default minimum measuring time per variant, in milliseconds.
pub const MIN_TIME_MS: u64 = 200;

/// Upper bound on timed passes per variant, whatever the minimum time.
pub const MAX_PASSES: u64 = 10_000_000;

// ── BenchConfig struct ────────────────────────────────────────────────────────

/// Runtime parameters controlling a benchmark session.
///
/// Construct via [`Default`] and then adjust with the builder-style setters.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Verbosity level: 0 = silent, 1 = errors, 2 = results (default),
    /// 3 = progress, 4 = full information.
    pub display_level: u32,

    /// Each variant is re-run until at least this much time has elapsed.
    /// Zero means a single timed pass.
    pub min_time: Duration,

    /// Key values by content (xxh64 + byte verification) instead of by
    /// storage address. Default: `false`.
    pub content_keys: bool,

    /// Flush lossy caches from the CPU caches before every pass. Default: `false`.
    pub cold_start: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            display_level: 2,
            min_time: Duration::from_millis(MIN_TIME_MS),
            content_keys: false,
            cold_start: false,
        }
    }
}

impl BenchConfig {
    /// Set the verbosity level for benchmark output.
    pub fn set_notification_level(&mut self, level: u32) -> &mut Self {
        self.display_level = level;
        self
    }

    /// Set the minimum measuring time per variant.
    pub fn set_min_time(&mut self, min_time: Duration) -> &mut Self {
        self.min_time = min_time;
        self
    }

    pub fn set_content_keys(&mut self, content: bool) -> &mut Self {
        self.content_keys = content;
        self
    }

    /// Enable or disable cold-start mode.
    ///
    /// Only lossy caches are flushed; the exact cache starts empty anyway.
    pub fn set_cold_start(&mut self, cold: bool) -> &mut Self {
        self.cold_start = cold;
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
