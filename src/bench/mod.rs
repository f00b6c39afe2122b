//! Benchmark entry points for the deduplicating encoder.
//!
//! This module exposes [`bench_workloads`] as the primary public API: it
//! builds one synthetic [`Workload`] per unique-pool size and measures every
//! requested cache variant on it. Internally, work is dispatched to:
//!
//! - [`runner::bench_values`]: sweeps variants over one value sequence.
//! - [`runner::bench_variant`]: times a single variant.
//! - [`variant::CacheVariant`]: maps a runtime variant onto a concrete cache.
//!
//! [`config::BenchConfig`] controls display verbosity, measuring time, key
//! scheme and cold-start mode.

pub mod config;
pub mod runner;
pub mod variant;

pub use config::BenchConfig;
pub use runner::{bench_values, bench_variant, BenchResult};
pub use variant::CacheVariant;

use std::io;

use crate::workload::Workload;

/// Benchmark `variants` on one synthetic workload per entry of `uniques`.
///
/// Each workload holds `cardinality` values drawn from a pool of `unique`
/// distinct values, generated from `seed`.
///
/// # Errors
/// Returns `Err` if any variant fails on any workload. Every workload is still
/// attempted.
pub fn bench_workloads(
    uniques: &[usize],
    cardinality: usize,
    seed: u64,
    variants: &[CacheVariant],
    config: &BenchConfig,
) -> io::Result<Vec<BenchResult>> {
    let mut results = Vec::new();
    let mut bench_error = false;
    for &unique in uniques {
        let workload = Workload::generate(unique, cardinality, seed);
        if config.display_level >= 3 {
            eprintln!(
                "workload unique={} cardinality={} distinct={} raw={} bytes",
                unique,
                workload.cardinality(),
                workload.distinct_picked(),
                workload.total_bytes(),
            );
        }
        let values = workload.values();
        match bench_values(&values, &format!("unique={}", unique), variants, config) {
            Ok(r) => results.extend(r),
            Err(_) => bench_error = true,
        }
    }

    if bench_error {
        Err(io::Error::other("benchmark reported errors"))
    } else {
        Ok(results)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
